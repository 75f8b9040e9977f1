use crewdeck_core::{
    AllocationService, JournalError, JournalResult, MaintainOutcome, MemoryTransactionLog,
    Registry, RegistryError, ResourceKind, ResourceState, ServiceError, TransactionLog,
};
use std::path::PathBuf;

fn service() -> AllocationService<MemoryTransactionLog> {
    AllocationService::new(Registry::new(), MemoryTransactionLog::new())
}

#[test]
fn freshly_registered_resource_is_idle() {
    let mut service = service();
    service
        .register_resource("r1", ResourceKind::Worker)
        .unwrap();

    assert_eq!(service.describe_state("r1").unwrap(), "Idle");
    assert_eq!(
        service.journal().records(),
        ["Resource r1 of type worker added."]
    );
}

#[test]
fn duplicate_registration_fails_with_duplicate_id() {
    let mut service = service();
    service
        .register_resource("r1", ResourceKind::Worker)
        .unwrap();
    service.register_project("p1", "Alpha").unwrap();

    let resource_err = service
        .register_resource("r1", ResourceKind::Equipment)
        .unwrap_err();
    assert!(matches!(
        resource_err,
        ServiceError::Registry(RegistryError::DuplicateId(id)) if id == "r1"
    ));

    let project_err = service.register_project("p1", "Beta").unwrap_err();
    assert!(matches!(
        project_err,
        ServiceError::Registry(RegistryError::DuplicateId(_))
    ));

    // rejected registrations journal nothing
    assert_eq!(service.journal().records().len(), 2);
}

#[test]
fn unknown_ids_fail_with_not_found() {
    let mut service = service();
    service.register_project("p1", "Alpha").unwrap();

    let allocate_missing_resource = service.allocate("ghost", "p1").unwrap_err();
    assert!(matches!(
        allocate_missing_resource,
        ServiceError::Registry(RegistryError::NotFound(id)) if id == "ghost"
    ));

    service
        .register_resource("r1", ResourceKind::Worker)
        .unwrap();
    let allocate_missing_project = service.allocate("r1", "ghost").unwrap_err();
    assert!(matches!(
        allocate_missing_project,
        ServiceError::Registry(RegistryError::NotFound(_))
    ));

    assert!(service.mark_in_use("ghost").is_err());
    assert!(service.maintain("ghost").is_err());
    assert!(service.describe_state("ghost").is_err());

    // failed operations leave no trace beyond the two registrations
    assert_eq!(service.journal().records().len(), 2);
    assert!(service.registry().project("p1").unwrap().resources.is_empty());
}

#[test]
fn equipment_maintenance_sets_state_and_journals_once() {
    let mut service = service();
    service
        .register_resource("R1", ResourceKind::Equipment)
        .unwrap();
    assert_eq!(service.describe_state("R1").unwrap(), "Idle");

    let outcome = service.maintain("R1").unwrap();
    assert_eq!(outcome, MaintainOutcome::UnderMaintenance);
    assert_eq!(service.describe_state("R1").unwrap(), "under maintenance");

    let maintenance_records: Vec<_> = service
        .journal()
        .records()
        .iter()
        .filter(|record| record.as_str() == "Resource R1 is under maintenance.")
        .collect();
    assert_eq!(maintenance_records.len(), 1);
}

#[test]
fn worker_maintenance_is_reported_not_journaled() {
    let mut service = service();
    service
        .register_resource("w1", ResourceKind::Worker)
        .unwrap();
    let records_before = service.journal().records().len();

    let outcome = service.maintain("w1").unwrap();
    assert_eq!(outcome, MaintainOutcome::NotEligible);
    assert_eq!(
        service.registry().resource("w1").unwrap().state,
        ResourceState::Idle
    );
    assert_eq!(service.journal().records().len(), records_before);
}

#[test]
fn allocation_marks_in_use_and_journals_project_name() {
    let mut service = service();
    service.register_project("P1", "Alpha").unwrap();
    service
        .register_resource("R2", ResourceKind::Worker)
        .unwrap();

    service.allocate("R2", "P1").unwrap();

    let resource = service.registry().resource("R2").unwrap();
    assert_eq!(resource.state, ResourceState::InUse);
    assert_eq!(resource.project.as_deref(), Some("P1"));
    assert_eq!(
        service.registry().project("P1").unwrap().resources,
        ["R2".to_string()]
    );
    assert!(service
        .journal()
        .records()
        .iter()
        .any(|record| record == "Resource R2 allocated to project Alpha"));
}

#[test]
fn maintaining_an_allocated_worker_changes_nothing() {
    let mut service = service();
    service.register_project("P1", "Alpha").unwrap();
    service
        .register_resource("R2", ResourceKind::Worker)
        .unwrap();
    service.allocate("R2", "P1").unwrap();
    let records_before = service.journal().records().len();

    let outcome = service.maintain("R2").unwrap();
    assert_eq!(outcome, MaintainOutcome::NotEligible);
    assert_eq!(
        service.registry().resource("R2").unwrap().state,
        ResourceState::InUse
    );
    assert_eq!(service.journal().records().len(), records_before);
}

#[test]
fn double_allocation_duplicates_the_project_entry() {
    let mut service = service();
    service.register_project("p1", "Alpha").unwrap();
    service
        .register_resource("r1", ResourceKind::Worker)
        .unwrap();

    service.allocate("r1", "p1").unwrap();
    service.allocate("r1", "p1").unwrap();

    assert_eq!(
        service.registry().project("p1").unwrap().resources,
        ["r1".to_string(), "r1".to_string()]
    );
}

#[test]
fn reallocation_moves_back_reference_but_keeps_stale_entry() {
    let mut service = service();
    service.register_project("p1", "Alpha").unwrap();
    service.register_project("p2", "Beta").unwrap();
    service
        .register_resource("r1", ResourceKind::Equipment)
        .unwrap();

    service.allocate("r1", "p1").unwrap();
    service.allocate("r1", "p2").unwrap();

    // back-reference follows the newest allocation
    let resource = service.registry().resource("r1").unwrap();
    assert_eq!(resource.project.as_deref(), Some("p2"));

    // the old project keeps its stale forward entry
    assert_eq!(
        service.registry().project("p1").unwrap().resources,
        ["r1".to_string()]
    );
    assert_eq!(
        service.registry().project("p2").unwrap().resources,
        ["r1".to_string()]
    );
}

#[test]
fn describe_names_project_only_under_maintenance() {
    let mut service = service();
    service.register_project("p1", "Alpha").unwrap();
    service
        .register_resource("crane", ResourceKind::Equipment)
        .unwrap();
    service.allocate("crane", "p1").unwrap();

    // in use and allocated, but the project is not named
    assert_eq!(service.describe_state("crane").unwrap(), "In Use");

    service.maintain("crane").unwrap();
    assert_eq!(
        service.describe_state("crane").unwrap(),
        "under maintenance and allocated to project Alpha"
    );
}

#[test]
fn maintenance_without_allocation_names_no_project() {
    let mut service = service();
    service
        .register_resource("crane", ResourceKind::Equipment)
        .unwrap();
    service.maintain("crane").unwrap();

    assert_eq!(service.describe_state("crane").unwrap(), "under maintenance");
}

#[test]
fn mark_in_use_creates_no_association() {
    let mut service = service();
    service
        .register_resource("r1", ResourceKind::Worker)
        .unwrap();

    service.mark_in_use("r1").unwrap();

    let resource = service.registry().resource("r1").unwrap();
    assert_eq!(resource.state, ResourceState::InUse);
    assert!(resource.project.is_none());
    assert!(service
        .journal()
        .records()
        .iter()
        .any(|record| record == "Resource r1 is now in use."));
}

struct FailingJournal;

impl TransactionLog for FailingJournal {
    fn append(&mut self, _message: &str) -> JournalResult<()> {
        Err(JournalError::Io {
            path: PathBuf::from("/dev/full"),
            source: std::io::Error::other("sink unavailable"),
        })
    }
}

#[test]
fn journal_failure_surfaces_as_distinct_error_kind() {
    let mut registry = Registry::new();
    registry.register_resource("r1", ResourceKind::Worker).unwrap();
    let mut service = AllocationService::new(registry, FailingJournal);

    let err = service.mark_in_use("r1").unwrap_err();
    assert!(matches!(err, ServiceError::Journal(JournalError::Io { .. })));

    // the in-memory mutation stands even though the sink failed
    assert_eq!(
        service.registry().resource("r1").unwrap().state,
        ResourceState::InUse
    );
}
