//! Allocation use-case service.
//!
//! # Responsibility
//! - Provide the single entry point for every state-changing operation.
//! - Journal exactly one record per completed mutation.
//!
//! # Invariants
//! - Only this service mutates `Resource.state` and `Project.resources`.
//! - Lookup and eligibility failures precede any mutation; a rejected
//!   operation journals nothing and changes nothing.
//! - Only `ResourceKind::Equipment` may enter `UnderMaintenance`.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::journal::{JournalError, TransactionLog};
use crate::model::resource::{ResourceKind, ResourceState};
use crate::registry::{Registry, RegistryError};

/// Service error for allocation use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Registration or lookup failure; nothing was mutated.
    Registry(RegistryError),
    /// Journal sink failure; the in-memory mutation already applied.
    Journal(JournalError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::Journal(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            Self::Journal(err) => Some(err),
        }
    }
}

impl From<RegistryError> for ServiceError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<JournalError> for ServiceError {
    fn from(value: JournalError) -> Self {
        Self::Journal(value)
    }
}

/// Outcome of a maintenance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintainOutcome {
    /// Equipment resource moved to `UnderMaintenance` and was journaled.
    UnderMaintenance,
    /// Worker resource; state untouched, nothing journaled.
    NotEligible,
}

/// Use-case facade over the registry and the transaction journal.
///
/// Owns both collaborators explicitly; there is no process-wide instance.
pub struct AllocationService<J: TransactionLog> {
    registry: Registry,
    journal: J,
}

impl<J: TransactionLog> AllocationService<J> {
    /// Creates a service around an explicitly constructed registry and
    /// journal sink.
    pub fn new(registry: Registry, journal: J) -> Self {
        Self { registry, journal }
    }

    /// Read access to the owned registry, for display and tests.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read access to the owned journal sink.
    pub fn journal(&self) -> &J {
        &self.journal
    }

    /// Registers one resource and journals the addition.
    pub fn register_resource(&mut self, id: &str, kind: ResourceKind) -> Result<(), ServiceError> {
        self.registry.register_resource(id, kind)?;
        self.journal
            .append(&format!("Resource {id} of type {} added.", kind.label()))?;
        info!(
            "event=register_resource module=service status=ok id={id} kind={}",
            kind.label()
        );
        Ok(())
    }

    /// Registers one project and journals the addition.
    pub fn register_project(&mut self, id: &str, name: &str) -> Result<(), ServiceError> {
        self.registry.register_project(id, name)?;
        self.journal
            .append(&format!("Project {id} named {name} added."))?;
        info!("event=register_project module=service status=ok id={id}");
        Ok(())
    }

    /// Allocates a resource to a project.
    ///
    /// # Contract
    /// - Both ids must resolve; there is no state guard, so allocation is
    ///   permitted from `Idle`, `InUse`, and `UnderMaintenance` alike.
    /// - Re-allocating a resource moves its back-reference to the new
    ///   project while the old project's list keeps its stale entry.
    /// - Allocating the same pair twice appends a second list entry.
    pub fn allocate(&mut self, resource_id: &str, project_id: &str) -> Result<(), ServiceError> {
        let project_name = self.registry.project(project_id)?.name.clone();
        self.registry
            .resource_mut(resource_id)?
            .allocate_to(project_id.to_string());
        self.registry
            .project_mut(project_id)?
            .record_allocation(resource_id.to_string());
        self.journal.append(&format!(
            "Resource {resource_id} allocated to project {project_name}"
        ))?;
        info!("event=allocate module=service status=ok resource={resource_id} project={project_id}");
        Ok(())
    }

    /// Marks a resource in use without creating a project association.
    pub fn mark_in_use(&mut self, resource_id: &str) -> Result<(), ServiceError> {
        self.registry.resource_mut(resource_id)?.mark_in_use();
        self.journal
            .append(&format!("Resource {resource_id} is now in use."))?;
        info!("event=mark_in_use module=service status=ok id={resource_id}");
        Ok(())
    }

    /// Requests maintenance for a resource.
    ///
    /// # Contract
    /// - Equipment moves to `UnderMaintenance` and one record is journaled.
    /// - A worker is reported as `NotEligible` with no state change and no
    ///   journal record; ineligibility is an outcome, not an error.
    pub fn maintain(&mut self, resource_id: &str) -> Result<MaintainOutcome, ServiceError> {
        let resource = self.registry.resource_mut(resource_id)?;
        if !resource.maintainable() {
            warn!("event=maintain module=service status=ineligible id={resource_id}");
            return Ok(MaintainOutcome::NotEligible);
        }
        resource.begin_maintenance();
        self.journal
            .append(&format!("Resource {resource_id} is under maintenance."))?;
        info!("event=maintain module=service status=ok id={resource_id}");
        Ok(MaintainOutcome::UnderMaintenance)
    }

    /// Describes the current state of a resource.
    ///
    /// # Contract
    /// - Read-only; nothing is journaled.
    /// - Yields `"Idle"`, `"In Use"`, or `"under maintenance"`.
    /// - The allocating project is named only for `UnderMaintenance`; an
    ///   in-use resource never names its project.
    pub fn describe_state(&self, resource_id: &str) -> Result<String, ServiceError> {
        let resource = self.registry.resource(resource_id)?;
        let mut description = resource.state.phrase().to_string();
        if resource.state == ResourceState::UnderMaintenance {
            if let Some(project_id) = resource.project.as_deref() {
                if let Ok(project) = self.registry.project(project_id) {
                    description.push_str(&format!(" and allocated to project {}", project.name));
                }
            }
        }
        Ok(description)
    }
}
