//! Resource domain model.
//!
//! # Responsibility
//! - Define the canonical allocatable-resource record and its state
//!   vocabulary.
//! - Provide the lifecycle helpers the allocation service mutates through.
//!
//! # Invariants
//! - `id` is stable, caller-assigned, and never reused for another resource.
//! - `state == Idle` implies `project == None`.
//! - `InUse` and `UnderMaintenance` may carry a project back-reference but
//!   need not; maintenance can happen without a prior allocation.

use serde::{Deserialize, Serialize};

use crate::model::project::ProjectId;

/// Stable caller-assigned identifier for a resource.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ResourceId = String;

/// Category of an allocatable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Human crew member.
    Worker,
    /// Physical equipment; the only kind eligible for maintenance.
    Equipment,
}

impl ResourceKind {
    /// Lowercase label used in journal records and console output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Equipment => "equipment",
        }
    }
}

/// Allocation/maintenance state of a resource.
///
/// `Idle` is the initial state. No operation returns a resource to `Idle`;
/// the system has no release path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceState {
    /// Registered but never used.
    Idle,
    /// Allocated or explicitly marked in use.
    InUse,
    /// Taken out of service for maintenance (equipment only).
    UnderMaintenance,
}

impl ResourceState {
    /// Console phrase for this state.
    ///
    /// The uneven casing is part of the shell's established output contract.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::InUse => "In Use",
            Self::UnderMaintenance => "under maintenance",
        }
    }
}

/// Canonical record for one allocatable resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Stable id used for lookup and journaling.
    pub id: ResourceId,
    /// Worker or equipment.
    pub kind: ResourceKind,
    /// Current allocation/maintenance state.
    pub state: ResourceState,
    /// Back-reference to the allocating project, if any.
    pub project: Option<ProjectId>,
}

impl Resource {
    /// Creates a new resource in `Idle` with no allocation.
    pub fn new(id: impl Into<ResourceId>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            state: ResourceState::Idle,
            project: None,
        }
    }

    /// Points this resource at `project` and marks it in use.
    ///
    /// Overwrites any existing back-reference; the previous project's
    /// forward list is not this record's concern.
    pub fn allocate_to(&mut self, project: ProjectId) {
        self.state = ResourceState::InUse;
        self.project = Some(project);
    }

    /// Marks the resource in use without touching any allocation.
    pub fn mark_in_use(&mut self) {
        self.state = ResourceState::InUse;
    }

    /// Returns whether this resource may enter maintenance.
    pub fn maintainable(&self) -> bool {
        self.kind == ResourceKind::Equipment
    }

    /// Moves the resource under maintenance.
    ///
    /// Callers must check `maintainable()` first; this helper does not
    /// re-check the kind.
    pub fn begin_maintenance(&mut self) {
        self.state = ResourceState::UnderMaintenance;
    }
}
