//! Project domain model.

use serde::{Deserialize, Serialize};

use crate::model::resource::ResourceId;

/// Stable caller-assigned identifier for a project.
pub type ProjectId = String;

/// A project consuming allocated resources.
///
/// `resources` holds ids, not references; the registry owns the entities.
/// Insertion order is allocation order, and the list is a record of
/// allocations rather than a set: allocating the same resource twice
/// appends a second entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable id used for lookup.
    pub id: ProjectId,
    /// Free-text display name; may contain spaces.
    pub name: String,
    /// Allocated resource ids in allocation order.
    pub resources: Vec<ResourceId>,
}

impl Project {
    /// Creates a new project with no allocations.
    pub fn new(id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resources: Vec::new(),
        }
    }

    /// Records an allocation at the end of the ordered list.
    pub fn record_allocation(&mut self, resource_id: ResourceId) {
        self.resources.push(resource_id);
    }
}
