//! In-memory registry owning every resource and project.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::project::{Project, ProjectId};
use crate::model::resource::{Resource, ResourceId, ResourceKind};

// Ids arrive as whitespace-delimited console tokens, so a valid id is one
// non-empty run of non-whitespace characters.
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+$").expect("valid id regex"));

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registration/lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Id is empty or contains whitespace.
    InvalidId(String),
    /// Id already registered in the target map.
    DuplicateId(String),
    /// No entity registered under this id.
    NotFound(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "id is invalid: `{value}`"),
            Self::DuplicateId(value) => write!(f, "id already registered: {value}"),
            Self::NotFound(value) => write!(f, "no entity registered under id: {value}"),
        }
    }
}

impl Error for RegistryError {}

/// Aggregate root for all registered entities.
///
/// Resource and project ids live in independent spaces; the same string may
/// name one of each without conflict. Entities are never removed once
/// registered, so every journal record stays traceable to live state.
#[derive(Debug, Default)]
pub struct Registry {
    resources: BTreeMap<ResourceId, Resource>,
    projects: BTreeMap<ProjectId, Project>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one resource in `Idle` with no allocation.
    pub fn register_resource(&mut self, id: &str, kind: ResourceKind) -> RegistryResult<()> {
        ensure_valid_id(id)?;
        if self.resources.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        self.resources.insert(id.to_string(), Resource::new(id, kind));
        Ok(())
    }

    /// Registers one empty project.
    pub fn register_project(&mut self, id: &str, name: &str) -> RegistryResult<()> {
        ensure_valid_id(id)?;
        if self.projects.contains_key(id) {
            return Err(RegistryError::DuplicateId(id.to_string()));
        }
        self.projects.insert(id.to_string(), Project::new(id, name));
        Ok(())
    }

    /// Returns one resource by id.
    pub fn resource(&self, id: &str) -> RegistryResult<&Resource> {
        self.resources
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Returns mutable access to one resource by id.
    pub fn resource_mut(&mut self, id: &str) -> RegistryResult<&mut Resource> {
        self.resources
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Returns one project by id.
    pub fn project(&self, id: &str) -> RegistryResult<&Project> {
        self.projects
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Returns mutable access to one project by id.
    pub fn project_mut(&mut self, id: &str) -> RegistryResult<&mut Project> {
        self.projects
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    /// Returns sorted resource ids.
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.resources.keys().cloned().collect()
    }

    /// Returns sorted project ids.
    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.projects.keys().cloned().collect()
    }
}

fn ensure_valid_id(value: &str) -> RegistryResult<()> {
    if ID_RE.is_match(value) {
        Ok(())
    } else {
        Err(RegistryError::InvalidId(value.to_string()))
    }
}
