//! Project and label records.
//!
//! Both are referenced by id from tasks. Deletion cascades in the external
//! store, so readers must treat unknown ids as absent.

use crate::model::task::{LabelId, ProjectId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Grouping container for tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Display color, e.g. `#808080`.
    #[serde(default)]
    pub color: String,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            color: String::new(),
        }
    }
}

/// Free-form tag attached to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: LabelId,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: String::new(),
        }
    }
}

/// Resolves a project name, treating dangling references as absent.
pub fn project_name<'a>(projects: &'a [Project], id: Option<ProjectId>) -> Option<&'a str> {
    let id = id?;
    projects
        .iter()
        .find(|project| project.id == id)
        .map(|project| project.name.as_str())
}
