//! Read-only snapshot access to the external task store.

use crate::model::catalog::{Label, Project};
use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Snapshot accessors supplied by the host's task store.
///
/// Implementations must return a consistent view per call; the engine never
/// subscribes to changes.
pub trait SnapshotSource {
    fn list_tasks(&self) -> Vec<Task>;
    fn list_projects(&self) -> Vec<Project>;
    fn list_labels(&self) -> Vec<Label>;
}

/// Owned in-memory snapshot, also the JSON import shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub labels: Vec<Label>,
}

/// Snapshot decoding failure.
#[derive(Debug)]
pub enum SnapshotError {
    Json(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid snapshot json: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>, projects: Vec<Project>, labels: Vec<Label>) -> Self {
        Self {
            tasks,
            projects,
            labels,
        }
    }

    /// Decodes a snapshot document; missing collections default to empty.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }
}

impl SnapshotSource for Snapshot {
    fn list_tasks(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    fn list_projects(&self) -> Vec<Project> {
        self.projects.clone()
    }

    fn list_labels(&self) -> Vec<Label> {
        self.labels.clone()
    }
}
