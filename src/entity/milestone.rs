use serde::{Deserialize, Serialize};

use super::{impl_entity, Entity, Project};
use crate::client::ServiceRef;
use crate::error::Result;

/// A milestone
///
/// Also used as the body of `add_milestone`; fill in `name` and whatever else
/// should be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub due_on: Option<i64>,
    pub start_on: Option<i64>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<i64>,
    pub url: Option<String>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(Milestone);

impl Milestone {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// The project this milestone belongs to
    pub fn project(&self) -> Result<Option<Project>> {
        match self.project_id {
            Some(project_id) => self.service()?.get_project(project_id),
            None => Ok(None),
        }
    }
}
