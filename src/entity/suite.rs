use serde::{Deserialize, Serialize};

use super::{impl_entity, require_id, Entity, Section, TestCase};
use crate::client::ServiceRef;
use crate::error::Result;

/// A test suite (a container of sections and cases)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub is_baseline: Option<bool>,
    pub is_master: Option<bool>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<i64>,
    pub url: Option<String>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(TestSuite);

impl TestSuite {
    /// Sections of this suite
    pub fn sections(&self) -> Result<Vec<Section>> {
        self.service()?.get_sections(
            require_id(self.project_id, "suite project")?,
            require_id(self.id, "suite")?,
        )
    }

    /// Every case in this suite
    pub fn cases(&self) -> Result<Vec<TestCase>> {
        self.service()?.get_test_cases(
            require_id(self.project_id, "suite project")?,
            require_id(self.id, "suite")?,
            -1,
            &[],
        )
    }
}
