use serde::{Deserialize, Serialize};

use super::{impl_entity, require_id, Entity, TestInstance};
use crate::client::ServiceRef;
use crate::error::Result;

/// A test run
///
/// Doubles as the body of `add_run`/`update_run`; leave server-computed
/// fields (`*_count`, `url`, ...) unset there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub id: Option<i64>,
    pub suite_id: Option<i64>,
    pub project_id: Option<i64>,
    pub plan_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub assignedto_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub include_all: Option<bool>,
    pub case_ids: Option<Vec<i64>>,
    pub config: Option<String>,
    pub config_ids: Option<Vec<i64>>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<i64>,
    pub passed_count: Option<i64>,
    pub blocked_count: Option<i64>,
    pub untested_count: Option<i64>,
    pub retest_count: Option<i64>,
    pub failed_count: Option<i64>,
    pub created_on: Option<i64>,
    pub created_by: Option<i64>,
    pub refs: Option<String>,
    pub url: Option<String>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(TestRun);

impl TestRun {
    /// A run body over a suite, including every case
    pub fn new(suite_id: i64, name: impl Into<String>) -> Self {
        Self {
            suite_id: Some(suite_id),
            name: Some(name.into()),
            include_all: Some(true),
            ..Default::default()
        }
    }

    /// The tests (case instances) of this run
    pub fn tests(&self) -> Result<Vec<TestInstance>> {
        self.service()?.get_tests(require_id(self.id, "test run")?)
    }

    /// Close (archive) this run
    pub fn close(&self) -> Result<()> {
        self.service()?.close_test_run(self)
    }
}
