use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::impl_entity;
use crate::client::ServiceRef;

/// Built-in TestRail status ids
pub mod status {
    pub const PASSED: i64 = 1;
    pub const BLOCKED: i64 = 2;
    pub const UNTESTED: i64 = 3;
    pub const RETEST: i64 = 4;
    pub const FAILED: i64 = 5;
}

/// One result recorded against a test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub id: Option<i64>,
    pub test_id: Option<i64>,
    /// Only meaningful in `add_results_for_cases` style bodies
    pub case_id: Option<i64>,
    pub status_id: Option<i64>,
    pub comment: Option<String>,
    pub version: Option<String>,
    pub elapsed: Option<String>,
    pub defects: Option<String>,
    pub assignedto_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_on: Option<i64>,

    #[serde(flatten)]
    pub custom_fields: Map<String, Value>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(TestResult);

impl TestResult {
    /// A result body with a status and an optional comment
    pub fn new(status_id: i64, comment: Option<&str>) -> Self {
        Self {
            status_id: Some(status_id),
            comment: comment.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn passed(&self) -> bool {
        self.status_id == Some(status::PASSED)
    }

    pub fn failed(&self) -> bool {
        self.status_id == Some(status::FAILED)
    }
}

/// Body of `add_results`: several results for tests of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestResults {
    pub results: Vec<TestResult>,
}

impl TestResults {
    pub fn new(results: Vec<TestResult>) -> Self {
        Self { results }
    }

    /// Add a result for the given test
    pub fn push(&mut self, test_id: i64, mut result: TestResult) {
        result.test_id = Some(test_id);
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
