use serde::{Deserialize, Serialize};

use super::{Entity, TestRun};
use crate::client::ServiceRef;

/// A test plan: a group of runs, possibly over several configurations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub assignedto_id: Option<i64>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<i64>,
    pub passed_count: Option<i64>,
    pub blocked_count: Option<i64>,
    pub untested_count: Option<i64>,
    pub retest_count: Option<i64>,
    pub failed_count: Option<i64>,
    pub created_on: Option<i64>,
    pub created_by: Option<i64>,
    pub url: Option<String>,
    pub entries: Option<Vec<PlanEntry>>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl TestPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Every run of every entry, in entry order
    pub fn runs(&self) -> impl Iterator<Item = &TestRun> {
        self.entries
            .iter()
            .flatten()
            .flat_map(|entry| entry.runs.iter().flatten())
    }
}

impl Entity for TestPlan {
    fn attach(&mut self, service: ServiceRef) {
        for entry in self.entries.iter_mut().flatten() {
            entry.attach(service.clone());
        }
        self.service = Some(service);
    }

    fn service_ref(&self) -> Option<&ServiceRef> {
        self.service.as_ref()
    }
}

/// One entry of a plan: a suite, run once per configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub id: Option<String>,
    pub suite_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub assignedto_id: Option<i64>,
    pub include_all: Option<bool>,
    pub case_ids: Option<Vec<i64>>,
    pub config_ids: Option<Vec<i64>>,
    pub runs: Option<Vec<TestRun>>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl PlanEntry {
    pub fn new(suite_id: i64) -> Self {
        Self {
            suite_id: Some(suite_id),
            include_all: Some(true),
            ..Default::default()
        }
    }
}

impl Entity for PlanEntry {
    fn attach(&mut self, service: ServiceRef) {
        for run in self.runs.iter_mut().flatten() {
            run.attach(service.clone());
        }
        self.service = Some(service);
    }

    fn service_ref(&self) -> Option<&ServiceRef> {
        self.service.as_ref()
    }
}
