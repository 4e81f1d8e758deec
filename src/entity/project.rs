use serde::{Deserialize, Serialize};

use super::{impl_entity, require_id, Entity, Milestone, TestPlan, TestRun, TestSuite};
use crate::client::ServiceRef;
use crate::error::Result;

/// How a project organises its test cases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteMode {
    SingleSuite,
    SingleSuiteWithBaselines,
    MultipleSuites,
}

impl SuiteMode {
    /// Map TestRail's numeric `suite_mode`
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SuiteMode::SingleSuite),
            2 => Some(SuiteMode::SingleSuiteWithBaselines),
            3 => Some(SuiteMode::MultipleSuites),
            _ => None,
        }
    }
}

/// A TestRail project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub announcement: Option<String>,
    pub show_announcement: Option<bool>,
    pub is_completed: Option<bool>,
    pub completed_on: Option<i64>,
    pub suite_mode: Option<u8>,
    pub url: Option<String>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(Project);

impl Project {
    pub fn suite_mode(&self) -> Option<SuiteMode> {
        self.suite_mode.and_then(SuiteMode::from_code)
    }

    /// Exact, case-sensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Suites of this project
    pub fn suites(&self) -> Result<Vec<TestSuite>> {
        self.service()?.get_test_suites(require_id(self.id, "project")?)
    }

    /// Active and completed runs of this project
    pub fn runs(&self) -> Result<Vec<TestRun>> {
        self.service()?.get_test_runs(require_id(self.id, "project")?)
    }

    /// Plans of this project
    pub fn plans(&self) -> Result<Vec<TestPlan>> {
        self.service()?.get_test_plans(require_id(self.id, "project")?)
    }

    /// Milestones of this project, optionally filtered by completion
    pub fn milestones(&self, is_completed: Option<bool>) -> Result<Vec<Milestone>> {
        self.service()?
            .get_milestones(require_id(self.id, "project")?, is_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_project_decodes_suite_mode() {
        let project: Project = serde_json::from_str(
            r#"{"id":1,"name":"Datahub","suite_mode":3,"is_completed":false,"url":"https://acme.testrail.com/index.php?/projects/overview/1"}"#,
        )
        .unwrap();
        assert_eq!(project.suite_mode(), Some(SuiteMode::MultipleSuites));
        assert!(project.has_name("Datahub"));
        assert!(!project.has_name("datahub"));
    }

    #[test]
    fn test_detached_project_cannot_load_suites() {
        let project = Project {
            id: Some(1),
            ..Default::default()
        };
        assert!(matches!(project.suites(), Err(Error::Detached)));
    }

    #[test]
    fn test_unknown_suite_mode() {
        assert_eq!(SuiteMode::from_code(9), None);
        assert_eq!(SuiteMode::from_code(1), Some(SuiteMode::SingleSuite));
    }
}
