//! Typed TestRail operations
//!
//! One method per API call, grouped the way the TestRail API reference
//! groups them. Reads return `Result<Option<T>>`/`Result<Vec<T>>`, add and
//! update return a [`WriteOutcome`], deletes and closes return `Result<()>`
//! and fail hard when TestRail refuses.

use serde::Serialize;

use crate::client::TestRailService;
use crate::command::Command;
use crate::entity::{
    require_id, CaseField, CaseType, Config, ConfigGroup, Milestone, PlanEntry, Project, Section,
    TestCase, TestInstance, TestPlan, TestResult, TestResults, TestRun, TestSuite, User,
};
use crate::error::Result;
use crate::filter::{ApiFilter, ApiFilterValue, Params};
use crate::outcome::WriteOutcome;

#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct CompletionBody {
    is_completed: bool,
}

/// Parameters of `get_cases`: the project, then suite and section filters
/// when given (`> 0`), then the caller's filters in order
pub fn case_params(project_id: i64, suite_id: i64, section_id: i64, filters: &[ApiFilterValue]) -> Params {
    Params::id(project_id)
        .filter_id(ApiFilter::SuiteId, suite_id)
        .filter_id(ApiFilter::SectionId, section_id)
        .filters(filters)
}

// Cases

impl TestRailService {
    /// Get a test case by id (`C7` is id 7)
    pub fn get_test_case(&self, case_id: i64) -> Result<Option<TestCase>> {
        self.get_one(Command::GetCase, Params::id(case_id))
    }

    /// Cases of a project, narrowed by suite, section and extra filters
    ///
    /// A suite or section id `<= 0` means "not specified".
    pub fn get_test_cases(
        &self,
        project_id: i64,
        suite_id: i64,
        section_id: i64,
        filters: &[ApiFilterValue],
    ) -> Result<Vec<TestCase>> {
        self.get_list(
            Command::GetCases,
            case_params(project_id, suite_id, section_id, filters),
        )
    }

    /// Cases of a project running in single suite mode
    pub fn get_test_cases_single_suite_mode(
        &self,
        project_id: i64,
        section_id: i64,
        filters: &[ApiFilterValue],
    ) -> Result<Vec<TestCase>> {
        self.get_test_cases(project_id, -1, section_id, filters)
    }

    /// Cases of one section of a suite
    pub fn get_test_cases_in_section(
        &self,
        project_id: i64,
        suite_id: i64,
        section_id: i64,
    ) -> Result<Vec<TestCase>> {
        self.get_test_cases(project_id, suite_id, section_id, &[])
    }

    /// Create a case in a section
    pub fn add_test_case(&self, section_id: i64, case: &TestCase) -> Result<WriteOutcome<TestCase>> {
        self.post_for(Command::AddCase, Params::id(section_id), case)
    }

    /// Partially update a case: only the fields set on `case` are sent
    pub fn update_test_case(&self, case_id: i64, case: &TestCase) -> Result<WriteOutcome<TestCase>> {
        self.post_for(Command::UpdateCase, Params::id(case_id), case)
    }

    /// Delete a case, along with its results in active runs
    pub fn delete_test_case(&self, case_id: i64) -> Result<()> {
        self.post_id(Command::DeleteCase, case_id, "delete test case")
    }

    /// Custom case field definitions
    pub fn get_case_fields(&self) -> Result<Vec<CaseField>> {
        self.get_list(Command::GetCaseFields, Params::new())
    }

    /// Available case types
    pub fn get_case_types(&self) -> Result<Vec<CaseType>> {
        self.get_list(Command::GetCaseTypes, Params::new())
    }
}

// Configurations

impl TestRailService {
    /// Configuration groups of a project, each with its configurations
    pub fn get_configurations(&self, project_id: i64) -> Result<Vec<ConfigGroup>> {
        self.get_list(Command::GetConfigs, Params::id(project_id))
    }

    pub fn add_config_group(&self, project_id: i64, name: &str) -> Result<WriteOutcome<ConfigGroup>> {
        self.post_for(Command::AddConfigGroup, Params::id(project_id), &NameBody { name })
    }

    pub fn add_config(&self, config_group_id: i64, name: &str) -> Result<WriteOutcome<Config>> {
        self.post_for(Command::AddConfig, Params::id(config_group_id), &NameBody { name })
    }

    pub fn update_config_group(&self, config_group_id: i64, name: &str) -> Result<WriteOutcome<ConfigGroup>> {
        self.post_for(Command::UpdateConfigGroup, Params::id(config_group_id), &NameBody { name })
    }

    pub fn update_config(&self, config_id: i64, name: &str) -> Result<WriteOutcome<Config>> {
        self.post_for(Command::UpdateConfig, Params::id(config_id), &NameBody { name })
    }

    /// Delete a group and every configuration in it
    pub fn delete_config_group(&self, config_group_id: i64) -> Result<()> {
        self.post_id(Command::DeleteConfigGroup, config_group_id, "delete config group")
    }

    pub fn delete_config(&self, config_id: i64) -> Result<()> {
        self.post_id(Command::DeleteConfig, config_id, "delete config")
    }
}

// Milestones

impl TestRailService {
    pub fn get_milestone(&self, milestone_id: i64) -> Result<Option<Milestone>> {
        self.get_one(Command::GetMilestone, Params::id(milestone_id))
    }

    /// Milestones of a project, optionally only (un)completed ones
    pub fn get_milestones(&self, project_id: i64, is_completed: Option<bool>) -> Result<Vec<Milestone>> {
        let filters: Vec<_> = is_completed.map(ApiFilterValue::is_completed).into_iter().collect();
        self.get_list(
            Command::GetMilestones,
            Params::id(project_id).filters(&filters),
        )
    }

    pub fn add_milestone(&self, project_id: i64, milestone: &Milestone) -> Result<WriteOutcome<Milestone>> {
        self.post_for(Command::AddMilestone, Params::id(project_id), milestone)
    }

    /// Mark a milestone (un)completed
    pub fn update_milestone(&self, milestone_id: i64, is_completed: bool) -> Result<WriteOutcome<Milestone>> {
        self.post_for(
            Command::UpdateMilestone,
            Params::id(milestone_id),
            &CompletionBody { is_completed },
        )
    }

    pub fn delete_milestone(&self, milestone_id: i64) -> Result<()> {
        self.post_id(Command::DeleteMilestone, milestone_id, "delete milestone")
    }
}

// Plans

impl TestRailService {
    pub fn get_test_plan(&self, plan_id: i64) -> Result<Option<TestPlan>> {
        self.get_one(Command::GetPlan, Params::id(plan_id))
    }

    pub fn get_test_plans(&self, project_id: i64) -> Result<Vec<TestPlan>> {
        self.get_list(Command::GetPlans, Params::id(project_id))
    }

    pub fn add_test_plan(&self, project_id: i64, plan: &TestPlan) -> Result<WriteOutcome<TestPlan>> {
        self.post_for(Command::AddPlan, Params::id(project_id), plan)
    }

    /// Add one or more runs (one per configuration) to a plan
    pub fn add_test_plan_entry(&self, plan_id: i64, entry: &PlanEntry) -> Result<WriteOutcome<PlanEntry>> {
        self.post_for(Command::AddPlanEntry, Params::id(plan_id), entry)
    }

    /// Close (archive) a plan and its runs
    pub fn close_test_plan(&self, plan_id: i64) -> Result<()> {
        self.post_id(Command::ClosePlan, plan_id, "close test plan")
    }

    pub fn delete_test_plan(&self, plan_id: i64) -> Result<()> {
        self.post_id(Command::DeletePlan, plan_id, "delete test plan")
    }
}

// Projects

impl TestRailService {
    pub fn get_project(&self, project_id: i64) -> Result<Option<Project>> {
        self.get_one(Command::GetProject, Params::id(project_id))
    }

    /// Every project visible to the configured user
    pub fn get_projects(&self) -> Result<Vec<Project>> {
        self.get_list(Command::GetProjects, Params::new())
    }

    /// First project whose name matches exactly (case-sensitive)
    pub fn get_project_by_name(&self, name: &str) -> Result<Option<Project>> {
        Ok(self
            .get_projects()?
            .into_iter()
            .find(|project| project.has_name(name)))
    }
}

// Results

impl TestRailService {
    /// The most recent result of a test
    pub fn get_test_result(&self, test_id: i64) -> Result<Option<TestResult>> {
        Ok(self
            .get_test_results(test_id, 1)?
            .and_then(|results| results.into_iter().next()))
    }

    /// Up to `limit` results of a test, most recent first
    ///
    /// `None` when the test has no results yet.
    pub fn get_test_results(&self, test_id: i64, limit: u32) -> Result<Option<Vec<TestResult>>> {
        let results: Vec<TestResult> = self.get_list(
            Command::GetResults,
            Params::id(test_id).filter(ApiFilter::Limit, limit),
        )?;
        Ok(if results.is_empty() { None } else { Some(results) })
    }

    /// Every result of a test, most recent first
    pub fn get_all_test_results(&self, test_id: i64) -> Result<Vec<TestResult>> {
        self.get_list(Command::GetResults, Params::id(test_id))
    }

    /// Results for one case inside a run
    pub fn get_results_for_case(&self, run_id: i64, case_id: i64) -> Result<Vec<TestResult>> {
        self.get_list(
            Command::GetResultsForCase,
            Params::id(run_id).segment(case_id),
        )
    }

    /// Results of a whole run, optionally filtered (status, creator, dates...)
    pub fn get_results_for_run(&self, run_id: i64, filters: &[ApiFilterValue]) -> Result<Vec<TestResult>> {
        self.get_list(
            Command::GetResultsForRun,
            Params::id(run_id).filters(filters),
        )
    }

    /// Record a result against a test
    pub fn add_test_result(&self, test_id: i64, result: &TestResult) -> Result<()> {
        self.post_or_fail(
            Command::AddResult,
            Params::id(test_id),
            Some(result),
            "add test result",
            test_id,
        )?;
        Ok(())
    }

    /// Record several results against tests of a run
    pub fn add_test_results(&self, run_id: i64, results: &TestResults) -> Result<()> {
        self.post_or_fail(
            Command::AddResults,
            Params::id(run_id),
            Some(results),
            "add test results",
            run_id,
        )?;
        Ok(())
    }
}

// Runs

impl TestRailService {
    pub fn get_test_run(&self, run_id: i64) -> Result<Option<TestRun>> {
        self.get_one(Command::GetRun, Params::id(run_id))
    }

    /// Runs of a project
    pub fn get_test_runs(&self, project_id: i64) -> Result<Vec<TestRun>> {
        self.get_list(Command::GetRuns, Params::id(project_id))
    }

    /// Create a run, then read it back so server-side fields are filled in
    pub fn add_test_run(&self, project_id: i64, run: &TestRun) -> Result<WriteOutcome<TestRun>> {
        let created = match self.post_for::<_, TestRun>(Command::AddRun, Params::id(project_id), run)? {
            WriteOutcome::Success(created) => created,
            failure => return Ok(failure),
        };

        let fetched = match created.id {
            Some(run_id) => self.get_test_run(run_id)?,
            None => None,
        };
        Ok(WriteOutcome::Success(fetched.unwrap_or(created)))
    }

    pub fn update_test_run(&self, run_id: i64, run: &TestRun) -> Result<WriteOutcome<TestRun>> {
        self.post_for(Command::UpdateRun, Params::id(run_id), run)
    }

    /// Close (archive) a run; fails with the run id and the reason phrase
    pub fn close_test_run(&self, run: &TestRun) -> Result<()> {
        let run_id = require_id(run.id, "test run")?;
        self.post_or_fail(
            Command::CloseRun,
            Params::id(run_id),
            Some(run),
            "close test run",
            run_id,
        )?;
        Ok(())
    }

    pub fn delete_test_run(&self, run_id: i64) -> Result<()> {
        self.post_id(Command::DeleteRun, run_id, "delete test run")
    }
}

// Sections

impl TestRailService {
    pub fn get_section(&self, section_id: i64) -> Result<Option<Section>> {
        self.get_one(Command::GetSection, Params::id(section_id))
    }

    /// Sections of a suite; `suite_id <= 0` for single suite projects
    pub fn get_sections(&self, project_id: i64, suite_id: i64) -> Result<Vec<Section>> {
        self.get_list(
            Command::GetSections,
            Params::id(project_id).filter_id(ApiFilter::SuiteId, suite_id),
        )
    }

    /// Create a section; set `suite_id` (and `parent_id` for nesting) on the body
    pub fn add_section(&self, project_id: i64, section: &Section) -> Result<WriteOutcome<Section>> {
        self.post_for(Command::AddSection, Params::id(project_id), section)
    }

    pub fn delete_section(&self, section_id: i64) -> Result<()> {
        self.post_id(Command::DeleteSection, section_id, "delete section")
    }
}

// Suites, tests and users

impl TestRailService {
    pub fn get_test_suite(&self, suite_id: i64) -> Result<Option<TestSuite>> {
        self.get_one(Command::GetSuite, Params::id(suite_id))
    }

    pub fn get_test_suites(&self, project_id: i64) -> Result<Vec<TestSuite>> {
        self.get_list(Command::GetSuites, Params::id(project_id))
    }

    pub fn get_test(&self, test_id: i64) -> Result<Option<TestInstance>> {
        self.get_one(Command::GetTest, Params::id(test_id))
    }

    /// Tests (case instances) of a run
    pub fn get_tests(&self, run_id: i64) -> Result<Vec<TestInstance>> {
        self.get_list(Command::GetTests, Params::id(run_id))
    }

    pub fn get_user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        self.get_one(Command::GetUser, Params::id(user_id))
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_one(
            Command::GetUserByEmail,
            Params::new().filters(&[ApiFilterValue::text(ApiFilter::Email, email)]),
        )
    }

    pub fn get_users(&self) -> Result<Vec<User>> {
        self.get_list(Command::GetUsers, Params::new())
    }
}
