use std::fmt;

/// A TestRail API operation and the path fragment that selects it
///
/// The fragment is what follows `index.php?/api/v2/` in the request URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Cases
    GetCase,
    GetCases,
    AddCase,
    UpdateCase,
    DeleteCase,

    // Case fields and types
    GetCaseFields,
    GetCaseTypes,

    // Configurations
    GetConfigs,
    AddConfigGroup,
    AddConfig,
    UpdateConfigGroup,
    UpdateConfig,
    DeleteConfigGroup,
    DeleteConfig,

    // Milestones
    GetMilestone,
    GetMilestones,
    AddMilestone,
    UpdateMilestone,
    DeleteMilestone,

    // Plans
    GetPlan,
    GetPlans,
    AddPlan,
    AddPlanEntry,
    ClosePlan,
    DeletePlan,

    // Projects
    GetProject,
    GetProjects,

    // Results
    GetResults,
    GetResultsForCase,
    GetResultsForRun,
    AddResult,
    AddResults,

    // Runs
    GetRun,
    GetRuns,
    AddRun,
    UpdateRun,
    CloseRun,
    DeleteRun,

    // Sections
    GetSection,
    GetSections,
    AddSection,
    DeleteSection,

    // Suites
    GetSuite,
    GetSuites,

    // Tests
    GetTest,
    GetTests,

    // Users
    GetUser,
    GetUserByEmail,
    GetUsers,
}

impl Command {
    /// Get the path fragment for this command
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::GetCase => "get_case",
            Command::GetCases => "get_cases",
            Command::AddCase => "add_case",
            Command::UpdateCase => "update_case",
            Command::DeleteCase => "delete_case",
            Command::GetCaseFields => "get_case_fields",
            Command::GetCaseTypes => "get_case_types",
            Command::GetConfigs => "get_configs",
            Command::AddConfigGroup => "add_config_group",
            Command::AddConfig => "add_config",
            Command::UpdateConfigGroup => "update_config_group",
            Command::UpdateConfig => "update_config",
            Command::DeleteConfigGroup => "delete_config_group",
            Command::DeleteConfig => "delete_config",
            Command::GetMilestone => "get_milestone",
            Command::GetMilestones => "get_milestones",
            Command::AddMilestone => "add_milestone",
            Command::UpdateMilestone => "update_milestone",
            Command::DeleteMilestone => "delete_milestone",
            Command::GetPlan => "get_plan",
            Command::GetPlans => "get_plans",
            Command::AddPlan => "add_plan",
            Command::AddPlanEntry => "add_plan_entry",
            Command::ClosePlan => "close_plan",
            Command::DeletePlan => "delete_plan",
            Command::GetProject => "get_project",
            Command::GetProjects => "get_projects",
            Command::GetResults => "get_results",
            Command::GetResultsForCase => "get_results_for_case",
            Command::GetResultsForRun => "get_results_for_run",
            Command::AddResult => "add_result",
            Command::AddResults => "add_results",
            Command::GetRun => "get_run",
            Command::GetRuns => "get_runs",
            Command::AddRun => "add_run",
            Command::UpdateRun => "update_run",
            Command::CloseRun => "close_run",
            Command::DeleteRun => "delete_run",
            Command::GetSection => "get_section",
            Command::GetSections => "get_sections",
            Command::AddSection => "add_section",
            Command::DeleteSection => "delete_section",
            Command::GetSuite => "get_suite",
            Command::GetSuites => "get_suites",
            Command::GetTest => "get_test",
            Command::GetTests => "get_tests",
            Command::GetUser => "get_user",
            Command::GetUserByEmail => "get_user_by_email",
            Command::GetUsers => "get_users",
        }
    }

    /// Member holding the items when TestRail answers a list command with a
    /// paginated object (`{"offset":0,"limit":250,...,"cases":[...]}`)
    ///
    /// Older instances answer with a bare array, which is always accepted.
    pub fn list_key(&self) -> Option<&'static str> {
        match self {
            Command::GetCases => Some("cases"),
            Command::GetMilestones => Some("milestones"),
            Command::GetPlans => Some("plans"),
            Command::GetProjects => Some("projects"),
            Command::GetResults | Command::GetResultsForCase | Command::GetResultsForRun => {
                Some("results")
            }
            Command::GetRuns => Some("runs"),
            Command::GetSections => Some("sections"),
            Command::GetTests => Some("tests"),
            Command::GetUsers => Some("users"),
            _ => None,
        }
    }

    /// Check if this command is sent as a POST
    pub fn is_write(&self) -> bool {
        !self.as_str().starts_with("get_")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
