//! Typed TestRail resources
//!
//! Every record here is a plain serde struct whose fields are all optional:
//! TestRail omits members freely depending on version and project settings,
//! and the same struct doubles as the body of add/update calls where only the
//! fields that are set get sent.
//!
//! Entities handed out by [`TestRailService`](crate::TestRailService) carry a
//! weak [`ServiceRef`] back to it so they can fetch related resources
//! (`run.tests()`, `project.suites()`, ...) without the caller threading the
//! service around.

use serde::de::DeserializeOwned;

use crate::client::{ServiceRef, TestRailService};
use crate::error::{Error, Result};

/// Implements [`Entity`] for structs with a `service: Option<ServiceRef>` field
macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::entity::Entity for $ty {
            fn attach(&mut self, service: $crate::client::ServiceRef) {
                self.service = Some(service);
            }

            fn service_ref(&self) -> Option<&$crate::client::ServiceRef> {
                self.service.as_ref()
            }
        }
    )+};
}

pub(crate) use impl_entity;

mod case;
mod case_field;
mod config;
mod milestone;
mod plan;
mod project;
mod result;
mod run;
mod section;
mod suite;
mod user;

pub use case::TestCase;
pub use case_field::{CaseField, CaseType};
pub use config::{Config, ConfigGroup};
pub use milestone::Milestone;
pub use plan::{PlanEntry, TestPlan};
pub use project::{Project, SuiteMode};
pub use result::{status, TestResult, TestResults};
pub use run::TestRun;
pub use section::Section;
pub use suite::TestSuite;
pub use test::TestInstance;
pub use user::User;

/// A resource the service can return
pub trait Entity: DeserializeOwned {
    /// Point the entity (and anything nested in it) at its service
    fn attach(&mut self, service: ServiceRef);

    /// Get the back-reference, if attached
    fn service_ref(&self) -> Option<&ServiceRef>;

    /// The live service this entity came from
    fn service(&self) -> Result<TestRailService> {
        self.service_ref()
            .and_then(ServiceRef::upgrade)
            .ok_or(Error::Detached)
    }
}

/// The id of an entity that must already exist server side
pub(crate) fn require_id(id: Option<i64>, what: &str) -> Result<i64> {
    id.ok_or_else(|| Error::invalid_request(format!("{} has no id", what)))
}
