//! testrail-client - a typed client for the TestRail v2 REST API
//!
//! Maps TestRail resources (projects, suites, cases, runs, plans, results...)
//! to serde structs and every API call to a blocking method on
//! [`TestRailService`].
//!
//! ## Features
//!
//! - **Typed entities** that remember the service they came from, so
//!   `project.runs()?` or `run.tests()?` just work
//! - **Partial updates**: unset fields are never sent
//! - **Rate limiting** handled for writes: a 429 is retried after the
//!   server's `Retry-After`
//! - **Explicit outcomes**: reads fail with [`Error::Api`], refused
//!   add/update calls come back as [`WriteOutcome::Failure`], refused
//!   deletes and closes fail with [`Error::Rejected`]
//! - **Pluggable transport** for testing or custom HTTP stacks
//!
//! ## Quick Start
//!
//! ```no_run
//! use testrail_client::{TestRailService, TestResult};
//!
//! fn main() -> Result<(), testrail_client::Error> {
//!     let service = TestRailService::new("acme", "qa@acme.com", "api-key")?;
//!
//!     let run = service.get_test_run(81)?.expect("run exists");
//!     for test in run.tests()? {
//!         if let Some(id) = test.id {
//!             service.add_test_result(id, &TestResult::new(1, Some("passed in CI")))?;
//!         }
//!     }
//!     run.close()?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod codec;
pub mod command;
pub mod endpoint;
pub mod entity;
pub mod error;
pub mod filter;
pub mod outcome;
pub mod request;
pub mod resources;
pub mod response;
pub mod retry;
pub mod timeout;
pub mod transport;

// Re-export main types for convenience
pub use auth::Credentials;
pub use client::{ServiceRef, TestRailService, TestRailServiceBuilder};
pub use command::Command;
pub use endpoint::Endpoint;
pub use entity::*;
pub use error::{Error, Result};
pub use filter::{ApiFilter, ApiFilterValue, Params};
pub use outcome::{ApiFailure, WriteOutcome};
pub use request::Request;
pub use response::Response;
pub use retry::{RetryPolicy, Sleeper, ThreadSleeper};
pub use timeout::TimeoutConfig;
pub use transport::{HttpTransport, Transport};

// Re-export common HTTP types
pub use http::{HeaderMap, Method, StatusCode};

// Re-export JSON types
pub use serde_json::{Map as JsonMap, Value as JsonValue};
