use http::StatusCode;

use crate::error::{Error, Result};

/// What the server said when it refused an add/update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub message: String,
}

/// Result of an add/update call
///
/// A refused write is not an `Err`: TestRail validation failures are an
/// expected part of the conversation and the caller decides what they mean.
/// Transport problems still surface as `Err` from the facade method.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum WriteOutcome<T> {
    Success(T),
    Failure(ApiFailure),
}

impl<T> WriteOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, WriteOutcome::Success(_))
    }

    /// The written entity, discarding the failure details
    pub fn ok(self) -> Option<T> {
        match self {
            WriteOutcome::Success(value) => Some(value),
            WriteOutcome::Failure(_) => None,
        }
    }

    /// Get the failure, if any
    pub fn failure(&self) -> Option<&ApiFailure> {
        match self {
            WriteOutcome::Success(_) => None,
            WriteOutcome::Failure(failure) => Some(failure),
        }
    }

    /// Turn a failure into `Error::Api` for `?`-style callers
    pub fn into_result(self, url: impl Into<String>) -> Result<T> {
        match self {
            WriteOutcome::Success(value) => Ok(value),
            WriteOutcome::Failure(failure) => Err(Error::api(url, failure.status, failure.message)),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> WriteOutcome<U> {
        match self {
            WriteOutcome::Success(value) => WriteOutcome::Success(f(value)),
            WriteOutcome::Failure(failure) => WriteOutcome::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refused() -> WriteOutcome<i64> {
        WriteOutcome::Failure(ApiFailure {
            status: StatusCode::BAD_REQUEST,
            message: "Field :title is a required field.".to_string(),
        })
    }

    #[test]
    fn test_success_outcome() {
        let outcome = WriteOutcome::Success(7);
        assert!(outcome.is_success());
        assert!(outcome.failure().is_none());
        assert_eq!(outcome.map(|v| v * 2).ok(), Some(14));
    }

    #[test]
    fn test_failure_outcome() {
        let outcome = refused();
        assert!(!outcome.is_success());
        assert_eq!(outcome.failure().unwrap().status, StatusCode::BAD_REQUEST);
        assert_eq!(outcome.ok(), None);
    }

    #[test]
    fn test_into_result() {
        let err = refused().into_result("http://x/add_case/1").unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert!(err.to_string().contains("required field"));
        assert_eq!(WriteOutcome::Success(1).into_result("u").unwrap(), 1);
    }
}
