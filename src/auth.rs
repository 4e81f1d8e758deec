use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use http::HeaderValue;

use crate::error::Result;

/// Username/password pair for an API-enabled TestRail account
///
/// TestRail only speaks HTTP basic authentication on its API, so this is the
/// whole authentication story. The password may also be an API key generated
/// from the user's settings page.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create a new set of credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `TESTRAIL_USERNAME` / `TESTRAIL_PASSWORD`
    pub fn from_env() -> Option<Self> {
        match (std::env::var("TESTRAIL_USERNAME"), std::env::var("TESTRAIL_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(Self::new(username, password)),
            _ => None,
        }
    }

    /// Get the username
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Check if a username has been configured
    pub fn is_set(&self) -> bool {
        !self.username.is_empty()
    }

    /// base64 of `username:password`
    pub fn encoded(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        BASE64.encode(credentials.as_bytes())
    }

    /// Get the authorization header value
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.encoded())
    }

    /// The authorization header as a sensitive `HeaderValue`
    pub fn header_value(&self) -> Result<HeaderValue> {
        let mut value = self.authorization_header().parse::<HeaderValue>()?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
