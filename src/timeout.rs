use std::time::Duration;

use reqwest::blocking::ClientBuilder;

/// Timeout settings handed to the transport
///
/// The client never cancels a call on its own; these values are the only way
/// for a caller to bound how long a facade method may block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Overall request timeout (connect + send + read)
    pub timeout: Option<Duration>,
    /// Connection establishment timeout
    pub connect_timeout: Option<Duration>,
}

impl TimeoutConfig {
    /// Create a new timeout configuration with an overall timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            connect_timeout: None,
        }
    }

    /// Set the overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Get the overall request timeout
    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Get the connection timeout
    pub fn get_connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    /// Check if any timeout is configured
    pub fn has_timeout(&self) -> bool {
        self.timeout.is_some() || self.connect_timeout.is_some()
    }

    /// The value reported when a call times out
    pub fn effective_timeout(&self) -> Duration {
        self.timeout
            .or(self.connect_timeout)
            .unwrap_or(Duration::ZERO)
    }

    /// Apply the configuration to a blocking reqwest builder
    pub fn apply_to_builder(&self, builder: ClientBuilder) -> ClientBuilder {
        // reqwest's blocking client defaults to 30s; None must mean unlimited
        let builder = builder.timeout(self.timeout);
        match self.connect_timeout {
            Some(timeout) => builder.connect_timeout(timeout),
            None => builder,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
        }
    }
}

/// Predefined timeout configurations
impl TimeoutConfig {
    /// Create a timeout configuration suitable for quick requests
    pub fn quick() -> Self {
        Self {
            timeout: Some(Duration::from_secs(5)),
            connect_timeout: Some(Duration::from_secs(2)),
        }
    }

    /// Create a timeout configuration suitable for bulk endpoints on large projects
    pub fn long() -> Self {
        Self {
            timeout: Some(Duration::from_secs(300)),
            connect_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Create a timeout configuration with no timeouts (unlimited)
    pub fn unlimited() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
        }
    }
}
