use http::Method;
use reqwest::blocking::Client as ReqwestClient;

use crate::error::{Error, Result};
use crate::request::Request;
use crate::response::Response;
use crate::timeout::TimeoutConfig;

/// Transport trait for HTTP operations
///
/// Every call is a complete, blocking round trip: the response body has been
/// read and the connection released by the time it returns. Implementations
/// must be shareable across threads; the service holds one behind an `Arc`.
pub trait Transport: Send + Sync {
    /// Send a GET request
    fn get(&self, request: &Request) -> Result<Response>;

    /// Send a POST request
    fn post(&self, request: &Request) -> Result<Response>;

    /// Dispatch on the request method
    fn send(&self, request: &Request) -> Result<Response> {
        let method = request.method();
        if *method == Method::GET {
            self.get(request)
        } else if *method == Method::POST {
            self.post(request)
        } else {
            Err(Error::invalid_request(format!(
                "TestRail only accepts GET and POST, got {}",
                method
            )))
        }
    }

    /// Get the transport name/type
    fn name(&self) -> &str {
        "custom"
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, request: &Request) -> Result<Response> {
        (**self).get(request)
    }

    fn post(&self, request: &Request) -> Result<Response> {
        (**self).post(request)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Default transport using reqwest's blocking client
///
/// A fresh client is built for each call and dropped with it, so no pooled
/// connection outlives a request.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    timeout_config: TimeoutConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(timeout_config: TimeoutConfig) -> Self {
        if !timeout_config.has_timeout() {
            tracing::warn!("HTTP transport has no timeout, a stalled server blocks the caller indefinitely");
        }
        Self { timeout_config }
    }

    /// Get the timeout configuration
    pub fn timeout_config(&self) -> &TimeoutConfig {
        &self.timeout_config
    }

    fn client(&self) -> Result<ReqwestClient> {
        self.timeout_config
            .apply_to_builder(ReqwestClient::builder())
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))
    }

    fn execute(&self, request: &Request) -> Result<Response> {
        let client = self.client()?;
        let mut builder = client
            .request(request.method().clone(), request.url())
            .headers(request.headers().clone());
        if let Some(body) = request.body_bytes() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().map_err(|e| self.map_error(request.url(), e))?;
        Response::from_blocking(response)
    }

    fn map_error(&self, url: &str, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::timeout(url, self.timeout_config.effective_timeout())
        } else {
            Error::connection(url, error.to_string())
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &Request) -> Result<Response> {
        self.execute(request)
    }

    fn post(&self, request: &Request) -> Result<Response> {
        self.execute(request)
    }

    fn name(&self) -> &str {
        "reqwest-blocking"
    }
}
