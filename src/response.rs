use http::{HeaderMap, HeaderValue, StatusCode};

use crate::error::{Error, Result};

/// HTTP response representation
///
/// The body is read to the end before a `Response` exists, so holding one
/// never keeps a connection open.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Response {
    /// Create a response from its parts
    pub fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A response with a status and body and no headers
    pub fn with_body(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, HeaderMap::new(), body.into())
    }

    /// Drain a blocking reqwest response
    pub fn from_blocking(response: reqwest::blocking::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().to_string();
        let body = response
            .bytes()
            .map_err(|e| Error::connection(url, format!("failed to read response body: {}", e)))?;
        Ok(Self::new(status, headers, body.to_vec()))
    }

    /// Add a header, builder style
    pub fn header(mut self, name: &'static str, value: &str) -> Result<Self> {
        self.headers.insert(name, value.parse::<HeaderValue>()?);
        Ok(self)
    }

    /// Get the HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The canonical reason phrase for the status code
    ///
    /// reqwest does not expose the phrase the server actually sent, so this is
    /// the standard one (`"Unknown Status"` for unregistered codes).
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown Status")
    }

    /// Get the response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get a header as a string, if present and printable
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check for the one status TestRail uses for success
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Check if the server asked us to slow down
    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }

    /// Get the raw body
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get the body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_accessors() {
        let response = Response::with_body(StatusCode::OK, r#"{"id":1}"#)
            .header("content-type", "application/json")
            .unwrap();
        assert!(response.is_ok());
        assert!(!response.is_rate_limited());
        assert_eq!(response.reason(), "OK");
        assert_eq!(response.header_str("Content-Type"), Some("application/json"));
        assert_eq!(response.text(), r#"{"id":1}"#);
    }

    #[test]
    fn test_rate_limited_response() {
        let response = Response::with_body(StatusCode::TOO_MANY_REQUESTS, Vec::new())
            .header("retry-after", "3")
            .unwrap();
        assert!(response.is_rate_limited());
        assert_eq!(response.reason(), "Too Many Requests");
        assert_eq!(response.header_str("Retry-After"), Some("3"));
    }

    #[test]
    fn test_only_200_is_ok() {
        assert!(!Response::with_body(StatusCode::CREATED, "").is_ok());
        assert!(!Response::with_body(StatusCode::NO_CONTENT, "").is_ok());
    }

    #[test]
    fn test_unregistered_status_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(Response::with_body(status, "").reason(), "Unknown Status");
    }
}
