//! JSON encoding and decoding of TestRail payloads
//!
//! Writes drop every null member so that a partially filled entity only sends
//! the fields that were set (TestRail treats a present `null` as "clear this
//! field"). Reads ignore members they do not know.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Error payload TestRail sends alongside non-200 statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub error: Option<String>,
}

/// Encode a value as a JSON body with nulls omitted
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut value = serde_json::to_value(value)?;
    strip_nulls(&mut value);
    Ok(serde_json::to_vec(&value)?)
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, member| !member.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// Decode a single entity; an empty or `null` body is `None`
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<Option<T>> {
    if is_blank(bytes) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(bytes)?)
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// `_links.next` of a paginated envelope, `None` on the last page
    pub next: Option<String>,
}

/// Decode one page of a list, keeping the server's order
///
/// Accepts a bare array, which is always the only page, or a paginated object
/// whose `envelope` member holds the array and whose `_links.next` points at
/// the next page. An empty or `null` body is an empty last page.
pub fn decode_page<T: DeserializeOwned>(bytes: &[u8], envelope: Option<&str>) -> Result<Page<T>> {
    if is_blank(bytes) {
        return Ok(Page { items: Vec::new(), next: None });
    }
    match serde_json::from_slice::<Value>(bytes)? {
        Value::Null => Ok(Page { items: Vec::new(), next: None }),
        items @ Value::Array(_) => Ok(Page {
            items: serde_json::from_value(items)?,
            next: None,
        }),
        Value::Object(mut map) => {
            let key = envelope.ok_or_else(|| malformed("expected a JSON array, got an object"))?;
            let items = match map.remove(key) {
                Some(items @ Value::Array(_)) => serde_json::from_value(items)?,
                _ => {
                    return Err(malformed(format!(
                        "expected a JSON array or an object with a `{}` array",
                        key
                    )))
                }
            };
            let next = map
                .get("_links")
                .and_then(|links| links.get("next"))
                .and_then(Value::as_str)
                .map(str::to_string);
            Ok(Page { items, next })
        }
        other => Err(malformed(format!("expected a JSON array, got {}", other))),
    }
}

/// A well-formed JSON body of the wrong shape
fn malformed(message: impl std::fmt::Display) -> Error {
    Error::Json(serde::de::Error::custom(message))
}

/// Human-readable message from an error body
///
/// Prefers the payload's `error` member, then the raw text.
pub fn decode_error(bytes: &[u8]) -> String {
    if let Ok(ErrorPayload { error: Some(message) }) = serde_json::from_slice::<ErrorPayload>(bytes) {
        return message;
    }
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim();
    if text.is_empty() {
        "no error message in response".to_string()
    } else {
        text.to_string()
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
