use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{impl_entity, Entity, TestSuite};
use crate::client::ServiceRef;
use crate::error::Result;

/// A test case
///
/// Custom fields (`custom_steps`, `custom_preconds`, ...) are instance
/// specific; they land in `custom_fields` and are sent back flattened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub section_id: Option<i64>,
    pub suite_id: Option<i64>,
    pub template_id: Option<i64>,
    pub type_id: Option<i64>,
    pub priority_id: Option<i64>,
    pub milestone_id: Option<i64>,
    pub refs: Option<String>,
    pub estimate: Option<String>,
    pub estimate_forecast: Option<String>,
    pub created_by: Option<i64>,
    pub created_on: Option<i64>,
    pub updated_by: Option<i64>,
    pub updated_on: Option<i64>,

    #[serde(flatten)]
    pub custom_fields: Map<String, Value>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(TestCase);

impl TestCase {
    /// A new case body for `add_test_case`
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Set a `custom_*` field, prefixing the name when needed
    pub fn set_custom(&mut self, name: &str, value: impl Into<Value>) {
        let key = if name.starts_with("custom_") {
            name.to_string()
        } else {
            format!("custom_{}", name)
        };
        self.custom_fields.insert(key, value.into());
    }

    /// Get a custom field by its system name (with or without the prefix)
    pub fn custom(&self, name: &str) -> Option<&Value> {
        self.custom_fields
            .get(name)
            .or_else(|| self.custom_fields.get(&format!("custom_{}", name)))
    }

    /// The suite this case belongs to
    pub fn suite(&self) -> Result<Option<TestSuite>> {
        match self.suite_id {
            Some(suite_id) => self.service()?.get_test_suite(suite_id),
            None => Ok(None),
        }
    }
}
