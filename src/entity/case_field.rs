use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::impl_entity;
use crate::client::ServiceRef;

/// A custom field definition available to test cases
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseField {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub system_name: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub type_id: Option<i64>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
    /// Per-project context and options; the shape depends on the field type
    #[serde(default)]
    pub configs: Vec<Value>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

/// A test case type (Automated, Functionality, Regression...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseType {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub is_default: Option<bool>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(CaseField, CaseType);
