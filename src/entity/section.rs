use serde::{Deserialize, Serialize};

use super::impl_entity;
use crate::client::ServiceRef;

/// A section (folder) inside a suite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Option<i64>,
    pub suite_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i64>,
    pub depth: Option<i64>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(Section);

impl Section {
    /// A new section body for `add_section`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
