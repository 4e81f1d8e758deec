use serde::{Deserialize, Serialize};

use super::impl_entity;
use crate::client::ServiceRef;

/// A TestRail user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub role_id: Option<i64>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(User);
