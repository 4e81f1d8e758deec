use serde::{Deserialize, Serialize};

use super::{impl_entity, Entity};
use crate::client::ServiceRef;

/// A configuration group (e.g. "Browsers") and its configurations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigGroup {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub project_id: Option<i64>,
    #[serde(default)]
    pub configs: Vec<Config>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl Entity for ConfigGroup {
    fn attach(&mut self, service: ServiceRef) {
        for config in &mut self.configs {
            config.attach(service.clone());
        }
        self.service = Some(service);
    }

    fn service_ref(&self) -> Option<&ServiceRef> {
        self.service.as_ref()
    }
}

impl ConfigGroup {
    /// Find a configuration of this group by name
    pub fn config(&self, name: &str) -> Option<&Config> {
        self.configs.iter().find(|c| c.name.as_deref() == Some(name))
    }
}

/// A single configuration (e.g. "Firefox")
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub group_id: Option<i64>,

    #[serde(skip)]
    pub service: Option<ServiceRef>,
}

impl_entity!(Config);
