use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Role, SessionPolicy};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-role adjustments on top of the built-in policy presets.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub policies: BTreeMap<Role, PolicyOverride>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_refresh_count: Option<u32>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            base_url: default_base_url(),
            policies: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    pub fn policy_for(&self, role: Role) -> SessionPolicy {
        let mut policy = SessionPolicy::for_role(role);
        if let Some(o) = self.policies.get(&role) {
            if let Some(secs) = o.idle_timeout_secs {
                policy = policy.with_idle_timeout(Duration::from_secs(secs));
            }
            if let Some(max) = o.max_refresh_count {
                policy = policy.with_max_refresh_count(max);
            }
        }
        policy
    }
}
