use std::time::Duration;

use super::{Portal, Role};

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60);
pub const AUDITOR_IDLE_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_MAX_REFRESH_COUNT: u32 = 2;

/// Per-dashboard session rules: which role may use the credential, how
/// long it may sit idle, and how many automatic refreshes it gets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionPolicy {
    pub role: Role,
    pub idle_timeout: Duration,
    pub max_refresh_count: u32,
}

impl SessionPolicy {
    pub fn for_role(role: Role) -> Self {
        let idle_timeout = match role {
            Role::Auditor => AUDITOR_IDLE_TIMEOUT,
            _ => DEFAULT_IDLE_TIMEOUT,
        };
        Self {
            role,
            idle_timeout,
            max_refresh_count: DEFAULT_MAX_REFRESH_COUNT,
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn with_max_refresh_count(mut self, max_refresh_count: u32) -> Self {
        self.max_refresh_count = max_refresh_count;
        self
    }

    pub fn portal(&self) -> Portal {
        self.role.portal()
    }

    pub fn idle_timeout_ms(&self) -> i64 {
        i64::try_from(self.idle_timeout.as_millis()).unwrap_or(i64::MAX)
    }
}
