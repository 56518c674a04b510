use std::num::ParseIntError;

use super::Portal;

/// Store keys for one portal's credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionKeys {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_count: String,
    pub last_access: String,
}

impl SessionKeys {
    pub fn for_portal(portal: Portal) -> Self {
        let p = portal.as_str();
        Self {
            access_token: format!("{}.accessToken", p),
            refresh_token: format!("{}.refreshToken", p),
            refresh_count: format!("{}.refreshCount", p),
            last_access: format!("{}.lastAccessTime", p),
        }
    }

    pub fn all(&self) -> [&str; 4] {
        [
            &self.access_token,
            &self.refresh_token,
            &self.refresh_count,
            &self.last_access,
        ]
    }
}

/// Snapshot of the stored credential. Counters are kept as the raw stored
/// strings because a corrupt value has its own meaning to the guard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credential {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub refresh_count: Option<String>,
    pub last_access: Option<String>,
}

impl Credential {
    pub fn has_tokens(&self) -> bool {
        self.access_token.is_some() && self.refresh_token.is_some()
    }

    /// Refreshes performed so far. Absent counts as zero.
    pub fn refresh_count(&self) -> Result<u32, ParseIntError> {
        match self.refresh_count.as_deref() {
            None => Ok(0),
            Some(raw) => raw.trim().parse(),
        }
    }

    /// Last recorded access in Unix milliseconds, if one was ever recorded.
    pub fn last_access_ms(&self) -> Result<Option<i64>, ParseIntError> {
        self.last_access
            .as_deref()
            .map(|raw| raw.trim().parse())
            .transpose()
    }
}
