mod claims;
mod config;
mod credential;
mod policy;
mod role;

pub use self::claims::{DecodedClaims, MalformedToken, decode_claims};
pub use self::config::{AppConfig, DEFAULT_BASE_URL, PolicyOverride};
pub use self::credential::{Credential, SessionKeys};
pub use self::policy::{
    AUDITOR_IDLE_TIMEOUT, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_REFRESH_COUNT, SessionPolicy,
};
pub use self::role::{Portal, Role, UnknownPortal, UnknownRole};
