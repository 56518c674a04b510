//! Session lifecycle for every role dashboard: credential validation,
//! bounded refresh, idle cutoff and authenticated requests.

use anyhow::Result;

use crate::remote::TokenPair;

mod clock;
mod guard;
mod idle;
mod logout;
mod request;

pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::guard::SessionGuard;
pub use self::idle::IdleTimer;
pub use self::logout::{LogoutHandler, LogoutNotice, LogoutReason, TracingLogoutHandler};
pub use self::request::{ApiError, Session};

/// Exchanges a refresh token for a new token pair.
pub trait TokenRefresher: Send + Sync {
    fn refresh(&self, refresh_token: &str) -> Result<TokenPair>;
}
