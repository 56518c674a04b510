use crate::model::{Portal, Role};

/// Why a session ended. Every reason leads to the same outcome: the
/// credential is cleared and the user is sent back to the login surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogoutReason {
    #[error("Please log in!")]
    MissingCredential,
    #[error("Invalid token after refresh. Please log in again.")]
    MalformedToken,
    #[error("Access denied.")]
    RoleMismatch,
    #[error("Session expired. Please log in again.")]
    RefreshExhausted,
    #[error("Session refresh failed. Please log in again.")]
    RefreshFailed,
    #[error("Session expired due to inactivity. Please log in again.")]
    IdleTimeout,
    #[error("Session expired. Please log in again.")]
    Unauthorized,
    #[error("Logged out.")]
    UserLogout,
}

impl LogoutReason {
    /// Stable identifier for logs and JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            LogoutReason::MissingCredential => "missing_credential",
            LogoutReason::MalformedToken => "malformed_token",
            LogoutReason::RoleMismatch => "role_mismatch",
            LogoutReason::RefreshExhausted => "refresh_exhausted",
            LogoutReason::RefreshFailed => "refresh_failed",
            LogoutReason::IdleTimeout => "idle_timeout",
            LogoutReason::Unauthorized => "unauthorized",
            LogoutReason::UserLogout => "user_logout",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoutNotice {
    pub reason: LogoutReason,
    pub role: Role,
    pub portal: Portal,
}

impl LogoutNotice {
    /// User-facing text, naming the required role where that helps.
    pub fn message(&self) -> String {
        match self.reason {
            LogoutReason::MissingCredential => {
                format!("You must be logged in as {}!", self.role)
            }
            LogoutReason::RoleMismatch => {
                format!("Access denied. Only {} can access this page.", self.role)
            }
            reason => reason.to_string(),
        }
    }

    pub fn login_surface(&self) -> &'static str {
        self.portal.login_surface()
    }
}

/// Receives the "alert and redirect" step of a logout.
pub trait LogoutHandler: Send + Sync {
    fn logged_out(&self, notice: &LogoutNotice);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogoutHandler;

impl LogoutHandler for TracingLogoutHandler {
    fn logged_out(&self, notice: &LogoutNotice) {
        tracing::info!(
            role = %notice.role,
            reason = notice.reason.code(),
            login_surface = notice.login_surface(),
            "{}",
            notice.message()
        );
    }
}
