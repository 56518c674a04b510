use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::model::{Credential, DecodedClaims, SessionKeys, SessionPolicy, decode_claims};
use crate::remote::TokenPair;
use crate::store::{self, SessionStore};

use super::{
    Clock, LogoutHandler, LogoutNotice, LogoutReason, SystemClock, TokenRefresher,
    TracingLogoutHandler,
};

enum State {
    Start,
    NoCredential,
    Decoding { access: String },
    Valid { access: String, claims: DecodedClaims },
    RoleMismatch { found: String },
    Expired { access: String, claims: DecodedClaims },
    Refreshing { observed: String, bounded: bool },
    RefreshFailed,
    IdleTimedOut,
    LoggedOut(LogoutReason),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Start => "start",
            State::NoCredential => "no_credential",
            State::Decoding { .. } => "decoding",
            State::Valid { .. } => "valid",
            State::RoleMismatch { .. } => "role_mismatch",
            State::Expired { .. } => "expired",
            State::Refreshing { .. } => "refreshing",
            State::RefreshFailed => "refresh_failed",
            State::IdleTimedOut => "idle_timed_out",
            State::LoggedOut(_) => "logged_out",
        }
    }
}

/// Gatekeeper for one dashboard's credential. Every authenticated call runs
/// [`SessionGuard::ensure_valid`] first.
///
/// Refreshes are single-flight within a process: a caller that waited for
/// another caller's refresh adopts its result instead of spending the same
/// refresh token twice.
pub struct SessionGuard {
    policy: SessionPolicy,
    keys: SessionKeys,
    store: Arc<dyn SessionStore>,
    refresher: Arc<dyn TokenRefresher>,
    clock: Arc<dyn Clock>,
    logout_handler: Arc<dyn LogoutHandler>,
    refresh_lock: Mutex<()>,
}

impl SessionGuard {
    pub fn new(
        policy: SessionPolicy,
        store: Arc<dyn SessionStore>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Self {
        let keys = SessionKeys::for_portal(policy.portal());
        Self {
            policy,
            keys,
            store,
            refresher,
            clock: Arc::new(SystemClock),
            logout_handler: Arc::new(TracingLogoutHandler),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_logout_handler(mut self, handler: Arc<dyn LogoutHandler>) -> Self {
        self.logout_handler = handler;
        self
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    /// Validates the stored credential for the policy's role, refreshing it
    /// when allowed. On failure the session has already been logged out.
    pub fn ensure_valid(&self) -> Result<DecodedClaims, LogoutReason> {
        let mut decode_refreshed = false;
        let mut state = State::Start;
        loop {
            debug!(role = %self.policy.role, state = state.name(), "session guard");
            state = match state {
                State::Start => {
                    let cred = self.read_credential();
                    match (cred.access_token, cred.refresh_token) {
                        (Some(access), Some(_)) => State::Decoding { access },
                        _ => State::NoCredential,
                    }
                }
                State::NoCredential => State::LoggedOut(LogoutReason::MissingCredential),
                State::Decoding { access } => match decode_claims(&access) {
                    Ok(claims) => State::Valid { access, claims },
                    Err(err) if !decode_refreshed => {
                        decode_refreshed = true;
                        warn!(error = %err, "access token unreadable; attempting refresh");
                        State::Refreshing {
                            observed: access,
                            bounded: false,
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "access token still unreadable after refresh");
                        State::LoggedOut(LogoutReason::MalformedToken)
                    }
                },
                State::Valid { access, claims } => {
                    let now = self.clock.now_ms();
                    if claims.role != self.policy.role.as_str() {
                        State::RoleMismatch { found: claims.role }
                    } else if claims.is_expired_at(now) {
                        State::Expired { access, claims }
                    } else {
                        self.stamp_last_access(now);
                        return Ok(claims);
                    }
                }
                State::RoleMismatch { found } => {
                    warn!(required = %self.policy.role, found = %found, "role mismatch");
                    State::LoggedOut(LogoutReason::RoleMismatch)
                }
                State::Expired { access, claims } => self.on_expired(access, &claims),
                State::Refreshing { observed, bounded } => {
                    if self.refresh_from(&observed, bounded) {
                        State::Start
                    } else {
                        State::RefreshFailed
                    }
                }
                State::RefreshFailed => State::LoggedOut(LogoutReason::RefreshFailed),
                State::IdleTimedOut => State::LoggedOut(LogoutReason::IdleTimeout),
                State::LoggedOut(reason) => {
                    self.logout(reason);
                    return Err(reason);
                }
            };
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ensure_valid().is_ok()
    }

    fn on_expired(&self, access: String, claims: &DecodedClaims) -> State {
        let now = self.clock.now_ms();
        let cred = self.read_credential();

        let reference = match cred.last_access_ms() {
            // Zero means never stamped.
            Ok(None) | Ok(Some(0)) => claims.expires_at_ms(),
            Ok(Some(ms)) => ms,
            Err(_) => {
                warn!("last access time is unreadable");
                return State::IdleTimedOut;
            }
        };
        let idle_ms = now.saturating_sub(reference);
        if idle_ms > self.policy.idle_timeout_ms() {
            debug!(idle_ms, "token expired after the idle window");
            return State::IdleTimedOut;
        }

        match cred.refresh_count() {
            Ok(n) if n < self.policy.max_refresh_count => State::Refreshing {
                observed: access,
                bounded: true,
            },
            Ok(n) => {
                debug!(refresh_count = n, "refresh budget spent");
                State::LoggedOut(LogoutReason::RefreshExhausted)
            }
            Err(_) => {
                warn!("refresh count is unreadable");
                State::LoggedOut(LogoutReason::RefreshExhausted)
            }
        }
    }

    /// Refreshes the stored credential, honouring the refresh budget.
    pub fn refresh(&self) -> bool {
        match self.read_credential().access_token {
            Some(access) => self.refresh_from(&access, true),
            None => false,
        }
    }

    /// One refresh after the backend rejected `observed_access`.
    pub(super) fn refresh_after_unauthorized(&self, observed_access: &str) -> bool {
        self.refresh_from(observed_access, true)
    }

    fn refresh_from(&self, observed_access: &str, bounded: bool) -> bool {
        let _inflight = self
            .refresh_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let current = self.read_credential();
        let Some(refresh_token) = current.refresh_token.clone() else {
            debug!("no refresh token stored");
            return false;
        };
        if current.access_token.as_deref() != Some(observed_access) {
            debug!("credential already refreshed by a concurrent caller");
            return current.access_token.is_some();
        }
        if bounded {
            match current.refresh_count() {
                Ok(n) if n < self.policy.max_refresh_count => {}
                _ => {
                    debug!("refresh budget spent");
                    return false;
                }
            }
        }

        let pair = match self.refresher.refresh(&refresh_token) {
            Ok(pair) => pair,
            Err(err) => {
                warn!(role = %self.policy.role, error = %format!("{:#}", err), "token refresh failed");
                return false;
            }
        };
        match self.persist_refresh(&pair, &current, &refresh_token) {
            Ok(count) => {
                info!(role = %self.policy.role, refresh_count = count, "session refreshed");
                true
            }
            Err(err) => {
                warn!(error = %format!("{:#}", err), "could not store refreshed credential");
                false
            }
        }
    }

    fn persist_refresh(
        &self,
        pair: &TokenPair,
        previous: &Credential,
        previous_refresh: &str,
    ) -> Result<u32> {
        let count = previous.refresh_count().unwrap_or(0).saturating_add(1);
        let refresh_token = pair
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(previous_refresh);
        let now = self.clock.now_ms();

        self.store
            .set(&self.keys.access_token, &pair.access_token)
            .context("store access token")?;
        self.store
            .set(&self.keys.refresh_token, refresh_token)
            .context("store refresh token")?;
        self.store
            .set(&self.keys.refresh_count, &count.to_string())
            .context("store refresh count")?;
        self.store
            .set(&self.keys.last_access, &now.to_string())
            .context("store last access time")?;
        Ok(count)
    }

    /// Clears the credential and hands the user back to the login surface.
    pub fn logout(&self, reason: LogoutReason) {
        if let Err(err) = store::clear_credential(self.store.as_ref(), &self.keys) {
            warn!(error = %format!("{:#}", err), "could not clear credential");
        }
        info!(role = %self.policy.role, reason = reason.code(), "session ended");
        self.logout_handler.logged_out(&LogoutNotice {
            reason,
            role: self.policy.role,
            portal: self.policy.portal(),
        });
    }

    /// Marks user activity. Does nothing once the credential is gone.
    pub fn record_activity(&self) {
        if self.read_credential().access_token.is_some() {
            self.stamp_last_access(self.clock.now_ms());
        }
    }

    /// Starts a fresh credential from a login response.
    pub fn store_login(&self, pair: &TokenPair) -> Result<()> {
        let refresh_token = pair
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .context("login response carried no refresh token")?;
        let now = self.clock.now_ms();

        self.store
            .set(&self.keys.access_token, &pair.access_token)
            .context("store access token")?;
        self.store
            .set(&self.keys.refresh_token, refresh_token)
            .context("store refresh token")?;
        self.store
            .set(&self.keys.refresh_count, "0")
            .context("store refresh count")?;
        self.store
            .set(&self.keys.last_access, &now.to_string())
            .context("store last access time")?;
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read_credential().access_token
    }

    pub fn credential(&self) -> Result<Credential> {
        store::read_credential(self.store.as_ref(), &self.keys)
    }

    fn read_credential(&self) -> Credential {
        match self.credential() {
            Ok(cred) => cred,
            Err(err) => {
                warn!(error = %format!("{:#}", err), "could not read credential");
                Credential::default()
            }
        }
    }

    fn stamp_last_access(&self, now_ms: i64) {
        if let Err(err) = self.store.set(&self.keys.last_access, &now_ms.to_string()) {
            warn!(error = %format!("{:#}", err), "could not record last access time");
        }
    }
}

#[cfg(test)]
#[path = "../tests/session/guard_tests.rs"]
mod tests;
