use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use jsonwebtoken::{EncodingKey, Header, encode};

use crate::model::{Portal, Role};
use crate::session::ManualClock;
use crate::store::MemoryStore;

use super::*;

const NOW_MS: i64 = 1_700_000_000_000;
const NOW_SECS: i64 = NOW_MS / 1000;

fn token(role: &str, exp_secs: i64) -> String {
    encode(
        &Header::default(),
        &serde_json::json!({ "sub": "someone@bank.test", "role": role, "exp": exp_secs }),
        &EncodingKey::from_secret(b"backend-only"),
    )
    .unwrap()
}

type RefreshFn = Box<dyn Fn(usize, &str) -> Result<TokenPair> + Send + Sync>;

struct ScriptedRefresher {
    calls: AtomicUsize,
    respond: RefreshFn,
}

impl ScriptedRefresher {
    fn new(respond: impl Fn(usize, &str) -> Result<TokenPair> + Send + Sync + 'static) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            respond: Box::new(respond),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenRefresher for ScriptedRefresher {
    fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(n, refresh_token)
    }
}

#[derive(Default)]
struct RecordingLogout {
    notices: Mutex<Vec<LogoutNotice>>,
}

impl RecordingLogout {
    fn notices(&self) -> Vec<LogoutNotice> {
        self.notices.lock().unwrap().clone()
    }
}

impl LogoutHandler for RecordingLogout {
    fn logged_out(&self, notice: &LogoutNotice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

struct Harness {
    guard: SessionGuard,
    store: Arc<MemoryStore>,
    clock: Arc<ManualClock>,
    refresher: Arc<ScriptedRefresher>,
    logouts: Arc<RecordingLogout>,
}

impl Harness {
    fn new(policy: SessionPolicy, refresher: ScriptedRefresher) -> Self {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualClock::new(NOW_MS));
        let refresher = Arc::new(refresher);
        let logouts = Arc::new(RecordingLogout::default());
        let guard = SessionGuard::new(policy, store.clone(), refresher.clone())
            .with_clock(clock.clone())
            .with_logout_handler(logouts.clone());
        Self {
            guard,
            store,
            clock,
            refresher,
            logouts,
        }
    }

    fn seed(&self, access: &str, refresh_count: &str, last_access: Option<i64>) {
        let keys = self.guard.keys();
        self.store.set(&keys.access_token, access).unwrap();
        self.store.set(&keys.refresh_token, "refresh-1").unwrap();
        self.store.set(&keys.refresh_count, refresh_count).unwrap();
        if let Some(ms) = last_access {
            self.store.set(&keys.last_access, &ms.to_string()).unwrap();
        }
    }

    fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap()
    }
}

fn refreshes_to(role: &'static str) -> ScriptedRefresher {
    ScriptedRefresher::new(move |n, _| {
        Ok(TokenPair {
            access_token: token(role, NOW_SECS + 900 + n as i64),
            refresh_token: Some(format!("refresh-{}", n + 2)),
            role: Some(role.to_string()),
        })
    })
}

fn refresh_fails() -> ScriptedRefresher {
    ScriptedRefresher::new(|_, _| anyhow::bail!("refresh token expired"))
}

#[test]
fn valid_token_passes_and_stamps_last_access() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());
    h.seed(&token("CUSTOMER", NOW_SECS + 600), "0", Some(NOW_MS - 5_000));

    let claims = h.guard.ensure_valid().unwrap();
    assert_eq!(claims.role, "CUSTOMER");
    assert_eq!(h.refresher.calls(), 0);
    assert_eq!(
        h.stored("customer.lastAccessTime"),
        Some(NOW_MS.to_string())
    );
    assert!(h.logouts.notices().is_empty());
}

#[test]
fn missing_credential_logs_out_with_role_hint() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());

    assert_eq!(
        h.guard.ensure_valid().unwrap_err(),
        LogoutReason::MissingCredential
    );
    let notices = h.logouts.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message(), "You must be logged in as CUSTOMER!");
    assert_eq!(notices[0].login_surface(), "customer-login");
}

#[test]
fn access_token_without_refresh_token_counts_as_missing() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());
    h.store
        .set("customer.accessToken", &token("CUSTOMER", NOW_SECS + 600))
        .unwrap();

    assert_eq!(
        h.guard.ensure_valid().unwrap_err(),
        LogoutReason::MissingCredential
    );
    assert!(h.store.is_empty());
}

#[test]
fn role_mismatch_logs_out_without_refreshing() {
    let h = Harness::new(SessionPolicy::for_role(Role::Auditor), refreshes_to("AUDITOR"));
    h.seed(&token("CUSTOMER_SUPPORT", NOW_SECS - 60), "0", Some(NOW_MS));

    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::RoleMismatch);
    assert_eq!(h.refresher.calls(), 0);
    assert!(h.store.is_empty());

    let notices = h.logouts.notices();
    assert_eq!(
        notices[0].message(),
        "Access denied. Only AUDITOR can access this page."
    );
    assert_eq!(notices[0].portal, Portal::Employee);
    assert_eq!(notices[0].login_surface(), "employee-login");
}

#[test]
fn expired_token_inside_idle_window_is_refreshed_once() {
    let policy = SessionPolicy::for_role(Role::LoanOfficer).with_idle_timeout(Duration::from_secs(1));
    let h = Harness::new(policy, refreshes_to("LOAN_OFFICER"));
    h.seed(&token("LOAN_OFFICER", NOW_SECS - 1), "0", Some(NOW_MS - 1_000));

    let claims = h.guard.ensure_valid().unwrap();
    assert_eq!(claims.exp, NOW_SECS + 900);
    assert_eq!(h.refresher.calls(), 1);
    assert_eq!(h.stored("employee.refreshCount").as_deref(), Some("1"));
    assert_eq!(h.stored("employee.refreshToken").as_deref(), Some("refresh-2"));
    assert!(h.logouts.notices().is_empty());
}

#[test]
fn refresh_budget_at_bound_logs_out_without_refreshing() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "2", Some(NOW_MS - 1_000));

    assert_eq!(
        h.guard.ensure_valid().unwrap_err(),
        LogoutReason::RefreshExhausted
    );
    assert_eq!(h.refresher.calls(), 0);
    assert!(h.store.is_empty());
}

#[test]
fn auditor_idle_past_window_is_logged_out_without_refreshing() {
    let h = Harness::new(SessionPolicy::for_role(Role::Auditor), refreshes_to("AUDITOR"));
    h.seed(
        &token("AUDITOR", NOW_SECS - 1),
        "0",
        Some(NOW_MS - 10 * 60 * 1_000),
    );

    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::IdleTimeout);
    assert_eq!(h.refresher.calls(), 0);
    assert_eq!(
        h.logouts.notices()[0].message(),
        "Session expired due to inactivity. Please log in again."
    );
}

#[test]
fn idle_exactly_at_the_timeout_still_refreshes() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "0", Some(NOW_MS - 120_000));

    assert!(h.guard.ensure_valid().is_ok());
    assert_eq!(h.refresher.calls(), 1);
}

#[test]
fn failed_refresh_logs_out_with_refresh_failed() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "1", Some(NOW_MS - 1_000));

    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::RefreshFailed);
    assert_eq!(h.refresher.calls(), 1);
    assert!(h.store.is_empty());
    assert_eq!(
        h.logouts.notices()[0].message(),
        "Session refresh failed. Please log in again."
    );
}

#[test]
fn unreadable_token_gets_one_refresh_even_past_the_budget() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed("definitely-not-a-jwt", "2", Some(NOW_MS));

    let claims = h.guard.ensure_valid().unwrap();
    assert_eq!(claims.role, "CUSTOMER");
    assert_eq!(h.refresher.calls(), 1);
}

#[test]
fn unreadable_token_after_refresh_is_malformed() {
    let refresher = ScriptedRefresher::new(|_, _| {
        Ok(TokenPair {
            access_token: "still.not.valid".to_string(),
            refresh_token: None,
            role: None,
        })
    });
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresher);
    h.seed("garbage", "0", Some(NOW_MS));

    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::MalformedToken);
    assert_eq!(h.refresher.calls(), 1);
    assert_eq!(
        h.logouts.notices()[0].message(),
        "Invalid token after refresh. Please log in again."
    );
}

#[test]
fn refresh_without_new_refresh_token_keeps_the_old_one() {
    let refresher = ScriptedRefresher::new(|_, presented| {
        assert_eq!(presented, "refresh-1");
        Ok(TokenPair {
            access_token: token("CUSTOMER", NOW_SECS + 900),
            refresh_token: None,
            role: None,
        })
    });
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresher);
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "0", Some(NOW_MS));

    assert!(h.guard.ensure_valid().is_ok());
    assert_eq!(h.stored("customer.refreshToken").as_deref(), Some("refresh-1"));
}

#[test]
fn refreshed_tokens_that_arrive_expired_stop_at_the_budget() {
    let refresher = ScriptedRefresher::new(|_, _| {
        Ok(TokenPair {
            access_token: token("CUSTOMER", NOW_SECS - 5),
            refresh_token: Some("refresh-next".to_string()),
            role: None,
        })
    });
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresher);
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "0", Some(NOW_MS));

    assert_eq!(
        h.guard.ensure_valid().unwrap_err(),
        LogoutReason::RefreshExhausted
    );
    assert_eq!(h.refresher.calls(), 2);
}

#[test]
fn corrupt_counters_end_the_session() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "lots", Some(NOW_MS));
    assert_eq!(
        h.guard.ensure_valid().unwrap_err(),
        LogoutReason::RefreshExhausted
    );

    h.seed(&token("CUSTOMER", NOW_SECS - 1), "0", None);
    h.store.set("customer.lastAccessTime", "yesterday").unwrap();
    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::IdleTimeout);
    assert_eq!(h.refresher.calls(), 0);
}

#[test]
fn missing_last_access_measures_idle_from_expiry() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "0", None);
    assert!(h.guard.ensure_valid().is_ok());
    assert_eq!(h.refresher.calls(), 1);

    h.seed(&token("CUSTOMER", NOW_SECS - 600), "0", None);
    h.store.remove("customer.lastAccessTime").unwrap();
    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::IdleTimeout);
    assert_eq!(h.refresher.calls(), 1);
}

#[test]
fn zero_last_access_counts_as_never_recorded() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "0", Some(0));
    assert!(h.guard.ensure_valid().is_ok());
    assert_eq!(h.refresher.calls(), 1);
    assert_eq!(h.stored("customer.refreshCount").as_deref(), Some("1"));

    h.seed(&token("CUSTOMER", NOW_SECS - 600), "0", Some(0));
    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::IdleTimeout);
    assert_eq!(h.refresher.calls(), 1);
}

#[test]
fn manual_refresh_respects_the_budget() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS + 600), "1", Some(NOW_MS));

    assert!(h.guard.refresh());
    assert_eq!(h.stored("customer.refreshCount").as_deref(), Some("2"));
    assert!(!h.guard.refresh());
    assert_eq!(h.refresher.calls(), 1);
    assert!(h.logouts.notices().is_empty());
}

#[test]
fn refresh_for_a_stale_token_adopts_the_newer_credential() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refreshes_to("CUSTOMER"));
    h.seed(&token("CUSTOMER", NOW_SECS + 600), "0", Some(NOW_MS));

    assert!(h.guard.refresh_after_unauthorized("an-older-access-token"));
    assert_eq!(h.refresher.calls(), 0);
    assert_eq!(h.stored("customer.refreshCount").as_deref(), Some("0"));
}

#[test]
fn activity_is_only_recorded_while_logged_in() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());
    h.guard.record_activity();
    assert!(h.store.is_empty());

    h.seed(&token("CUSTOMER", NOW_SECS + 600), "0", Some(NOW_MS));
    h.clock.advance(Duration::from_secs(30));
    h.guard.record_activity();
    assert_eq!(
        h.stored("customer.lastAccessTime"),
        Some((NOW_MS + 30_000).to_string())
    );
}

#[test]
fn store_login_starts_a_fresh_credential() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());
    h.seed(&token("CUSTOMER", NOW_SECS - 1), "2", Some(NOW_MS - 999_999));

    let pair = TokenPair {
        access_token: token("CUSTOMER", NOW_SECS + 900),
        refresh_token: Some("fresh".to_string()),
        role: Some("CUSTOMER".to_string()),
    };
    h.guard.store_login(&pair).unwrap();

    let cred = h.guard.credential().unwrap();
    assert_eq!(cred.refresh_token.as_deref(), Some("fresh"));
    assert_eq!(cred.refresh_count().unwrap(), 0);
    assert_eq!(cred.last_access_ms().unwrap(), Some(NOW_MS));

    let missing_refresh = TokenPair {
        refresh_token: None,
        ..pair
    };
    assert!(h.guard.store_login(&missing_refresh).is_err());
}

#[test]
fn user_logout_clears_only_this_portal() {
    let h = Harness::new(SessionPolicy::for_role(Role::Customer), refresh_fails());
    h.seed(&token("CUSTOMER", NOW_SECS + 600), "0", Some(NOW_MS));
    h.store.set("employee.accessToken", "kept").unwrap();

    h.guard.logout(LogoutReason::UserLogout);
    assert_eq!(h.stored("customer.accessToken"), None);
    assert_eq!(h.stored("employee.accessToken").as_deref(), Some("kept"));
    assert_eq!(h.logouts.notices()[0].reason, LogoutReason::UserLogout);
}

#[test]
fn every_role_rejects_every_other_role() {
    for required in Role::ALL {
        for presented in Role::ALL.into_iter().filter(|r| *r != required) {
            let h = Harness::new(SessionPolicy::for_role(required), refreshes_to("CUSTOMER"));
            h.seed(&token(presented.as_str(), NOW_SECS - 1), "0", Some(NOW_MS));

            assert_eq!(
                h.guard.ensure_valid().unwrap_err(),
                LogoutReason::RoleMismatch,
                "{} presented to {}",
                presented,
                required
            );
            assert_eq!(h.refresher.calls(), 0);
        }
    }
}

#[test]
fn unknown_role_is_a_mismatch_not_a_malformed_token() {
    let h = Harness::new(SessionPolicy::for_role(Role::SuperAdmin), refreshes_to("SUPER_ADMIN"));
    h.seed(&token("JANITOR", NOW_SECS + 600), "0", Some(NOW_MS));

    assert_eq!(h.guard.ensure_valid().unwrap_err(), LogoutReason::RoleMismatch);
    assert_eq!(h.refresher.calls(), 0);
}
