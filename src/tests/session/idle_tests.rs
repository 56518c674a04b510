use std::sync::Mutex;

use crate::model::{Role, SessionPolicy};
use crate::remote::TokenPair;
use crate::session::{LogoutHandler, LogoutNotice, TokenRefresher};
use crate::store::{MemoryStore, SessionStore};

use super::*;

struct NoRefresh;

impl TokenRefresher for NoRefresh {
    fn refresh(&self, _refresh_token: &str) -> Result<TokenPair> {
        anyhow::bail!("not expected in idle tests")
    }
}

#[derive(Default)]
struct Reasons(Mutex<Vec<LogoutReason>>);

impl LogoutHandler for Reasons {
    fn logged_out(&self, notice: &LogoutNotice) {
        self.0.lock().unwrap().push(notice.reason);
    }
}

fn logged_in_guard(idle: Duration) -> (Arc<SessionGuard>, Arc<MemoryStore>, Arc<Reasons>) {
    let store = Arc::new(MemoryStore::new());
    store.set("customer.accessToken", "access").unwrap();
    store.set("customer.refreshToken", "refresh").unwrap();
    store.set("customer.refreshCount", "0").unwrap();

    let reasons = Arc::new(Reasons::default());
    let policy = SessionPolicy::for_role(Role::Customer).with_idle_timeout(idle);
    let guard = SessionGuard::new(policy, store.clone(), Arc::new(NoRefresh))
        .with_logout_handler(reasons.clone());
    (Arc::new(guard), store, reasons)
}

fn wait_until(limit: Duration, f: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < limit {
        if f() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    f()
}

#[test]
fn silence_past_the_timeout_logs_out() {
    let (guard, store, reasons) = logged_in_guard(Duration::from_millis(100));
    let timer = IdleTimer::start(guard).unwrap();

    assert!(wait_until(Duration::from_secs(5), || timer.fired()));
    assert_eq!(*reasons.0.lock().unwrap(), vec![LogoutReason::IdleTimeout]);
    assert!(store.is_empty());
}

#[test]
fn activity_keeps_the_session_open() {
    let (guard, store, reasons) = logged_in_guard(Duration::from_millis(400));
    let timer = IdleTimer::start(guard).unwrap();

    for _ in 0..8 {
        std::thread::sleep(Duration::from_millis(100));
        timer.touch();
    }
    assert!(!timer.fired());
    assert!(store.get("customer.lastAccessTime").unwrap().is_some());

    timer.stop();
    assert!(reasons.0.lock().unwrap().is_empty());
    assert_eq!(store.get("customer.accessToken").unwrap().as_deref(), Some("access"));
}

#[test]
fn stopping_does_not_log_out() {
    let (guard, store, reasons) = logged_in_guard(Duration::from_millis(200));
    let timer = IdleTimer::start(guard).unwrap();
    assert_eq!(timer.timeout(), Duration::from_millis(200));
    timer.stop();

    std::thread::sleep(Duration::from_millis(400));
    assert!(reasons.0.lock().unwrap().is_empty());
    assert!(!store.is_empty());
}

#[test]
fn touch_after_timeout_does_not_revive_the_session() {
    let (guard, store, _reasons) = logged_in_guard(Duration::from_millis(50));
    let timer = IdleTimer::start(guard).unwrap();
    assert!(wait_until(Duration::from_secs(5), || timer.fired()));

    timer.touch();
    assert!(store.is_empty());
}

#[test]
fn unrepresentable_timeout_never_fires_and_still_stops() {
    let (guard, store, reasons) = logged_in_guard(Duration::from_secs(u64::MAX));
    let timer = IdleTimer::start(guard).unwrap();

    timer.touch();
    std::thread::sleep(Duration::from_millis(100));
    timer.touch();
    assert!(!timer.fired());
    assert!(store.get("customer.lastAccessTime").unwrap().is_some());

    let handle_alive = timer.handle.as_ref().is_some_and(|h| !h.is_finished());
    assert!(handle_alive);

    timer.stop();
    assert!(reasons.0.lock().unwrap().is_empty());
    assert_eq!(store.get("customer.accessToken").unwrap().as_deref(), Some("access"));
}
