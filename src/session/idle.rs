use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::{LogoutReason, SessionGuard};

enum Signal {
    Activity,
    Stop,
}

/// Inactivity watchdog. Logs the session out once no activity has been
/// reported for the policy's idle timeout, whether or not the token itself
/// is still good.
pub struct IdleTimer {
    guard: Arc<SessionGuard>,
    tx: Sender<Signal>,
    fired: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl IdleTimer {
    pub fn start(guard: Arc<SessionGuard>) -> Result<Self> {
        let timeout = guard.policy().idle_timeout;
        let (tx, rx) = mpsc::channel();
        let fired = Arc::new(AtomicBool::new(false));

        let watcher_guard = Arc::clone(&guard);
        let watcher_fired = Arc::clone(&fired);
        let handle = thread::Builder::new()
            .name("bankdesk-idle".to_string())
            .spawn(move || {
                let mut deadline = deadline_after(timeout);
                loop {
                    let signal = match deadline {
                        Some(at) => rx.recv_timeout(at.saturating_duration_since(Instant::now())),
                        // Too far out to represent: only activity or stop can wake us.
                        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
                    };
                    match signal {
                        Ok(Signal::Activity) => deadline = deadline_after(timeout),
                        Ok(Signal::Stop) | Err(RecvTimeoutError::Disconnected) => return,
                        Err(RecvTimeoutError::Timeout) => {
                            if deadline.is_some_and(|at| Instant::now() >= at) {
                                watcher_guard.logout(LogoutReason::IdleTimeout);
                                watcher_fired.store(true, Ordering::SeqCst);
                                return;
                            }
                        }
                    }
                }
            })
            .context("spawn idle timer")?;

        Ok(Self {
            guard,
            tx,
            fired,
            handle: Some(handle),
        })
    }

    /// Reports user activity: pushes the deadline out and stamps the last
    /// access time.
    pub fn touch(&self) {
        if self.fired() {
            return;
        }
        self.guard.record_activity();
        let _ = self.tx.send(Signal::Activity);
    }

    /// Whether the timer has logged the session out.
    pub fn fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }

    pub fn timeout(&self) -> Duration {
        self.guard.policy().idle_timeout
    }

    /// Stops watching without logging out.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let _ = self.tx.send(Signal::Stop);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn deadline_after(timeout: Duration) -> Option<Instant> {
    Instant::now().checked_add(timeout)
}

impl Drop for IdleTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../tests/session/idle_tests.rs"]
mod tests;
