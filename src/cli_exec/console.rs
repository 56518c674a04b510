use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use bankdesk::session::{ApiError, IdleTimer, LogoutReason};

use super::*;

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Holds one dashboard session open. Every input line counts as activity;
/// the idle timer ends the session when the user goes quiet.
pub(super) fn handle_console_command(ctx: &CliContext, role: Role) -> Result<()> {
    let session = open_session(ctx, role);
    session.guard().ensure_valid().map_err(ApiError::Session)?;
    let timer = IdleTimer::start(Arc::clone(session.guard()))?;

    println!(
        "{} session open (idle timeout {}s). Commands: status, get <path>, refresh, quit",
        role,
        timer.timeout().as_secs()
    );

    let (tx, rx) = mpsc::channel::<String>();
    thread::Builder::new()
        .name("bankdesk-console-input".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { return };
                if tx.send(line).is_err() {
                    return;
                }
            }
        })
        .context("spawn console input reader")?;

    loop {
        prompt();
        let line = loop {
            if timer.fired() {
                return Err(ApiError::Session(LogoutReason::IdleTimeout).into());
            }
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(line) => break Some(line),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break None,
            }
        };
        let Some(line) = line else {
            timer.stop();
            return Ok(());
        };
        timer.touch();

        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "quit" | "exit" => {
                timer.stop();
                return Ok(());
            }
            "status" => {
                let claims = session.guard().ensure_valid().map_err(ApiError::Session)?;
                println!("role: {} expires: {}", claims.role, claims.exp);
            }
            "refresh" => {
                if session.guard().refresh() {
                    println!("refreshed");
                } else {
                    println!("refresh not available");
                }
            }
            "get" if !arg.is_empty() => {
                match session.get_json::<serde_json::Value>(arg) {
                    Ok(value) => print_json(&value, "response")?,
                    Err(err) if err.ends_session() => return Err(err.into()),
                    Err(err) => eprintln!("{}", err),
                }
            }
            other => eprintln!("unknown command `{}`", other),
        }
    }
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
