use std::str::FromStr;

use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use bankdesk::model::{Portal, SessionKeys, decode_claims};
use bankdesk::remote::SignupRequest;
use bankdesk::session::{Clock, LogoutReason, SystemClock};
use bankdesk::store;

use crate::cli_commands::account::{ChangePasswordArgs, SignupArgs};

use super::*;

pub(super) fn handle_login_command(ctx: &CliContext, command: LoginCommands) -> Result<()> {
    let (pair, role) = match command {
        LoginCommands::Customer { email, password } => {
            (ctx.remote.login_customer(&email, &password)?, Role::Customer)
        }
        LoginCommands::Employee {
            employee_id,
            email,
            password,
        } => {
            let pair = ctx
                .remote
                .login_employee(&employee_id, &email, &password)?;
            let claimed = match decode_claims(&pair.access_token) {
                Ok(claims) => claims.role,
                Err(_) => pair.role.clone().unwrap_or_default(),
            };
            let role = Role::from_str(&claimed).context("login response names no known role")?;
            (pair, role)
        }
    };

    ctx.guard(role).store_login(&pair)?;
    println!("Logged in as {}", role);
    Ok(())
}

/// Ends the portal's session through the guard, so the logout handler sees
/// it like any other logout. The employee portal is shared, so the role is
/// read from the stored token when it is readable.
pub(super) fn handle_logout_command(ctx: &CliContext, portal: Portal) -> Result<()> {
    let keys = SessionKeys::for_portal(portal);
    let cred = store::read_credential(ctx.sessions.as_ref(), &keys)?;
    let role = cred
        .access_token
        .as_deref()
        .and_then(|t| decode_claims(t).ok())
        .and_then(|claims| Role::from_str(&claims.role).ok())
        .filter(|role| role.portal() == portal)
        .or_else(|| Role::ALL.into_iter().find(|role| role.portal() == portal))
        .context("no role signs in through this portal")?;
    ctx.guard(role).logout(LogoutReason::UserLogout);
    Ok(())
}

pub(super) fn handle_change_password_command(
    ctx: &CliContext,
    args: ChangePasswordArgs,
) -> Result<()> {
    with_session(ctx, args.role, |session| {
        session.change_password(&args.email, &args.current_password, &args.new_password)?;
        println!("Password changed successfully.");
        Ok(())
    })
}

#[derive(Debug, Serialize)]
struct StatusReport {
    portal: Portal,
    logged_in: bool,
    role: Option<String>,
    subject: Option<String>,
    expires_at: Option<String>,
    expired: Option<bool>,
    token_readable: Option<bool>,
    refresh_count: Option<String>,
    last_access: Option<String>,
    home: String,
}

pub(super) fn handle_status_command(ctx: &CliContext, portal: Portal, json: bool) -> Result<()> {
    let keys = SessionKeys::for_portal(portal);
    let cred = store::read_credential(ctx.sessions.as_ref(), &keys)?;
    let now = SystemClock.now_ms();
    let claims = cred.access_token.as_deref().map(decode_claims);

    let mut report = StatusReport {
        portal,
        logged_in: cred.has_tokens(),
        role: None,
        subject: None,
        expires_at: None,
        expired: None,
        token_readable: claims.as_ref().map(Result::is_ok),
        refresh_count: cred.refresh_count.clone(),
        last_access: cred
            .last_access_ms()
            .ok()
            .flatten()
            .map(format_ms),
        home: ctx.store.root().display().to_string(),
    };
    if let Some(Ok(claims)) = claims {
        report.expires_at = Some(format_ms(claims.expires_at_ms()));
        report.expired = Some(claims.is_expired_at(now));
        report.role = Some(claims.role);
        report.subject = claims.sub;
    }

    if json {
        return print_json(&report, "status");
    }
    if !report.logged_in {
        println!("portal: {} (not logged in)", portal);
        return Ok(());
    }
    println!("portal: {}", portal);
    match report.token_readable {
        Some(false) => println!("token: unreadable"),
        _ => {
            println!("role: {}", report.role.as_deref().unwrap_or("-"));
            if let Some(sub) = &report.subject {
                println!("subject: {}", sub);
            }
            println!(
                "expires_at: {}{}",
                report.expires_at.as_deref().unwrap_or("-"),
                if report.expired == Some(true) {
                    " (expired)"
                } else {
                    ""
                }
            );
        }
    }
    println!(
        "refresh_count: {}",
        report.refresh_count.as_deref().unwrap_or("0")
    );
    if let Some(last) = &report.last_access {
        println!("last_access: {}", last);
    }
    Ok(())
}

pub(super) fn handle_forgot_password_command(ctx: &CliContext, email: &str) -> Result<()> {
    ctx.remote.forgot_password(email)?;
    println!("If an account exists for that email, a reset link has been sent.");
    Ok(())
}

pub(super) fn handle_signup_command(ctx: &CliContext, args: SignupArgs) -> Result<()> {
    let message = ctx.remote.signup_customer(&SignupRequest {
        full_name: args.full_name,
        email: args.email,
        phone: args.phone,
        password: args.password,
    })?;
    let message = message.trim();
    if message.is_empty() {
        println!("Signed up");
    } else {
        println!("{}", message);
    }
    Ok(())
}

fn format_ms(ms: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| ms.to_string())
}
