use anyhow::{Context, Result};
use serde::Serialize;

use bankdesk::model::Role;
use bankdesk::session::Session;

use crate::{
    AdminCommands, AuditorCommands, CliContext, Commands, CustomerCommands, LoanCommands,
    LoginCommands, SupportCommands, open_session,
};

mod account;
mod console;
mod customer;
mod dispatch;
mod employee;

pub(super) fn handle_command(ctx: &CliContext, command: Commands) -> Result<()> {
    dispatch::handle_command(ctx, command)
}

pub(super) fn print_json<T: Serialize>(value: &T, what: &str) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).with_context(|| format!("serialize {} json", what))?
    );
    Ok(())
}

pub(super) fn with_session<F>(ctx: &CliContext, role: Role, f: F) -> Result<()>
where
    F: FnOnce(&Session) -> Result<()>,
{
    let session = open_session(ctx, role);
    f(&session)
}
