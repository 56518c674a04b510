use super::account::{
    handle_change_password_command, handle_forgot_password_command, handle_login_command, handle_logout_command,
    handle_signup_command, handle_status_command,
};
use super::console::handle_console_command;
use super::customer::handle_customer_command;
use super::employee::{
    handle_admin_command, handle_auditor_command, handle_loan_command, handle_support_command,
};
use super::*;

pub(super) fn handle_command(ctx: &CliContext, command: Commands) -> Result<()> {
    match command {
        Commands::Login { command } => handle_login_command(ctx, command)?,
        Commands::Logout(args) => handle_logout_command(ctx, args.portal)?,
        Commands::Status(args) => handle_status_command(ctx, args.portal, args.json)?,
        Commands::ForgotPassword(args) => handle_forgot_password_command(ctx, &args.email)?,
        Commands::Signup(args) => handle_signup_command(ctx, args)?,
        Commands::ChangePassword(args) => handle_change_password_command(ctx, args)?,
        Commands::Customer { command } => {
            with_session(ctx, Role::Customer, |s| handle_customer_command(s, command))?
        }
        Commands::Auditor { command } => {
            with_session(ctx, Role::Auditor, |s| handle_auditor_command(s, command))?
        }
        Commands::Loans { command } => {
            with_session(ctx, Role::LoanOfficer, |s| handle_loan_command(s, command))?
        }
        Commands::Support { command } => with_session(ctx, Role::CustomerSupport, |s| {
            handle_support_command(s, command)
        })?,
        Commands::Admin { command } => {
            with_session(ctx, Role::SuperAdmin, |s| handle_admin_command(s, command))?
        }
        Commands::Console(args) => handle_console_command(ctx, args.role)?,
    }

    Ok(())
}
