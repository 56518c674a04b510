use clap::Subcommand;

use crate::{
    AdminCommands, AuditorCommands, CustomerCommands, LoanCommands, LoginCommands,
    SupportCommands,
};

pub(crate) mod account;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Sign in through the customer or employee portal
    Login {
        #[command(subcommand)]
        command: LoginCommands,
    },

    /// Clear a portal's stored credential
    Logout(account::LogoutArgs),

    /// Show the stored credential and its claims
    Status(account::StatusArgs),

    /// Request a password reset email
    #[command(name = "forgot-password")]
    ForgotPassword(account::ForgotPasswordArgs),

    /// Register a new customer
    Signup(account::SignupArgs),

    /// Change the signed-in user's password
    #[command(name = "change-password")]
    ChangePassword(account::ChangePasswordArgs),

    /// Customer dashboard
    Customer {
        #[command(subcommand)]
        command: CustomerCommands,
    },

    /// Auditor dashboard
    Auditor {
        #[command(subcommand)]
        command: AuditorCommands,
    },

    /// Loan officer dashboard
    Loans {
        #[command(subcommand)]
        command: LoanCommands,
    },

    /// Customer support dashboard
    Support {
        #[command(subcommand)]
        command: SupportCommands,
    },

    /// Super admin dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Interactive session with idle timeout
    Console(account::ConsoleArgs),
}
