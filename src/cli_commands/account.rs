use clap::Args;

use bankdesk::model::{Portal, Role};

#[derive(Args)]
pub(crate) struct LogoutArgs {
    #[arg(long, default_value = "customer")]
    pub(crate) portal: Portal,
}

#[derive(Args)]
pub(crate) struct StatusArgs {
    #[arg(long, default_value = "customer")]
    pub(crate) portal: Portal,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ForgotPasswordArgs {
    #[arg(long)]
    pub(crate) email: String,
}

#[derive(Args)]
pub(crate) struct SignupArgs {
    #[arg(long)]
    pub(crate) full_name: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) phone: String,
    #[arg(long)]
    pub(crate) password: String,
}

#[derive(Args)]
pub(crate) struct ChangePasswordArgs {
    /// Role whose session sends the change
    #[arg(long, default_value = "customer")]
    pub(crate) role: Role,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long)]
    pub(crate) current_password: String,
    #[arg(long)]
    pub(crate) new_password: String,
}

#[derive(Args)]
pub(crate) struct ConsoleArgs {
    /// Role whose dashboard session to hold open
    #[arg(long)]
    pub(crate) role: Role,
}
