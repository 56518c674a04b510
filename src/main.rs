mod cli_commands;
mod cli_exec;
mod cli_runtime;
mod cli_subcommands;

pub(crate) use cli_commands::Commands;
pub(crate) use cli_runtime::{CliContext, open_session};
pub(crate) use cli_subcommands::{
    AdminCommands, AuditorCommands, CustomerCommands, LoanCommands, LoginCommands,
    SupportCommands,
};

fn main() {
    if let Err(err) = cli_runtime::run() {
        // The logout handler has already told the user why the session ended.
        if !cli_runtime::is_session_end(&err) {
            eprintln!("{:#}", err);
        }
        std::process::exit(1);
    }
}
