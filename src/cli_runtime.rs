use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use bankdesk::model::{AppConfig, Role};
use bankdesk::remote::RemoteClient;
use bankdesk::session::{
    ApiError, LogoutHandler, LogoutNotice, LogoutReason, Session, SessionGuard,
};
use bankdesk::store::{FileStore, LocalStore};

use crate::Commands;

#[derive(Parser)]
#[command(name = "bankdesk")]
#[command(about = "Banking back-office client", long_about = None)]
pub(crate) struct Cli {
    /// State directory (defaults to $BANKDESK_HOME, then ./.bankdesk)
    #[arg(long, global = true, value_name = "PATH")]
    home: Option<PathBuf>,

    /// Backend base URL (overrides $BANKDESK_BASE_URL and config.json)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

pub(crate) fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ctx = CliContext::open(cli.home, cli.base_url)?;
    crate::cli_exec::handle_command(&ctx, cli.command)
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "bankdesk=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Everything a command needs: the state directory, its config and a client
/// for the configured backend.
pub(crate) struct CliContext {
    pub(crate) store: LocalStore,
    pub(crate) config: AppConfig,
    pub(crate) remote: RemoteClient,
    pub(crate) sessions: Arc<FileStore>,
}

impl CliContext {
    fn open(home: Option<PathBuf>, base_url: Option<String>) -> Result<Self> {
        let root = match home.or_else(|| std::env::var_os("BANKDESK_HOME").map(PathBuf::from)) {
            Some(root) => root,
            None => std::env::current_dir()
                .context("get current dir")?
                .join(".bankdesk"),
        };
        let store = LocalStore::open_or_init(&root)?;
        let config = store.read_config()?;

        let base_url = base_url
            .or_else(|| std::env::var("BANKDESK_BASE_URL").ok())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| config.base_url.clone());
        let remote = RemoteClient::new(base_url)?;
        let sessions = Arc::new(store.session_store());

        Ok(Self {
            store,
            config,
            remote,
            sessions,
        })
    }

    pub(crate) fn guard(&self, role: Role) -> SessionGuard {
        SessionGuard::new(
            self.config.policy_for(role),
            self.sessions.clone(),
            Arc::new(self.remote.clone()),
        )
        .with_logout_handler(Arc::new(CliLogoutHandler))
    }
}

pub(crate) fn open_session(ctx: &CliContext, role: Role) -> Session {
    Session::new(Arc::new(ctx.guard(role)), ctx.remote.clone())
}

/// Prints the logout message and where to sign in again.
struct CliLogoutHandler;

impl LogoutHandler for CliLogoutHandler {
    fn logged_out(&self, notice: &LogoutNotice) {
        if notice.reason == LogoutReason::UserLogout {
            println!("Logged out of the {} portal", notice.portal);
            return;
        }
        eprintln!("{}", notice.message());
        eprintln!(
            "hint: run `bankdesk login {}` to sign in again",
            notice.portal
        );
    }
}

pub(crate) fn is_session_end(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ApiError>()
        .is_some_and(ApiError::ends_session)
}
