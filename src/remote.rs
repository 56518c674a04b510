use anyhow::{Context, Result};

mod auth;
mod http_client;
mod types;

pub use self::types::*;

/// Thin blocking client for the banking backend. It knows the endpoints and
/// wire formats but holds no credential; authenticated calls go through
/// [`crate::session::Session`].
#[derive(Clone, Debug)]
pub struct RemoteClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("bankdesk")
            .build()
            .context("build reqwest client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
