use std::sync::Arc;

use reqwest::blocking::Response;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::remote::RemoteClient;

use super::{LogoutReason, SessionGuard};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The session is over and the credential has been cleared.
    #[error("{0}")]
    Session(LogoutReason),

    /// The backend refused the request; the session stays intact.
    #[error("request failed ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    #[error("could not decode response")]
    Decode(#[source] reqwest::Error),

    #[error("could not encode request body")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn ends_session(&self) -> bool {
        matches!(self, ApiError::Session(_))
    }
}

/// Authenticated access to the backend for one dashboard role.
#[derive(Clone)]
pub struct Session {
    guard: Arc<SessionGuard>,
    remote: RemoteClient,
}

impl Session {
    pub fn new(guard: Arc<SessionGuard>, remote: RemoteClient) -> Self {
        Self { guard, remote }
    }

    pub fn guard(&self) -> &Arc<SessionGuard> {
        &self.guard
    }

    pub fn remote(&self) -> &RemoteClient {
        &self.remote
    }

    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(Method::GET, path, &[], None)
    }

    pub fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send_json(Method::GET, path, query, None)
    }

    pub fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;
        self.send_json(Method::POST, path, &[], Some(body))
    }

    pub fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.send_json(Method::POST, path, query, None)
    }

    pub fn put_json<B, T>(&self, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(ApiError::Encode)?;
        self.send_json(Method::PUT, path, &[], body)
    }

    /// POST whose success body is plain text rather than JSON.
    pub fn post_json_text<B>(&self, path: &str, body: &B) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(ApiError::Encode)?;
        let resp = self.execute(Method::POST, path, &[], Some(&body))?;
        resp.text().map_err(ApiError::Decode)
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let resp = self.execute(method, path, query, body.as_ref())?;
        resp.json::<T>().map_err(ApiError::Decode)
    }

    /// Sends a request behind the session guard. A 401 gets exactly one
    /// refresh and one retry; a second 401 ends the session.
    fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ApiError> {
        self.guard.ensure_valid().map_err(ApiError::Session)?;
        let access = self.current_access()?;

        let resp = self
            .remote
            .send_authorized(method.clone(), path, query, body, &access)
            .map_err(ApiError::Transport)?;
        if resp.status() != StatusCode::UNAUTHORIZED {
            return check_status(resp);
        }

        debug!(path, "backend rejected the access token; refreshing once");
        if !self.guard.refresh_after_unauthorized(&access) {
            return Err(self.end(LogoutReason::Unauthorized));
        }
        let access = self.current_access()?;
        let resp = self
            .remote
            .send_authorized(method, path, query, body, &access)
            .map_err(ApiError::Transport)?;
        if resp.status() == StatusCode::UNAUTHORIZED {
            return Err(self.end(LogoutReason::Unauthorized));
        }
        check_status(resp)
    }

    fn current_access(&self) -> Result<String, ApiError> {
        match self.guard.access_token() {
            Some(access) => Ok(access),
            None => Err(self.end(LogoutReason::MissingCredential)),
        }
    }

    fn end(&self, reason: LogoutReason) -> ApiError {
        self.guard.logout(reason);
        ApiError::Session(reason)
    }
}

fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default().trim().to_string();
    Err(ApiError::Status { status, body })
}
