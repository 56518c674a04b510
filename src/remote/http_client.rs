use reqwest::Method;
use reqwest::blocking::Response;

use super::*;

impl RemoteClient {
    pub(super) fn ensure_ok(&self, resp: Response, label: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        let body = body.trim();
        if body.is_empty() {
            anyhow::bail!("{} failed ({})", label, status);
        }
        anyhow::bail!("{} failed ({}): {}", label, status, body)
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request with a bearer token. Status handling is left to
    /// the caller so a 401 can drive the refresh-and-retry path.
    pub fn send_authorized(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
        access_token: &str,
    ) -> reqwest::Result<Response> {
        let mut req = self
            .client
            .request(method, self.url(path))
            .bearer_auth(access_token);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send()
    }
}
