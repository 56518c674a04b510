//! Request/response payloads for the authentication endpoints.

use serde::{Deserialize, Serialize};

/// Body of a successful login or refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,

    /// Absent when the backend keeps the previous refresh token alive.
    #[serde(default)]
    pub refresh_token: Option<String>,

    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CustomerLoginRequest<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EmployeeLoginRequest<'a> {
    pub(super) employee_id: &'a str,
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RefreshRequest<'a> {
    pub(super) refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct ForgotPasswordRequest<'a> {
    pub(super) email: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Spring-style page envelope used by the paginated list endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,

    #[serde(default)]
    pub last: bool,

    #[serde(default)]
    pub total_elements: u64,

    #[serde(default)]
    pub total_pages: u32,

    #[serde(default)]
    pub number: u32,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        !self.last
    }
}
