use super::*;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    email: &'a str,
    current_password: &'a str,
    new_password: &'a str,
}

impl Session {
    /// Changes the signed-in user's password. Any role may call it; the
    /// backend answers with a plain-text confirmation.
    pub fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<String, ApiError> {
        self.post_json_text(
            "/users/change-password",
            &ChangePasswordRequest {
                email,
                current_password,
                new_password,
            },
        )
    }
}
