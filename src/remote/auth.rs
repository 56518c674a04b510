use crate::session::TokenRefresher;

use super::*;

impl RemoteClient {
    pub fn login_customer(&self, email: &str, password: &str) -> Result<TokenPair> {
        let resp = self
            .client
            .post(self.url("/auth/customer/login"))
            .json(&CustomerLoginRequest { email, password })
            .send()
            .context("customer login")?;
        let pair: TokenPair = self
            .ensure_ok(resp, "customer login")?
            .json()
            .context("parse login response")?;
        Ok(pair)
    }

    pub fn login_employee(
        &self,
        employee_id: &str,
        email: &str,
        password: &str,
    ) -> Result<TokenPair> {
        let resp = self
            .client
            .post(self.url("/auth/employee/login"))
            .json(&EmployeeLoginRequest {
                employee_id,
                email,
                password,
            })
            .send()
            .context("employee login")?;
        let pair: TokenPair = self
            .ensure_ok(resp, "employee login")?
            .json()
            .context("parse login response")?;
        Ok(pair)
    }

    pub fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair> {
        let resp = self
            .client
            .post(self.url("/auth/refresh-token"))
            .json(&RefreshRequest { refresh_token })
            .send()
            .context("refresh token")?;
        let pair: TokenPair = self
            .ensure_ok(resp, "refresh token")?
            .json()
            .context("parse refresh response")?;
        Ok(pair)
    }

    /// The backend answers identically whether or not the address is
    /// registered, so only transport failures are reported.
    pub fn forgot_password(&self, email: &str) -> Result<()> {
        let resp = self
            .client
            .post(self.url("/auth/forgot-password"))
            .json(&ForgotPasswordRequest { email })
            .send()
            .context("forgot password")?;
        tracing::debug!(status = %resp.status(), "forgot-password answered");
        Ok(())
    }

    pub fn signup_customer(&self, req: &SignupRequest) -> Result<String> {
        let resp = self
            .client
            .post(self.url("/auth/customer/signup"))
            .json(req)
            .send()
            .context("customer signup")?;
        let text = self
            .ensure_ok(resp, "customer signup")?
            .text()
            .context("read signup response")?;
        Ok(text)
    }
}

impl TokenRefresher for RemoteClient {
    fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        self.refresh_token(refresh_token)
    }
}
