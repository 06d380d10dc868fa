//! Login and logout calls.
//!
//! Login is the one call that legitimately goes out unauthenticated; on
//! success the issued token is persisted and every later call picks it up.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{Ack, ApiClient};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

impl ApiClient {
    /// Authenticates against the backend and stores the issued token.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the credentials or the
    /// token cannot be persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response: LoginResponse = self
            .post_json("/api/auth/login", &LoginRequest { username, password })
            .await
            .context("Login failed")?;

        self.session()
            .set(&response.token)
            .context("Failed to store session token")?;
        tracing::debug!("logged in as {username}");
        Ok(())
    }

    /// Ends the session: best-effort server-side invalidation, then local
    /// teardown.
    ///
    /// The local state is cleared even when the backend is unreachable; a
    /// failing backend must never keep the client logged in.
    pub async fn logout(&self) -> Result<()> {
        if self.session().is_authenticated() {
            if let Err(e) = self.post_empty::<Ack>("/api/auth/logout").await {
                tracing::debug!("server-side logout failed: {e:#}");
            }
        }

        self.session().clear().context("Failed to clear session")?;
        self.nav().force_login();
        Ok(())
    }
}
