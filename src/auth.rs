//! Session authentication against the hub's `users` auth collection

use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::client::BeszelClient;
use crate::error::BeszelResult;
use crate::models::{AuthResponse, Record};
use crate::transport::Transport;

const AUTH_WITH_PASSWORD_PATH: &str = "/api/collections/users/auth-with-password";
const AUTH_REFRESH_PATH: &str = "/api/collections/users/auth-refresh";

impl<T: Transport> BeszelClient<T> {
    /// Exchange credentials for a token and keep it for later requests.
    ///
    /// Sent without any existing token. On failure the session token is
    /// left as it was.
    pub fn login(&mut self, email: &str, password: &str) -> BeszelResult<String> {
        let body = json!({ "identity": email, "password": password });
        let value = self.post_unauthenticated(AUTH_WITH_PASSWORD_PATH, &body)?;
        let auth: AuthResponse = serde_json::from_value(value)?;

        info!("Authenticated against {}", self.base_url());
        self.set_token(auth.token.clone());
        Ok(auth.token)
    }

    /// Renew the current token; also returns the authenticated user record
    pub fn auth_refresh(&self) -> BeszelResult<AuthResponse> {
        let value = self.request(Method::POST, AUTH_REFRESH_PATH, &[], Some(&json!({})))?;
        Ok(serde_json::from_value(value)?)
    }

    /// The authenticated user, or an empty record if the hub sent none
    pub fn current_user(&self) -> BeszelResult<Record> {
        Ok(self.auth_refresh()?.record)
    }
}
