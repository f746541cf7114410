//! Identity provider: Firebase Authentication over the Identity Toolkit REST API.
//!
//! The provider is an opaque capability: it verifies credentials and reports an
//! `Identity`. Sessions are issued by this service, not by the provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::session::Identity;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider refused the request (bad credentials, duplicate email, ...).
    #[error("Request rejected by identity provider: {0}")]
    Rejected(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Identity provider error (status {status}): {message}")]
    Provider { status: u16, message: String },
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    profile_picture: Option<String>,
}

impl AccountResponse {
    fn into_identity(self, requested_email: &str) -> Identity {
        Identity {
            uid: self.local_id,
            email: self.email.unwrap_or_else(|| requested_email.to_string()),
            display_name: self.display_name.filter(|n| !n.is_empty()),
            photo_url: self.profile_picture.filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct FirebaseAuthClient {
    client: Client,
    api_key: String,
}

impl FirebaseAuthClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn post(
        &self,
        method: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, AuthError> {
        let url = format!("{IDENTITY_TOOLKIT_URL}/accounts:{method}");
        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = parse_provider_message(&body);
        if status.as_u16() == 400 {
            debug!("Identity provider rejected {method}: {message}");
            return Err(AuthError::Rejected(message));
        }
        warn!("Identity provider returned {status} for {method}: {message}");
        Err(AuthError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}

/// Extracts `error.message` from a provider error body, falling back to the raw body.
fn parse_provider_message(body: &str) -> String {
    serde_json::from_str::<ProviderError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[async_trait]
impl AuthProvider for FirebaseAuthClient {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let response = self
            .post(
                "signInWithPassword",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        let account: AccountResponse = response.json().await?;
        Ok(account.into_identity(email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let response = self
            .post(
                "signUp",
                json!({ "email": email, "password": password, "returnSecureToken": true }),
            )
            .await?;
        let account: AccountResponse = response.json().await?;
        Ok(account.into_identity(email))
    }

    async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        self.post(
            "sendOobCode",
            json!({ "requestType": "PASSWORD_RESET", "email": email }),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_message() {
        let body = r#"{"error": {"code": 400, "message": "EMAIL_NOT_FOUND", "errors": []}}"#;
        assert_eq!(parse_provider_message(body), "EMAIL_NOT_FOUND");
    }

    #[test]
    fn test_parse_provider_message_falls_back_to_body() {
        assert_eq!(parse_provider_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_account_response_to_identity() {
        let raw = r#"{
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "abc123",
            "email": "sam@example.com",
            "displayName": "",
            "idToken": "ignored",
            "registered": true
        }"#;
        let account: AccountResponse = serde_json::from_str(raw).unwrap();
        let identity = account.into_identity("other@example.com");
        assert_eq!(identity.uid, "abc123");
        assert_eq!(identity.email, "sam@example.com");
        assert!(identity.display_name.is_none(), "empty names are dropped");
        assert!(identity.photo_url.is_none());
    }

    #[test]
    fn test_account_response_without_email_uses_requested() {
        let account: AccountResponse = serde_json::from_str(r#"{"localId": "x"}"#).unwrap();
        assert_eq!(account.into_identity("me@example.com").email, "me@example.com");
    }
}
