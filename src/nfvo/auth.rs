//! Orchestrator authentication
//!
//! Acquires a bearer token through the password-grant exchange the
//! orchestrator exposes at `/oauth/token` and holds it for the lifetime
//! of the process. There is no expiry timer; a stale token is discovered
//! reactively when a request comes back 401 and [`TokenManager::invalidate`]
//! is called.

use serde::Deserialize;
use tokio::sync::Mutex;

/// Fixed client identity the orchestrator issues password-grant tokens to.
const OAUTH_CLIENT_ID: &str = "openbatonOSClient";
const OAUTH_CLIENT_SECRET: &str = "secret";

/// Failures of the token exchange.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Network failure or an unparseable reply from the token endpoint.
    #[error("token exchange failed: {reason}")]
    Transport { reason: String },

    /// The orchestrator reported `invalid_grant` for the supplied account.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Any other non-200 reply from the token endpoint.
    #[error("token endpoint returned {status}: {message}")]
    ServerRejected { status: u16, message: String },
}

/// Account used for every request issued by one client configuration.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Anonymous clients skip the token exchange and send unauthenticated
    /// requests.
    pub fn is_anonymous(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

/// Reply of the token endpoint. A success carries `value`, a failure an
/// `error`/`error_description` pair.
#[derive(Debug, Deserialize)]
struct TokenReply {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Holds the single access token shared by every agent derived from one
/// client configuration.
pub struct TokenManager {
    http: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    // Guards check-and-refresh as one critical section so two callers can
    // never both see an absent token and issue duplicate exchanges.
    token: Mutex<Option<String>>,
}

impl TokenManager {
    pub fn new(http: reqwest::Client, token_url: String, credentials: Credentials) -> Self {
        Self {
            http,
            token_url,
            credentials,
            token: Mutex::new(None),
        }
    }

    /// Returns the current bearer token, performing the password-grant
    /// exchange first if none is held. `None` in anonymous mode.
    pub async fn bearer(&self) -> Result<Option<String>, AuthError> {
        if self.credentials.is_anonymous() {
            return Ok(None);
        }
        let mut held = self.token.lock().await;
        if let Some(token) = held.as_ref() {
            return Ok(Some(token.clone()));
        }
        let token = self.exchange().await?;
        *held = Some(token.clone());
        Ok(Some(token))
    }

    /// Drops the held token. Called after any request using it came back
    /// unauthorized; the next call acquires a fresh one.
    pub async fn invalidate(&self) {
        let mut held = self.token.lock().await;
        if held.take().is_some() {
            tracing::debug!("access token invalidated");
        }
    }

    async fn exchange(&self) -> Result<String, AuthError> {
        tracing::debug!("requesting access token from {}", self.token_url);

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(OAUTH_CLIENT_ID, Some(OAUTH_CLIENT_SECRET))
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport(&e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| transport(&e))?;

        let reply: TokenReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            // A 200 that is not JSON is a broken endpoint; a non-200 that is
            // not JSON is still a rejection and keeps its status.
            Err(e) if status.as_u16() == 200 => {
                tracing::debug!(error = %e, "token reply was not valid JSON");
                return Err(AuthError::Transport {
                    reason: "token endpoint sent a malformed reply".to_string(),
                });
            }
            Err(_) => {
                return Err(AuthError::ServerRejected {
                    status: status.as_u16(),
                    message: "no error description".to_string(),
                })
            }
        };

        if status.as_u16() != 200 {
            return Err(reject(status.as_u16(), reply));
        }

        match reply.value {
            Some(token) => {
                tracing::debug!("access token acquired");
                Ok(token)
            }
            // A 200 without a token still carries the error pair on some
            // orchestrator versions.
            None => Err(reject(status.as_u16(), reply)),
        }
    }
}

fn transport(cause: &reqwest::Error) -> AuthError {
    tracing::debug!(error = %cause, "token endpoint transport failure");
    AuthError::Transport {
        reason: cause.to_string(),
    }
}

fn reject(status: u16, reply: TokenReply) -> AuthError {
    let description = reply
        .error_description
        .unwrap_or_else(|| "no error description".to_string());
    match reply.error.as_deref() {
        Some("invalid_grant") => AuthError::InvalidCredentials(description),
        _ => AuthError::ServerRejected {
            status,
            message: description,
        },
    }
}
