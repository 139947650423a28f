//! Generic REST request engine for the orchestrator API
//!
//! Every API call goes through [`RestClient::exchange`], which owns the
//! whole request lifecycle: token attachment, the one-shot retry on 401,
//! the expected-status contract and JSON body handling.

use std::sync::Arc;

use reqwest::{header, Method, StatusCode};
use serde_json::Value;

use super::auth::{AuthError, TokenManager};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Failures of an API call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network-level failure before any status could be observed.
    #[error("request failed: {reason}")]
    Transport { reason: String },

    /// The orchestrator answered with a status the operation's contract
    /// does not allow.
    #[error("received wrong API status: expected {expected} obtained {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },

    /// The response body could not be (de)serialized.
    #[error("malformed response body: {reason}")]
    Malformed { reason: String },

    /// Both the original attempt and the single retry came back 401.
    #[error("unauthorized: the orchestrator rejected the request twice")]
    Unauthorized,

    /// Token acquisition failed before the request could be issued.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ApiError {
    pub(crate) fn malformed(cause: &dyn std::fmt::Display) -> Self {
        tracing::debug!(error = %cause, "body (de)serialization failed");
        ApiError::Malformed {
            reason: cause.to_string(),
        }
    }
}

/// Outcome of one attempt: either a final result or a 401 the caller may
/// retry after refreshing the token.
enum Attempt {
    Done(Option<Value>),
    Unauthorized,
}

/// HTTP engine bound to one resource collection
/// (`{scheme}://{host}:{port}/api/v{version}{path}`).
///
/// Cloning is cheap; all clones derived from one client configuration share
/// the same [`TokenManager`], so the process holds at most one token.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    tokens: Arc<TokenManager>,
}

impl RestClient {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: String,
        project_id: String,
        tokens: Arc<TokenManager>,
    ) -> Self {
        Self {
            http,
            base_url,
            project_id,
            tokens,
        }
    }

    /// Issues `method` against the collection root (empty `path`) or a
    /// sub-path, enforcing the `expected` status set.
    ///
    /// A 401 invalidates the shared token and retries the entire call
    /// exactly once; a second 401 surfaces as [`ApiError::Unauthorized`].
    /// `Ok(None)` means a success without a body (204, or an empty reply).
    pub async fn exchange(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        expected: &[StatusCode],
    ) -> Result<Option<Value>, ApiError> {
        let url = if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path)
        };

        match self.attempt(&method, &url, body, expected).await? {
            Attempt::Done(value) => Ok(value),
            Attempt::Unauthorized => {
                self.tokens.invalidate().await;
                tracing::debug!("401 from {}, refreshing token and retrying once", url);
                match self.attempt(&method, &url, body, expected).await? {
                    Attempt::Done(value) => Ok(value),
                    Attempt::Unauthorized => {
                        self.tokens.invalidate().await;
                        Err(ApiError::Unauthorized)
                    }
                }
            }
        }
    }

    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        expected: &[StatusCode],
    ) -> Result<Attempt, ApiError> {
        let token = self.tokens.bearer().await?;

        tracing::debug!("executing {} on {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(header::ACCEPT, "application/json")
            .header("project-id", &self.project_id);
        if let Some(token) = token.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(error = %e, "transport failure on {}", url);
            ApiError::Transport {
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport {
            reason: e.to_string(),
        })?;

        if status == StatusCode::UNAUTHORIZED {
            return Ok(Attempt::Unauthorized);
        }

        if !expected.contains(&status) {
            tracing::debug!(
                "status expected: {:?} obtained: {} - {}",
                expected,
                status,
                sanitize_for_log(&text)
            );
            return Err(ApiError::UnexpectedStatus {
                expected: expected.first().map(|s| s.as_u16()).unwrap_or(200),
                actual: status.as_u16(),
            });
        }

        if status == StatusCode::NO_CONTENT || text.is_empty() {
            return Ok(Attempt::Done(None));
        }

        tracing::trace!("received: {}", sanitize_for_log(&text));

        let value = serde_json::from_str(&text).map_err(|e| ApiError::malformed(&e))?;
        Ok(Attempt::Done(Some(value)))
    }
}
