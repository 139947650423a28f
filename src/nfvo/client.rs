//! Orchestrator client
//!
//! Main entry point for talking to the orchestrator: holds the endpoint
//! configuration and the shared token manager, and derives typed
//! [`ResourceAgent`]s for individual resource collections.

use std::sync::Arc;

use anyhow::{Context, Result};
use url::Url;

use super::agent::ResourceAgent;
use super::auth::{Credentials, TokenManager};
use super::http::RestClient;
use crate::catalogue::ResourceKind;
use crate::config::Config;

/// Client configuration for one orchestrator endpoint.
///
/// Every agent derived from the same client shares one [`TokenManager`],
/// giving the process a single authentication identity.
pub struct NfvoClient {
    http: reqwest::Client,
    endpoint: String,
    version: String,
    project_id: String,
    tokens: Arc<TokenManager>,
}

impl NfvoClient {
    /// Create a client from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = config.endpoint();
        Url::parse(&endpoint)
            .with_context(|| format!("invalid orchestrator endpoint: {endpoint}"))?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("nfvctl/", env!("CARGO_PKG_VERSION")));
        if config.ssl_enabled {
            // The orchestrator ships with a self-signed certificate.
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build().context("failed to create HTTP client")?;

        let tokens = Arc::new(TokenManager::new(
            http.clone(),
            format!("{endpoint}/oauth/token"),
            Credentials::new(config.username.clone(), config.password.clone()),
        ));

        Ok(Self {
            http,
            endpoint,
            version: config.api_version.clone(),
            project_id: config.project_id.clone(),
            tokens,
        })
    }

    /// Derive a typed agent for the resource collection at `path`
    /// (e.g. `/datacenters`), sharing this client's token.
    pub fn agent<T: ResourceKind>(&self, path: &str) -> ResourceAgent<T> {
        ResourceAgent::new(RestClient::new(
            self.http.clone(),
            format!("{}/api/v{}{}", self.endpoint, self.version, path),
            self.project_id.clone(),
            Arc::clone(&self.tokens),
        ))
    }
}
