//! Orchestrator API interaction module
//!
//! Core functionality for talking to the NFV Orchestrator's REST API:
//! authentication, the generic request engine and typed resource agents.
//!
//! # Module Structure
//!
//! - [`auth`] - Password-grant token acquisition and the shared token state
//! - [`http`] - Generic request engine with the one-shot 401 retry
//! - [`agent`] - Typed CRUD and sub-path operations over one collection
//! - [`client`] - Endpoint configuration and agent construction

pub mod agent;
pub mod auth;
pub mod client;
pub mod http;

pub use agent::{ResourceAgent, ACCEPTED, CREATED_OR_NO_CONTENT, NO_CONTENT, OK};
pub use auth::{AuthError, Credentials, TokenManager};
pub use client::NfvoClient;
pub use http::{ApiError, RestClient};
