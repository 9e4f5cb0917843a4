//! # api-pipeline
//!
//! HTTP client pipeline for the mobile app's backend. Every call gets an
//! `X-Timezone` header and, when a token is stored, an `Authorization`
//! header. Successful responses are unwrapped from the server's envelope and
//! failures come back as a single [`RequestFailure`] carrying a message.
//!
//! ## Usage
//!
//! ```no_run
//! use api_pipeline::{ClientConfig, MemoryCredentialStore, RequestPipeline};
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env();
//! let store = Arc::new(MemoryCredentialStore::with_token("secret"));
//! let pipeline = RequestPipeline::create(&config, store)?;
//!
//! let profile: Value = pipeline.get("/me", None).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Envelopes
//!
//! A success body with a `variant` key is an envelope and its `myData` field
//! is the payload. Any other body is returned as is.
//!
//! ```text,no_run
//! { "variant": "ok", "myData": { "id": 1 } }   =>   { "id": 1 }
//! [1, 2, 3]                                     =>   [1, 2, 3]
//! ```
//!
//! ## Errors
//!
//! The failure message is the server's `message` field when there is one,
//! else the transport's message, else `Network error`.

pub mod config;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod model;
pub mod pipeline;
pub mod timezone;

pub use crate::config::ClientConfig;
pub use crate::credentials::{CredentialStore, EnvCredentialStore, MemoryCredentialStore};
pub use crate::envelope::{Resolved, ResponseEnvelope};
pub use crate::error::{RequestFailure, TransportError};
pub use crate::http_client::reqwest::ReqwestHttpClient;
pub use crate::http_client::HttpClient;
pub use crate::model::{Method, Request, Response};
pub use crate::pipeline::{RequestOptions, RequestPipeline};
pub use crate::timezone::{FixedTimezone, SystemTimezone, TimezoneSource};
