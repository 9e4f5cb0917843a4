//! The request pipeline.
//!
//! Every call goes through the same stages:
//!
//! 1. request stage: default headers, per-call headers, then `X-Timezone` and
//!    `Authorization`
//! 2. transport
//! 3. response stage: envelope detection on success, a single normalized
//!    [`RequestFailure`] otherwise
//! 4. payload extraction for [`RequestPipeline::get`] and
//!    [`RequestPipeline::post`]

use crate::config::ClientConfig;
use crate::credentials::{bearer, CredentialStore, TOKEN_KEY};
use crate::envelope::{failure_message, Resolved};
use crate::error::{RequestFailure, TransportError};
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::model::{Method, Request, Response};
use crate::timezone::{self, SystemTimezone, TimezoneSource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;


pub const TIMEZONE_HEADER: &str = "X-Timezone";
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Per-call overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> RequestOptions {
        RequestOptions::default()
    }

    pub fn header(mut self, name: &str, value: &str) -> RequestOptions {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn query(mut self, name: &str, value: &str) -> RequestOptions {
        self.query.push((name.to_string(), value.to_string()));
        self
    }
}

#[derive(Clone)]
pub struct RequestPipeline {
    client: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialStore>,
    timezone: Arc<dyn TimezoneSource>,
}

impl RequestPipeline {
    pub fn new(
        client: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialStore>,
        timezone: Arc<dyn TimezoneSource>,
    ) -> RequestPipeline {
        RequestPipeline {
            client,
            credentials,
            timezone,
        }
    }

    /// Builds a pipeline over reqwest using the system timezone.
    pub fn create(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> anyhow::Result<RequestPipeline> {
        let client = ReqwestHttpClient::create(config)?;
        Ok(RequestPipeline::new(
            Arc::new(client),
            credentials,
            Arc::new(SystemTimezone),
        ))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<T, RequestFailure> {
        let resolved = self.request(Method::Get, url, None, options).await?;
        into_payload(resolved)
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        url: &str,
        body: Option<Value>,
        options: Option<RequestOptions>,
    ) -> Result<T, RequestFailure> {
        let resolved = self.request(Method::Post, url, body, options).await?;
        into_payload(resolved)
    }

    /// Runs one call through the pipeline and returns the response stage's
    /// result, before payload extraction.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        options: Option<RequestOptions>,
    ) -> Result<Resolved, RequestFailure> {
        let mut request = Request::new(method, url);
        request.body = body;
        if let Some(RequestOptions { headers, query }) = options {
            for (name, value) in headers {
                request.set_header(&name, &value);
            }
            request.query = query;
        }

        let request = self.prepare(request).await;
        tracing::debug!(method = %request.method, target = %request.target, "sending request");
        let outcome = self.client.execute(request).await;
        resolve(outcome)
    }

    /// The request stage. Never fails: timezone and credential problems
    /// degrade to `UTC` and an unauthenticated request.
    pub async fn prepare(&self, mut request: Request) -> Request {
        request.set_header(TIMEZONE_HEADER, &timezone::resolve(self.timezone.as_ref()));

        match self.credentials.get(TOKEN_KEY).await {
            Ok(Some(token)) => {
                if let Some(authorization) = bearer(&token) {
                    request.set_header(AUTHORIZATION_HEADER, &authorization);
                }
            }
            Ok(None) => tracing::trace!("no stored token, sending unauthenticated"),
            Err(e) => {
                tracing::debug!(error = %e, "reading stored token failed, sending unauthenticated")
            }
        }
        request
    }
}

/// The response stage.
pub fn resolve(outcome: Result<Response, TransportError>) -> Result<Resolved, RequestFailure> {
    match outcome {
        Ok(response) if response.is_success() => Ok(Resolved::from_response(response)),
        Ok(response) => {
            let status_message = format!("Request failed with status code {}", response.status_code);
            let message = failure_message(Some(&response.body), Some(&status_message));
            tracing::debug!(status = response.status_code, %message, "request failed");
            Err(RequestFailure::new(message))
        }
        Err(e) => {
            let message = failure_message(None, Some(e.message()));
            tracing::debug!(%message, "request failed without a response");
            Err(RequestFailure::new(message))
        }
    }
}

fn into_payload<T: DeserializeOwned>(resolved: Resolved) -> Result<T, RequestFailure> {
    serde_json::from_value(resolved.into_payload()).map_err(|e| RequestFailure::new(e.to_string()))
}
