use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http_client::HttpClient;
use crate::model::{Method, Request, Response};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Url};

pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
}

impl ReqwestHttpClient {
    pub fn create(config: &ClientConfig) -> Result<ReqwestHttpClient> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base URL: {}", config.base_url))?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            default_headers.insert(
                HeaderName::try_from(name.as_str())
                    .with_context(|| format!("Invalid default header name: {}", name))?,
                HeaderValue::try_from(value.as_str())
                    .with_context(|| format!("Invalid value for default header {}", name))?,
            );
        }

        let client = Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .context("Failed building HTTP client")?;

        Ok(ReqwestHttpClient { client, base_url })
    }

    /// Absolute targets are used as they are, anything else is appended to
    /// the base URL.
    pub(crate) fn url(&self, target: &str) -> Result<Url, TransportError> {
        if is_absolute(target) {
            return Url::parse(target).map_err(|e| TransportError::new(e.to_string()));
        }
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = target.trim_start_matches('/');
        Url::parse(&format!("{}/{}", base, path)).map_err(|e| TransportError::new(e.to_string()))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let Request {
            method,
            target,
            headers,
            query,
            body,
        } = request;
        let url = self.url(&target)?;
        let mut request_builder = self.client.request(method.into(), url);
        request_builder = set_headers(&headers, request_builder);
        if !query.is_empty() {
            request_builder = request_builder.query(&query);
        }
        if let Some(body) = body {
            request_builder = request_builder.json(&body);
        }

        let response = request_builder.send().await?;
        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let text = response.text().await?;

        Ok(Response {
            status_code,
            headers,
            body: Response::parse_body(&text),
        })
    }
}

/// `scheme://...` with a scheme of a letter followed by letters, digits, `+`,
/// `-` or `.`. A bare `name:rest` is a relative path.
fn is_absolute(target: &str) -> bool {
    match target.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().map_or(false, |c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

fn set_headers(headers: &[(String, String)], mut request_builder: RequestBuilder) -> RequestBuilder {
    for (key, value) in headers {
        request_builder = request_builder.header(key, value);
    }
    request_builder
}

// Non UTF-8 header values are skipped; nothing downstream reads them.
fn collect_headers(value: &HeaderMap) -> Vec<(String, String)> {
    value
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.to_string(), value.to_string()))
        })
        .collect()
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}
