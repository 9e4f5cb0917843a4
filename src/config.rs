use std::time::Duration;

pub const BASE_URL_ENV: &str = "EXPO_PUBLIC_API_BASE_URL";
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(20_000);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub default_headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            default_headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads the base URL from `EXPO_PUBLIC_API_BASE_URL`. Unset or empty
    /// falls back to `http://localhost:4000`.
    pub fn from_env() -> Self {
        Self::from_base_url(std::env::var(BASE_URL_ENV).ok())
    }

    pub(crate) fn from_base_url(base_url: Option<String>) -> Self {
        match base_url {
            Some(base_url) if !base_url.trim().is_empty() => Self::new(base_url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.default_headers
            .retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.default_headers
            .push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
