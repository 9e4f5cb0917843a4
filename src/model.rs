use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Method {
    Get,
    Post,
    Delete,
    Put,
    Patch,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let method = match *self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
        };
        f.write_str(method)
    }
}

/// An outgoing call as it travels through the pipeline.
///
/// `target` is whatever the caller passed: a path relative to the configured
/// base URL or an absolute URL. Joining happens in the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: Method, target: &str) -> Request {
        Request {
            method,
            target: target.to_string(),
            headers: vec![],
            query: vec![],
            body: None,
        }
    }

    /// Sets a header, replacing any existing header with the same name.
    /// Names compare case-insensitively.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.to_string()));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub headers: Vec<(String, String)>,
    /// Parsed JSON when the body parses, the raw text as a string otherwise,
    /// `Value::Null` when the body is empty.
    pub body: Value,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parses a raw response body the way the server's JSON responses are read.
    pub fn parse_body(text: &str) -> Value {
        if text.trim().is_empty() {
            return Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    /// The response as a JSON object: `{ "status", "headers", "data" }`.
    pub fn to_value(&self) -> Value {
        let headers: Map<String, Value> = self
            .headers
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();
        let mut object = Map::new();
        object.insert("status".to_string(), Value::from(self.status_code));
        object.insert("headers".to_string(), Value::Object(headers));
        object.insert("data".to_string(), self.body.clone());
        Value::Object(object)
    }
}
