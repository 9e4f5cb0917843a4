//! Response envelope detection and payload extraction.
//!
//! The server may wrap successful payloads in an envelope:
//!
//! ```text,no_run
//! { "variant": "ok", "myData": { "id": 1 } }
//! ```
//!
//! Anything else is an ordinary body and is returned as is. The full response
//! object, `{ "status", "headers", "data" }`, is still reachable through
//! [`Resolved::into_value`].

use crate::error::NETWORK_ERROR;
use crate::model::Response;
use serde_json::{Map, Value};


pub const VARIANT_FIELD: &str = "variant";
pub const PAYLOAD_FIELD: &str = "myData";
pub const DATA_FIELD: &str = "data";
pub const MESSAGE_FIELD: &str = "message";

/// An envelope body, kept exactly as the server sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    body: Map<String, Value>,
}

static NULL: Value = Value::Null;

impl ResponseEnvelope {
    /// A body is an envelope when it is a JSON object with a `variant` key,
    /// whatever the key's value.
    pub fn detect(body: &Value) -> Option<ResponseEnvelope> {
        match body {
            Value::Object(object) if object.contains_key(VARIANT_FIELD) => Some(ResponseEnvelope {
                body: object.clone(),
            }),
            _ => None,
        }
    }

    pub fn variant(&self) -> &Value {
        self.body.get(VARIANT_FIELD).unwrap_or(&NULL)
    }

    /// The `myData` field. `Some(Value::Null)` when the server sent an
    /// explicit null.
    pub fn my_data(&self) -> Option<&Value> {
        self.body.get(PAYLOAD_FIELD)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    pub fn into_body(self) -> Value {
        Value::Object(self.body)
    }
}

/// What the response stage hands back for a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// The body was an envelope; it takes precedence over the response.
    Envelope(ResponseEnvelope),
    Response(Response),
}

impl Resolved {
    pub fn from_response(response: Response) -> Resolved {
        match ResponseEnvelope::detect(&response.body) {
            Some(envelope) => Resolved::Envelope(envelope),
            None => Resolved::Response(response),
        }
    }

    /// The envelope body untouched, or the full response object.
    pub fn into_value(self) -> Value {
        match self {
            Resolved::Envelope(envelope) => envelope.into_body(),
            Resolved::Response(response) => response.to_value(),
        }
    }

    /// Extracts the payload. For an envelope: `myData`, then `data`, then the
    /// envelope itself, skipping null fields. For any other response: the
    /// body, empty bodies included.
    pub fn into_payload(self) -> Value {
        match self {
            Resolved::Envelope(envelope) => extract_payload(envelope.into_body()),
            Resolved::Response(response) => response.body,
        }
    }
}

pub fn extract_payload(resolved: Value) -> Value {
    if let Value::Object(object) = &resolved {
        for field in [PAYLOAD_FIELD, DATA_FIELD] {
            match object.get(field) {
                Some(Value::Null) | None => continue,
                Some(value) => return value.clone(),
            }
        }
    }
    resolved
}

/// The message a failed call is reported with: the server's `message`, else
/// the transport's message, else `Network error`.
pub fn failure_message(error_body: Option<&Value>, transport_message: Option<&str>) -> String {
    if let Some(message) = error_body
        .and_then(|body| body.get(MESSAGE_FIELD))
        .and_then(truthy_message)
    {
        return message;
    }
    match transport_message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => NETWORK_ERROR.to_string(),
    }
}

fn truthy_message(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(display_string(other)),
    }
}

/// Renders a value the way the mobile app's error messages always showed it:
/// arrays joined with commas, objects as `[object Object]`.
fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
