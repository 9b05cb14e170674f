//! Gateway-style HTTP response envelope.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `Content-Type` header.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Access-Control-Allow-Origin` header.
pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// Header marking an instrumented response.
pub const INSTRUMENTED_BY: &str = "X-Instrumented-By";
/// Header naming the downstream target of the Invoker.
pub const INVOKED_TARGET: &str = "X-Invoked-Target";

/// Value of [`INSTRUMENTED_BY`].
pub const INSTRUMENTATION_MARKER: &str = "Datadog-Orchestrion";
/// Value of [`CONTENT_TYPE`].
pub const APPLICATION_JSON: &str = "application/json";

/// Response returned by both functions.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// HTTP status code.
    pub status_code: u16,
    /// Response headers.
    pub headers: BTreeMap<String, String>,
    /// JSON text.
    pub body: String,
}

impl Envelope {
    /// Status 200 envelope with the informational headers.
    pub fn ok(body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        headers.insert(ALLOW_ORIGIN.to_string(), "*".to_string());
        headers.insert(
            INSTRUMENTED_BY.to_string(),
            INSTRUMENTATION_MARKER.to_string(),
        );
        Self {
            status_code: 200,
            headers,
            body,
        }
    }

    /// Status 500 envelope whose body is `{"error": <message>}`.
    ///
    /// `message` is JSON-escaped so the body is always valid JSON.
    pub fn error(message: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        Self {
            status_code: 500,
            headers,
            body: format!(
                r#"{{"error": {}}}"#,
                serde_json::Value::String(message.to_string()),
            ),
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|v| v.as_str())
    }
}
