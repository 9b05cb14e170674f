//! Responder: returns a static greeting.

use serde::{Deserialize, Serialize};
use tracing::{Level, event};

use crate::envelope::Envelope;
use crate::error::Failure;
use crate::request::ProxyRequest;

/// Greeting message.
pub const MESSAGE: &str = "Hello World from Rust Lambda with Orchestrion!";
/// Description of the instrumentation.
pub const TRACING: &str = "Auto-instrumented with Datadog Orchestrion";

/// Body of a successful Responder response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Greeting {
    /// Static message.
    pub message: String,
    /// ID of the inbound request.
    pub request_id: String,
    /// Time of the inbound request.
    pub timestamp: String,
    /// Static description of the instrumentation.
    pub tracing: String,
}

impl Greeting {
    /// Builds a greeting for a given request.
    pub fn for_request(request: &ProxyRequest) -> Self {
        Self {
            message: MESSAGE.to_string(),
            request_id: request.request_context.request_id.clone(),
            timestamp: request.request_context.request_time.clone(),
            tracing: TRACING.to_string(),
        }
    }
}

/// Handles a request.
pub fn respond(request: &ProxyRequest) -> Result<Envelope, Failure> {
    event!(
        Level::INFO,
        "Processing request data for request {}.",
        request.request_id(),
    );
    event!(Level::INFO, "Body size = {}.", request.body_size());
    let body = serde_json::to_string(&Greeting::for_request(request))
        .map_err(|e| Failure::new(e.into()))?;
    Ok(Envelope::ok(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RequestContext;

    fn request() -> ProxyRequest {
        ProxyRequest {
            request_context: RequestContext {
                request_id: "req-1".to_string(),
                request_time: "17/Oct/2026:10:00:00 +0000".to_string(),
            },
            body: Some("x".repeat(1 << 16)),
        }
    }

    #[test]
    fn respond_returns_greeting() {
        let envelope = respond(&request()).unwrap();
        assert_eq!(envelope.status_code, 200);
        assert_eq!(envelope.header("X-Instrumented-By"), Some("Datadog-Orchestrion"));
        let greeting: Greeting = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(greeting, Greeting {
            message: MESSAGE.to_string(),
            request_id: "req-1".to_string(),
            timestamp: "17/Oct/2026:10:00:00 +0000".to_string(),
            tracing: TRACING.to_string(),
        });
    }

    #[test]
    fn respond_body_has_exactly_four_fields() {
        let envelope = respond(&ProxyRequest::new("abc")).unwrap();
        let body: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
        let fields = body.as_object().unwrap();
        assert_eq!(fields.len(), 4);
        for key in ["message", "requestId", "timestamp", "tracing"] {
            assert!(fields.contains_key(key), "missing {}", key);
        }
        assert_eq!(body["requestId"], "abc");
        assert_eq!(body["timestamp"], "");
    }

    #[test]
    fn greeting_survives_serialization() {
        let greeting = Greeting::for_request(&request());
        let text = serde_json::to_string(&greeting).unwrap();
        assert_eq!(serde_json::from_str::<Greeting>(&text).unwrap(), greeting);
    }
}
