//! Inbound API Gateway proxy request.
//!
//! Only the fields the functions read are modeled; the rest of the event is
//! ignored.

use serde::{Deserialize, Serialize};

/// Proxy request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    /// Request context supplied by the gateway.
    #[serde(default)]
    pub request_context: RequestContext,
    /// Request body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Request context.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Request ID.
    #[serde(default)]
    pub request_id: String,
    /// Request time as formatted by the gateway.
    #[serde(default)]
    pub request_time: String,
}

impl ProxyRequest {
    /// Creates a request with a given ID.
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_context: RequestContext {
                request_id: request_id.into(),
                ..Default::default()
            },
            body: None,
        }
    }

    /// Request ID.
    pub fn request_id(&self) -> &str {
        &self.request_context.request_id
    }

    /// Size of the body in bytes.
    pub fn body_size(&self) -> usize {
        self.body.as_ref().map_or(0, |b| b.len())
    }
}
