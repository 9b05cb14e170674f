//! Invoker: calls the Responder over HTTP and relays the result.

use core::time::Duration;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{Level, event};

use crate::config::InvokerConfig;
use crate::envelope::{Envelope, INVOKED_TARGET};
use crate::error::{Error, Failure};
use crate::http::HttpClient;
use crate::request::ProxyRequest;

/// Message of a successful invocation.
pub const MESSAGE: &str = "Successfully invoked hello-world lambda via HTTP";
/// Name of the downstream target reported in [`INVOKED_TARGET`].
pub const TARGET_NAME: &str = "hello-world-lambda";

/// Body of a successful Invoker response.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationReport {
    /// Static message.
    pub message: String,
    /// ID of the inbound request.
    pub request_id: String,
    /// Downstream body; parsed JSON or raw text.
    pub invocation_result: Value,
    /// Time until the downstream response head arrived.
    pub response_time: String,
    /// Downstream HTTP status code.
    pub http_status_code: u16,
    /// URL that was called.
    pub api_gateway_url: String,
}

/// Handles a request.
///
/// `lookup` resolves configuration values and is consulted on every call.
/// `deadline` is the time left for the invocation, if the host imposes one;
/// the downstream call is abandoned when it runs out.
pub async fn invoke<C, F>(
    client: &C,
    lookup: F,
    request: &ProxyRequest,
    deadline: Option<Duration>,
) -> Result<Envelope, Failure>
where
    C: HttpClient,
    F: Fn(&str) -> Option<String>,
{
    event!(
        Level::INFO,
        "Invoker processing request: {}",
        request.request_id(),
    );
    let config = InvokerConfig::from_lookup(lookup)?;

    let time = std::time::Instant::now();
    let call = client.get(&config.target_url);
    let res = match deadline {
        Some(deadline) => tokio::time::timeout(deadline, call).await
            .map_err(|_| Error::TransportFailure(format!(
                "invocation deadline of {:?} exceeded",
                deadline,
            )))?,
        None => call.await,
    }?;
    let response_time = time.elapsed();

    let http_status_code = res.status();
    let body = res.into_bytes().await?;
    event!(
        Level::INFO,
        "received {} bytes with status {} in {:?}",
        body.len(),
        http_status_code,
        response_time,
    );

    let report = InvocationReport {
        message: MESSAGE.to_string(),
        request_id: request.request_id().to_string(),
        invocation_result: parse_downstream(&body),
        response_time: format!("{:?}", response_time),
        http_status_code,
        api_gateway_url: config.target_url,
    };
    let body = serde_json::to_string(&report).map_err(Error::from)?;
    Ok(Envelope::ok(body).with_header(INVOKED_TARGET, TARGET_NAME))
}

/// Parses a downstream body as JSON, falling back to the raw text.
pub fn parse_downstream(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
