//! Glue between `lambda_runtime` and the functions.

use core::future::Future;
use core::time::Duration;
use lambda_runtime::{Context, Error, LambdaEvent};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{Instrument, Level, event};

use traced_invocations::config::InstrumentationConfig;
use traced_invocations::envelope::Envelope;
use traced_invocations::error::Failure;
use traced_invocations::request::ProxyRequest;

/// Installs the log subscriber.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();
}

/// Runs a handler inside an invocation span.
///
/// A [`Failure`] is logged with its envelope and its error is handed to the
/// runtime so that the platform records the invocation as failed.
pub async fn serve<H, FUT>(
    function_name: &'static str,
    event: LambdaEvent<ProxyRequest>,
    handler: H,
) -> Result<Envelope, Error>
where
    H: FnOnce(ProxyRequest, Context) -> FUT,
    FUT: Future<Output = Result<Envelope, Failure>>,
{
    let (request, context) = event.into_parts();
    let config = InstrumentationConfig::from_env();
    let span = tracing::info_span!(
        "invocation",
        function = function_name,
        aws.request_id = context.request_id.as_str(),
        service = config.service.as_deref(),
        env = config.env.as_deref(),
    );
    async move {
        let time = std::time::Instant::now();
        match handler(request, context).await {
            Ok(envelope) => {
                event!(
                    Level::INFO,
                    "responded {} in {} μs",
                    envelope.status_code,
                    time.elapsed().as_micros(),
                );
                Ok(envelope)
            },
            Err(failure) => {
                let (envelope, error) = failure.into_parts();
                event!(
                    Level::ERROR,
                    "responded {} with {}: {}",
                    envelope.status_code,
                    envelope.body,
                    error,
                );
                Err(error.into())
            },
        }
    }
        .instrument(span)
        .await
}

/// Time left until a deadline in milliseconds since the Unix epoch.
///
/// Returns `None` if no deadline is given.
pub fn remaining_time(deadline_ms: u64, now: SystemTime) -> Option<Duration> {
    if deadline_ms == 0 {
        return None;
    }
    let now_ms = now.duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    Some(Duration::from_millis(deadline_ms.saturating_sub(now_ms)))
}
