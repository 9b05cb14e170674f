//! Invoker function.
//!
//! # Environment variables
//!
//! - `TARGET_API_URL`: URL of the Responder behind API Gateway.
//! - `DD_SERVICE`, `DD_ENV`, `DD_TRACE_ENABLED`: instrumentation tags and
//!   switch.

use anyhow::Context as _;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use std::env;
use std::time::SystemTime;

use functions::{init_logging, remaining_time, serve};
use traced_invocations::config::InstrumentationConfig;
use traced_invocations::http::{ReqwestClient, Traced};
use traced_invocations::invoker::invoke;
use traced_invocations::request::ProxyRequest;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let http = ReqwestClient::new().context("failed to create HTTP client")?;
    lambda_runtime::run(service_fn(|event: LambdaEvent<ProxyRequest>| {
        // configuration is read per invocation
        let client = Traced::new(http.clone(), InstrumentationConfig::from_env());
        serve("invoker", event, |request, context| async move {
            let deadline = remaining_time(context.deadline, SystemTime::now());
            invoke(&client, |key: &str| env::var(key).ok(), &request, deadline)
                .await
        })
    })).await
}
