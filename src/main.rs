use anyhow::{Context, Error, anyhow};
use clap::{Parser, Subcommand};
use std::env;

use traced_invocations::config::InstrumentationConfig;
use traced_invocations::envelope::Envelope;
use traced_invocations::error::Failure;
use traced_invocations::http::{ReqwestClient, Traced};
use traced_invocations::invoker::invoke;
use traced_invocations::request::{ProxyRequest, RequestContext};
use traced_invocations::responder::respond;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the Responder locally.
    Respond {
        /// Request ID.
        #[arg(long)]
        request_id: String,
        /// Request time.
        #[arg(long, default_value = "")]
        request_time: String,
        /// Request body.
        #[arg(long)]
        body: Option<String>,
    },
    /// Runs the Invoker locally.
    Invoke {
        /// Request ID.
        #[arg(long)]
        request_id: String,
        /// URL to call.
        ///
        /// Falls back to the `TARGET_API_URL` environment variable.
        #[arg(long)]
        target_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Respond { request_id, request_time, body } => {
            let request = ProxyRequest {
                request_context: RequestContext {
                    request_id,
                    request_time,
                },
                body,
            };
            respond(&request)
        },
        Commands::Invoke { request_id, target_url } => {
            let client = Traced::new(
                ReqwestClient::new().context("failed to create HTTP client")?,
                InstrumentationConfig::from_env(),
            );
            let lookup = |key: &str| match (key, &target_url) {
                ("TARGET_API_URL", Some(url)) => Some(url.clone()),
                _ => env::var(key).ok(),
            };
            invoke(&client, lookup, &ProxyRequest::new(request_id), None).await
        },
    };
    match result {
        Ok(envelope) => print_envelope(&envelope),
        Err(failure) => {
            let (envelope, error) = Failure::into_parts(failure);
            print_envelope(&envelope)?;
            Err(anyhow!(error))
        },
    }
}

fn print_envelope(envelope: &Envelope) -> Result<(), Error> {
    println!(
        "{}",
        serde_json::to_string_pretty(envelope)
            .context("failed to serialize envelope")?,
    );
    Ok(())
}
