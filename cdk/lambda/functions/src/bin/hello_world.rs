//! Responder function.

use lambda_runtime::{Error, LambdaEvent, service_fn};

use functions::{init_logging, serve};
use traced_invocations::request::ProxyRequest;
use traced_invocations::responder::respond;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    lambda_runtime::run(service_fn(|event: LambdaEvent<ProxyRequest>| {
        serve("hello-world", event, |request, _context| async move {
            respond(&request)
        })
    })).await
}
