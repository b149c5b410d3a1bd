use lambda_http::{run, service_fn, Body, Error, Request, Response};
use lambda_runtime::tracing;

mod card;
mod config;
mod error;
mod handler;
mod template;
mod upstream;

use config::Config;
use upstream::HttpUpstream;

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let upstream = HttpUpstream::new();
    let resp = handler::handle(event, &upstream, Config::from_env).await;
    tracing::info!("responded with {}", resp.status());

    Ok(resp)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    run(service_fn(function_handler)).await?;

    Ok(())
}
