use agent::Agent;
use async_once::AsyncOnce;
use config::Config;
use http_body_util::combinators::BoxBody;
use hyper::body::Bytes;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use lazy_static::lazy_static;
use std::str::FromStr;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

mod agent;
mod config;
mod handlers;

// Cannot use std::OnceCell because the agent needs async initialization (AWS config load)
lazy_static! {
    pub(crate) static ref CONFIG: Config = Config::from_env();
    pub(crate) static ref AGENT: AsyncOnce<Agent> =
        AsyncOnce::new(async { Agent::from_config(&CONFIG).await });
}

/// The handler function converted into a Tower service to serve the
/// AgentCore container contract: a health probe and the invocation endpoint.
async fn agent_api_handler(
    req: Request<hyper::body::Incoming>,
) -> Result<Response<BoxBody<Bytes, hyper::Error>>, hyper::Error> {
    debug!("Request URL: {:?}", req.uri());

    if req.method() == Method::GET && req.uri().path() == "/ping" {
        return Ok(handlers::ping::handler());
    }

    if req.method() == Method::POST && req.uri().path() == "/invocations" {
        return Ok(handlers::invocations::handler(req).await);
    }

    // this should not be happening unless the data plane contract changed or someone is probing manually
    warn!("Unknown request type: {:?}", req);
    Ok(handlers::not_found())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    // bind to a TCP port and start a loop to continuously accept incoming connections
    let listener = TcpListener::bind(CONFIG.listener).await?;
    info!("Listening on http://{}", CONFIG.listener);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);

        // Spawn a tokio task to serve multiple connections concurrently
        tokio::task::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, service_fn(agent_api_handler))
                .await
            {
                debug!("TCP error: {:?}", err);
            }
        });
    }
}

/// Initializes the tracing from RUST_LOG env var if present or sets minimal logging:
/// - INFO for the app
/// - ERROR for everything else
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(
                    Directive::from_str("agent_app=info").expect("Invalid logging filter. It's a bug."),
                )
                .from_env_lossy(),
        )
        .with_ansi(true)
        .with_target(false)
        .compact()
        .init();
}
