mod config;
mod error;
mod handlers;
mod metrics;
mod models;
mod origin;
mod rate_limit;
mod state;
mod upstream;

use axum::{
    Router,
    routing::{any, get},
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Args;
use crate::rate_limit::RateLimitLedger;
use crate::state::AppState;
use crate::upstream::{HttpTransport, SessionTransport};

// this is main async function with tokio
#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let transport = match &args.api_key {
        Some(key) => Some(
            Arc::new(HttpTransport::new(args.upstream_url.clone(), key.clone()))
                as Arc<dyn SessionTransport>,
        ),
        None => {
            warn!("REALTIME_API_KEY is not set, session requests will fail with 500");
            None
        }
    };

    // creating shared state
    let state = Arc::new(AppState {
        transport,
        ledger: RateLimitLedger::new(),
        allowed_origins: config::parse_allowlist(&args.allowed_origins),
        instructions: args.instructions.clone(),
    });

    // any() because the session handler does not discriminate on method
    let app = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/session", any(handlers::session_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("gateway running on http://localhost:{}", args.port);
    info!("forwarding session requests to {}", args.upstream_url);

    // connect-info so the socket address is available as a rate-limit key
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
