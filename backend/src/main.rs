use std::{net::SocketAddr, sync::Arc};

use backend::{AppState, create_router, events::EventsClient};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_EVENTS_API: &str = "http://localhost:8000";

#[derive(Debug, Parser)]
#[command(author, version, about = "Serve map-ready views of event routes")]
struct Args {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "0.0.0.0:8080")]
    addr: SocketAddr,

    /// Base URL of the events REST backend (falls back to EVENTS_API_URL)
    #[arg(long)]
    events_api: Option<String>,

    /// Base URL for event media; defaults to the events backend
    #[arg(long)]
    media_base: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let events_api = args
        .events_api
        .or_else(|| std::env::var("EVENTS_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_EVENTS_API.to_string());
    let media_base = args.media_base.unwrap_or_else(|| events_api.clone());
    tracing::info!("using events backend at {events_api}");

    let state = AppState {
        events: Arc::new(EventsClient::new(events_api)),
        media_base,
    };
    let app = create_router(state);

    let addr: SocketAddr = args.addr;
    tracing::info!("starting backend on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}
