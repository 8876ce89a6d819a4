use anyhow::Result;
use axum::Router;
use clap::Parser;
use search_core::loader::{ingest, read_documents};
use search_core::SearchServer;
use search_server::{build_app, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Documents to load at startup (JSON/JSONL file or directory)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Space-separated stop words applied before loading
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let mut engine = SearchServer::with_stop_words(&args.stop_words);
    if let Some(input) = &args.input {
        let added = ingest(&mut engine, read_documents(input)?)?;
        tracing::info!(added, "preloaded documents");
    }
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let app: Router = build_app(AppState::new(engine, admin_token));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
