//! HTTP entry point for the spacetraveling blog.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use spacetraveling_api::client::{Client, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod routes;

#[derive(Parser)]
#[command(name = "spacetraveling")]
#[command(about = "A small blog served from a headless CMS", long_about = None)]
struct Cli {
    /// Repository API endpoint, e.g. https://<repo>.cdn.prismic.io/api/v2
    #[arg(long, env = "SPACETRAVELING_API_URL")]
    api_url: String,

    /// Content type holding the posts
    #[arg(long, default_value = "posts")]
    doc_type: String,

    /// Locale sent with every query
    #[arg(long)]
    lang: Option<String>,

    /// Posts per page
    #[arg(long)]
    page_size: Option<i32>,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    ip: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 4000)]
    port: u16,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut cfg = Config::new(cli.api_url);
    cfg.lang = cli.lang;
    cfg.page_size = cli.page_size;
    let state = Arc::new(routes::AppState {
        http: Arc::new(Client::new(cfg)),
        doc_type: cli.doc_type,
    });

    let addr: SocketAddr = format!("{}:{}", cli.ip, cli.port).parse()?;
    tracing::info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, routes::router(state)).await?;

    Ok(())
}
