//! Stweave server entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stweave::api::{router, AppState};
use stweave::domain::ports::ContextRetriever;
use stweave::infrastructure::config::ConfigLoader;
use stweave::infrastructure::gemini::GeminiClient;
use stweave::infrastructure::retrieval::KnowledgeBaseClient;
use stweave::infrastructure::verifier::HttpVerifier;
use stweave::services::Orchestrator;

/// Verified IEC 61131-3 Structured Text generation service.
#[derive(Debug, Parser)]
#[command(name = "stweave", version, about)]
struct Cli {
    /// Path to a YAML config file (defaults to stweave.yaml in the working
    /// directory, merged with STWEAVE_* environment variables)
    #[arg(long, env = "STWEAVE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port from the config file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    let backend = Arc::new(GeminiClient::new(&config.llm)?);
    let verifier = Arc::new(HttpVerifier::new(&config.verifier)?);
    let retriever: Option<Arc<dyn ContextRetriever>> = if config.retrieval.enabled {
        Some(Arc::new(KnowledgeBaseClient::new(&config.retrieval)?))
    } else {
        None
    };

    let orchestrator = Arc::new(Orchestrator::new(
        backend,
        verifier,
        retriever,
        config.fallback.clone(),
        config.generation.max_retries,
    ));

    let app = router(AppState { orchestrator });

    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{}:{port}", config.server.host);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, model = %config.llm.model, max_retries = config.generation.max_retries, "stweave listening");

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
