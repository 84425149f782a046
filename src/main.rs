//! Aquifer server entry point.

use std::sync::Arc;

use aquifer::{
    create_router, ApiExplainer, ApiFormatter, ApiNormalizer, ApiSqlGenerator, ApiState,
    ApiTextProvider, Config, PgExecutor, Pipeline, QueryBuilder,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Aquifer: natural-language answer service for groundwater metrics
#[derive(Parser, Debug)]
#[command(name = "aquifer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// HTTP port. If not specified, uses the config file value.
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting aquifer v{}", env!("CARGO_PKG_VERSION"));

    let mut config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };
    if let Some(port) = args.port {
        config.server.http_port = port;
    }

    tracing::info!(
        port = config.server.http_port,
        llm_model = %config.llm.model,
        "Configuration loaded"
    );

    let executor = Arc::new(PgExecutor::connect(&config.database).await?);
    match executor.probe().await {
        Ok(()) => tracing::info!("Database connection verified"),
        Err(e) => tracing::warn!("Database connectivity probe failed: {}", e),
    }

    let provider = Arc::new(ApiTextProvider::from_config(&config.llm)?);
    let normalizer = Arc::new(ApiNormalizer::new(provider.clone()));
    let formatter = Arc::new(ApiFormatter::new(provider.clone()));
    let explainer = Arc::new(ApiExplainer::new(provider.clone()));
    let builder = QueryBuilder::new(Arc::new(ApiSqlGenerator::new(provider)));

    let pipeline = Arc::new(Pipeline::new(
        normalizer.clone(),
        builder.clone(),
        executor.clone(),
        explainer,
        formatter.clone(),
    ));

    let state = Arc::new(ApiState {
        pipeline,
        normalizer,
        formatter,
        builder,
        executor,
    });

    let router = create_router(state, &config.server);
    let listener =
        tokio::net::TcpListener::bind(("0.0.0.0", config.server.http_port)).await?;
    tracing::info!("Listening on port {}", config.server.http_port);
    axum::serve(listener, router).await?;

    Ok(())
}
