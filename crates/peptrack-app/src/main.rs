use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::logging::Logger;
use salvo::{Listener, Service};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use peptrack_app::app::router;
use peptrack_app::client_handler::{SharedCompletion, SharedIdentity};
use peptrack_app::middleware::cors::cors_handler;
use peptrack_core::config::load_config;
use peptrack_db::db::connection::create_pool;
use peptrack_db::db::migrate::run_migrations;
use peptrack_service::auth::identity::SupabaseIdentity;
use peptrack_service::llm::OpenAiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting peptrack API server");

    let config = load_config()?;

    tracing::info!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    if config.database.run_migrations {
        run_migrations(&config.database.url).await?;
    }

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let identity = SupabaseIdentity::try_from_config(&config.identity)
        .map(|client| Arc::new(client) as SharedIdentity);
    if identity.is_none() {
        tracing::warn!("Identity provider not configured; authenticated routes will answer 500");
    }

    let llm = OpenAiClient::try_from_config(&config.llm)
        .map(|client| Arc::new(client) as SharedCompletion);
    if llm.is_none() {
        tracing::warn!("LLM not configured; summaries and insights use rule-based fallbacks");
    }

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let cors = cors_handler(&config.cors);
    let service = Service::new(router(config, pool, identity, llm))
        .hoop(Logger::new())
        .hoop(cors);

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(service).await;

    Ok(())
}
