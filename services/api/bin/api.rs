//! Main Entrypoint for the Sozo API Service
//!
//! This binary is responsible for:
//! 1. Loading configuration from the environment.
//! 2. Loading the lesson catalog.
//! 3. Choosing the response generator (LLM-backed or scripted).
//! 4. Constructing the Axum router and applying middleware.
//! 5. Starting the web server and handling graceful shutdown.

use anyhow::Context;
use async_openai::config::OpenAIConfig;
use sozo_api::{config::Config, router::create_router, session::SessionStore, state::AppState};
use sozo_core::{
    catalog::LessonCatalog,
    generator::{LlmResponder, ResponseGenerator},
    llm_client::OpenAICompatibleClient,
    scripted::ScriptedResponder,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Listens for the `Ctrl+C` signal to gracefully shut down the server.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal. Shutting down gracefully...");
}

/// Picks the response generator once for the lifetime of the process.
fn build_generator(config: &Config) -> Arc<dyn ResponseGenerator> {
    match &config.openai_api_key {
        Some(api_key) => {
            info!(model = %config.chat_model, "Using LLM-backed response generator.");
            let openai_config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(&config.openai_api_base);
            Arc::new(LlmResponder::new(Arc::new(OpenAICompatibleClient::new(
                openai_config,
                config.chat_model.clone(),
            ))))
        }
        None => {
            warn!("OPENAI_API_KEY is not set. Falling back to scripted responses.");
            Arc::new(ScriptedResponder::new())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .init();
    info!("Configuration loaded. Initializing application state...");

    // --- 3. Load Lessons ---
    let catalog = LessonCatalog::load_or_empty(&config.lesson_content_path);

    // --- 4. Initialize Shared Services ---
    let generator = build_generator(&config);
    let app_state = Arc::new(AppState::with_sessions(
        catalog,
        generator,
        SessionStore::with_ttl(config.session_ttl),
    ));

    // --- 5. Create Router and Apply Middleware ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(app_state).layer(cors);

    // --- 6. Start Server ---
    info!(
        ai_backend = config.has_ai_backend(),
        bind_address = %config.bind_address,
        "Service configured. Starting server..."
    );
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server has shut down.");
    Ok(())
}
