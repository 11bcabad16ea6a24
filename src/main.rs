//! # Translatify - Main Application Entry Point
//!
//! A single-page translator: pick a source and target language, type some
//! text, and get back the translation, its romanized form and spoken audio.
//!
//! ## Key Rust Concepts Used:
//! - **async/await**: Requests wait on remote engines without blocking a worker thread
//! - **modules**: Code is organized into separate modules (mod statements)
//! - **Result<T, E>**: Error handling using Rust's Result type
//! - **trait objects**: The orchestrator talks to engines through `Arc<dyn Trait>`
//! - **static**: Global variables that live for the entire program duration
//!
//! ## Application Architecture:
//! - **catalog**: The fixed language list and the Indic script table
//! - **engines**: Remote translation and speech clients behind traits
//! - **transliteration**: In-process Brahmic → ITRANS romanizer
//! - **audio**: Encoded audio clips and their container detection
//! - **orchestrator**: Runs translate → romanize → speak for one submission
//! - **view**: Server-rendered HTML for the page
//! - **handlers**: The page form plus a JSON API over the same orchestrator
//! - **config / state / health / middleware / error**: Service plumbing

// Module declarations - These tell Rust about our other source files
mod audio;           // Audio clip type and format sniffing (audio/ directory)
mod catalog;         // Language and script catalog (catalog.rs)
mod config;          // Configuration management (config.rs)
mod engines;         // Translation and speech engines (engines/ directory)
mod error;           // Error handling types (error.rs)
mod handlers;        // HTTP request handlers (handlers/ directory)
mod health;          // Health check endpoints (health.rs)
mod middleware;      // Custom middleware (middleware/ directory)
mod orchestrator;    // Submission pipeline (orchestrator.rs)
mod state;           // Application state management (state.rs)
mod transliteration; // ITRANS romanization (transliteration/ directory)
mod view;            // HTML rendering (view.rs)

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Result;
use config::AppConfig;
use state::AppState;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Global shutdown signal, set by the signal handler task.
static SHUTDOWN_SIGNAL: AtomicBool = AtomicBool::new(false);

/// The main application entry point.
///
/// ## What this function does:
/// 1. **Loads configuration** from files and environment variables
/// 2. **Sets up logging** for debugging and monitoring
/// 3. **Wires the engines** into the orchestrator inside the shared state
/// 4. **Configures the HTTP server** with middleware and routes
/// 5. **Handles graceful shutdown** when receiving system signals
///
/// ## Error Handling:
/// A configuration that fails validation (for example a default language
/// missing from the catalog) stops the process before the server binds.
#[actix_web::main]
async fn main() -> Result<()> {
    // It's fine if there's no .env file
    dotenv::dotenv().ok();

    init_tracing()?;

    let config = AppConfig::load()?;
    config.validate()?;

    info!("Starting translatify v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded: {}:{}", config.server.host, config.server.port);
    info!(
        translation = %config.translation.base_url,
        speech = %config.speech.base_url,
        "Engines configured"
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = AppState::new(config);

    setup_signal_handlers();

    info!("Starting HTTP server on {}", bind_addr);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::FormConfig::default().error_handler(error::form_error_handler))
            // Middleware execute in reverse order for responses
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(middleware::MetricsMiddleware)
            .wrap(middleware::RequestLogging)
            // The page itself
            .route("/", web::get().to(handlers::index))
            .route("/", web::post().to(handlers::submit))
            .service(
                web::scope("/api/v1")
                    .route("/languages", web::get().to(handlers::list_languages))
                    .route("/translate", web::post().to(handlers::translate))
                    .route("/health", web::get().to(health::health_check))
                    .route("/metrics", web::get().to(health::detailed_metrics))
                    .route("/config", web::get().to(handlers::get_config)),
            )
            .route("/health", web::get().to(health::health_check))
            .default_service(web::to(error::not_found))
    })
    .bind(&bind_addr)?
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    // Whichever finishes first wins
    tokio::select! {
        result = server_task => {
            match result {
                Ok(server_result) => {
                    if let Err(e) = server_result {
                        error!("Server error: {}", e);
                    }
                }
                Err(e) => {
                    error!("Server task error: {}", e);
                }
            }
        }
        _ = wait_for_shutdown() => {
            info!("Shutdown signal received, stopping server...");
            // In-flight translations are allowed to finish
            server_handle.stop(true).await;
        }
    }

    info!("Server stopped gracefully");
    Ok(())
}

/// Initialize the tracing (logging) system for the application.
///
/// ## Environment Variables:
/// - `RUST_LOG`: Controls what gets logged (e.g., "debug", "translatify=trace")
/// - If not set, defaults to "translatify=debug,actix_web=info"
fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translatify=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

/// Set up signal handlers for graceful shutdown.
///
/// SIGTERM and SIGINT both set [`SHUTDOWN_SIGNAL`]. If the handlers cannot be
/// installed the server still runs; it just has to be killed instead.
fn setup_signal_handlers() {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async {
        let (mut sigterm, mut sigint) = match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(sigterm), Ok(sigint)) => (sigterm, sigint),
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to install signal handlers: {}", e);
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
            }
        }

        SHUTDOWN_SIGNAL.store(true, Ordering::SeqCst);
    });
}

/// Wait for the shutdown signal to be set, polling every 100ms.
async fn wait_for_shutdown() {
    while !SHUTDOWN_SIGNAL.load(Ordering::SeqCst) {
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }
}
