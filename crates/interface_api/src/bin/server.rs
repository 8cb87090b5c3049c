//! Client Intake - API Server Binary
//!
//! This binary starts the HTTP API server for the client intake system.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin intake-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin intake-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_TELEGRAM_BOT_TOKEN` - Telegram bot token (notifications off when unset)
//! * `API_TELEGRAM_CHAT_ID` - Telegram chat to notify

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_clients::{ChannelEventBus, ClientRepository, RegisterClientUseCase};
use infra_db::{create_pool, DatabaseConfig, PostgresClientAdapter};
use interface_api::config::ApiConfig;
use interface_api::notifier::{run_discarding_notifier, run_notifier, TelegramNotifier};
use interface_api::{create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes the database
/// connection, wires the intake workflow and the notification worker, and
/// starts the HTTP server.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        notifications = config.telegram_enabled(),
        "Starting Client Intake API Server"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url)).await?;
    run_migrations(&pool).await?;

    let repository: Arc<dyn ClientRepository> = Arc::new(PostgresClientAdapter::new(pool));

    // Registration events flow through a channel to the Telegram worker
    let (event_bus, event_rx) = ChannelEventBus::channel();
    match (config.telegram_bot_token.clone(), config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => {
            tokio::spawn(run_notifier(event_rx, TelegramNotifier::new(token, chat_id)));
        }
        _ => {
            tokio::spawn(run_discarding_notifier(event_rx));
        }
    }

    let use_case = Arc::new(RegisterClientUseCase::new(
        repository.clone(),
        Arc::new(event_bus),
    ));

    let app = create_router(AppState {
        use_case,
        repository,
    });

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual env vars or defaults when the prefixed form
/// is absent.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        database_url: std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("API_DATABASE_URL"))
            .unwrap_or_else(|_| "postgres://localhost/intake".to_string()),
        log_level: std::env::var("API_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
        telegram_bot_token: std::env::var("API_TELEGRAM_BOT_TOKEN").ok(),
        telegram_chat_id: std::env::var("API_TELEGRAM_CHAT_ID")
            .ok()
            .and_then(|id| id.parse().ok()),
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Applies pending SQLx migrations and verifies connectivity.
async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("../infra_db/migrations").run(pool).await?;

    tracing::info!("Database ready");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
