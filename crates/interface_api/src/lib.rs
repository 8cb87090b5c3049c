//! HTTP API Layer
//!
//! This crate provides the REST API for the client intake system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for client intake and health checks
//! - **DTOs**: Request/Response data transfer objects
//! - **Notifier**: Background Telegram delivery of registration events
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod notifier;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use domain_clients::{ClientRepository, RegisterClientUseCase};

use crate::handlers::{clients, health};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub use_case: Arc<RegisterClientUseCase>,
    pub repository: Arc<dyn ClientRepository>,
}

/// Creates the main API router
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no versioned prefix)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Client intake routes
    let client_routes = Router::new()
        .route("/", post(clients::register_client))
        .route("/:id", get(clients::get_client));

    let api_routes = Router::new().nest("/clients", client_routes);

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
