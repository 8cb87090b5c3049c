//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL infrastructure for the client intake
//! system using SQLx: connection pooling, error translation, and the
//! database adapter implementing the domain's `ClientRepository` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool};
//! use infra_db::adapters::PostgresClientAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/intake")).await?;
//! let adapter = PostgresClientAdapter::new(pool);
//! ```

pub mod adapters;
pub mod error;
pub mod pool;

pub use adapters::PostgresClientAdapter;
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
