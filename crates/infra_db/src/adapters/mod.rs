//! Internal (database) adapters implementing the domain ports

pub mod client;

pub use client::PostgresClientAdapter;
