//! Core Kernel - Foundational types for the client intake system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed entity identifiers
//! - The ports-and-adapters error and marker traits

pub mod identifiers;
pub mod ports;

pub use identifiers::{ClientId, DependentId};
pub use ports::{
    PortError, DomainPort,
    HealthCheckable, HealthCheckResult, AdapterHealth,
};
