//! Client Intake Domain
//!
//! This crate manages health-insurance client intake: the client and
//! dependent entities, the registration workflow, and the ports the
//! surrounding infrastructure plugs into.
//!
//! # Model
//!
//! - **Client**: a self-validating customer record. Construction enforces
//!   every invariant (email format, RUT length, non-negative income,
//!   non-future creation date, dependent limits); status and the attached
//!   dependent list mutate only through the entity's own behavior.
//! - **Dependent**: a family member attached to exactly one client,
//!   persisted and removed together with it.
//! - **RegisterClientUseCase**: the intake workflow - validate, reject
//!   duplicates by email, construct, persist, publish.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_clients::{RegisterClientInput, RegisterClientUseCase};
//! use domain_clients::events::ChannelEventBus;
//! use domain_clients::mock::InMemoryClientRepository;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> Result<(), domain_clients::ClientError> {
//! let (bus, _rx) = ChannelEventBus::channel();
//! let use_case = RegisterClientUseCase::new(
//!     Arc::new(InMemoryClientRepository::new()),
//!     Arc::new(bus),
//! );
//!
//! let client = use_case
//!     .execute(RegisterClientInput {
//!         name: "Ana Paz".to_string(),
//!         email: "ana@example.com".to_string(),
//!         rut: "12345678-9".to_string(),
//!         phone: "912345678".to_string(),
//!         age: 30,
//!         region: "Metropolitana".to_string(),
//!         commune: "Maipú".to_string(),
//!         income: dec!(500000),
//!         dependents: 0,
//!         health_insurance: "Fonasa".to_string(),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dependent;
pub mod error;
pub mod events;
pub mod ports;
pub mod register;

pub use client::{Client, ClientAttributes, ClientStatus, MAX_DEPENDENTS};
pub use dependent::Dependent;
pub use error::ClientError;
pub use events::{ChannelEventBus, ClientEvent, EventPublisher};
pub use ports::ClientRepository;
pub use register::{RegisterClientInput, RegisterClientUseCase};

/// Mock adapters, available to tests and behind the `mock` feature.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    pub use crate::events::mock::RecordingEventBus;
    pub use crate::ports::mock::InMemoryClientRepository;
}
