//! Test Utilities Crate
//!
//! Provides shared test fixtures and builders for the client intake
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built valid field values for common entities
//! - `builders`: Builder patterns for test data construction

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
