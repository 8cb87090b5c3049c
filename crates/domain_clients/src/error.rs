//! Client domain errors
//!
//! This module defines all error types that can occur in the client intake
//! domain: entity invariant violations, duplicate registrations, and
//! persistence failures propagated from the repository port.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the client intake domain
#[derive(Debug, Error)]
pub enum ClientError {
    /// Email does not contain an '@' character
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// RUT is shorter than the 8-character minimum
    #[error("RUT must have at least 8 characters: {0}")]
    InvalidRut(String),

    /// Declared income is negative
    #[error("Declared income cannot be negative: {0}")]
    NegativeIncome(Decimal),

    /// Creation timestamp lies in the future
    #[error("Registration date cannot be in the future: {0}")]
    FutureCreatedAt(DateTime<Utc>),

    /// Declared dependent count exceeds the limit
    #[error("Cannot declare more than 20 family dependents, got {count}")]
    TooManyDependents { count: u32 },

    /// Attached dependent list is already at the limit
    #[error("Cannot attach more than 20 family dependents")]
    DependentLimitReached,

    /// Activation attempted with zero or undeclared income
    #[error("Cannot activate a client with zero or undeclared income: {0}")]
    ActivationRequiresIncome(Decimal),

    /// Registration attempted with an email that already exists
    #[error("The email {0} is already registered")]
    DuplicateEmail(String),

    /// Inbound field validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Persistence failure propagated from the repository port
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ClientError {
    /// Returns true if this error is an entity or field validation failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidEmail(_)
                | ClientError::InvalidRut(_)
                | ClientError::NegativeIncome(_)
                | ClientError::FutureCreatedAt(_)
                | ClientError::TooManyDependents { .. }
                | ClientError::DependentLimitReached
                | ClientError::ActivationRequiresIncome(_)
                | ClientError::Validation(_)
        )
    }

    /// Returns true if this error is a duplicate-registration rejection
    pub fn is_duplicate(&self) -> bool {
        matches!(self, ClientError::DuplicateEmail(_))
    }
}
