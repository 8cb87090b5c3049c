//! Client entity and lifecycle
//!
//! This module defines the Client aggregate, the validated customer record of
//! the intake process. A client owns up to [`MAX_DEPENDENTS`] dependents and
//! carries a lifecycle status that only the entity itself can change.
//!
//! # Self-validating construction
//!
//! A `Client` can only be obtained through [`Client::new`], which enforces
//! every domain invariant. If any rule fails the entity never comes into
//! existence - there is no way to hold an invalid `Client`.
//!
//! # Examples
//!
//! ```rust
//! use domain_clients::client::{Client, ClientAttributes, ClientStatus};
//! use core_kernel::ClientId;
//! use rust_decimal_macros::dec;
//!
//! let client = Client::new(ClientAttributes {
//!     id: ClientId::new(),
//!     name: "Ana Paz".to_string(),
//!     email: "ana@example.com".to_string(),
//!     rut: "12345678-9".to_string(),
//!     phone: "912345678".to_string(),
//!     age: 30,
//!     region: "Metropolitana".to_string(),
//!     commune: "Maipú".to_string(),
//!     income: dec!(500000),
//!     dependents: 0,
//!     health_insurance: "Fonasa".to_string(),
//!     created_at: None,
//!     status: None,
//!     dependent_list: Vec::new(),
//! }).unwrap();
//!
//! assert_eq!(client.status(), ClientStatus::Pending);
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;
use crate::dependent::Dependent;
use crate::error::ClientError;

/// Maximum number of dependents a client may declare or attach.
pub const MAX_DEPENDENTS: usize = 20;

/// Lifecycle status of a client record.
///
/// The only legal transition is `Pending` -> `Active`, performed through
/// [`Client::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    /// Registered but not yet activated (default on creation)
    Pending,
    /// Activated for coverage; requires a declared income greater than zero
    Active,
}

impl ClientStatus {
    /// Returns the storage/wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Pending => "PENDING",
            ClientStatus::Active => "ACTIVE",
        }
    }

    /// Parses a status from its storage representation
    pub fn parse(s: &str) -> Result<Self, ClientError> {
        match s {
            "PENDING" => Ok(ClientStatus::Pending),
            "ACTIVE" => Ok(ClientStatus::Active),
            other => Err(ClientError::Validation(format!(
                "Unknown client status '{other}'"
            ))),
        }
    }
}

/// Full attribute set for constructing a [`Client`].
///
/// `created_at` and `status` default to "now" and `Pending` when `None`;
/// they are supplied by the storage adapter when rehydrating a persisted
/// record.
#[derive(Debug, Clone)]
pub struct ClientAttributes {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub rut: String,
    pub phone: String,
    pub age: u32,
    pub region: String,
    pub commune: String,
    /// Declared monthly income
    pub income: Decimal,
    /// Declared number of family dependents
    pub dependents: u32,
    pub health_insurance: String,
    pub created_at: Option<DateTime<Utc>>,
    pub status: Option<ClientStatus>,
    pub dependent_list: Vec<Dependent>,
}

/// The validated customer record of the intake process.
///
/// Status and the attached dependent list are private; callers observe them
/// through read-only accessors and mutate them only through the entity's own
/// behavior ([`Client::add_dependent`], [`Client::activate`]).
///
/// Deliberately not `Deserialize`: rehydration goes through
/// [`ClientAttributes`] and [`Client::new`] so stored data is re-validated,
/// and the HTTP boundary has its own DTOs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Client {
    /// Unique client identifier, generated at creation and never reassigned
    pub id: ClientId,
    pub name: String,
    /// Uniqueness key for registration
    pub email: String,
    /// Chilean national-id string
    pub rut: String,
    pub phone: String,
    pub age: u32,
    pub region: String,
    pub commune: String,
    /// Declared monthly income
    pub income: Decimal,
    /// Declared number of family dependents
    pub dependents: u32,
    pub health_insurance: String,
    pub created_at: DateTime<Utc>,
    status: ClientStatus,
    dependent_list: Vec<Dependent>,
}

impl Client {
    /// Constructs a client, enforcing every domain invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if:
    /// - the email does not contain an `@`
    /// - the RUT is shorter than 8 characters
    /// - the income is negative
    /// - the creation timestamp lies in the future
    /// - more than [`MAX_DEPENDENTS`] dependents are declared or attached
    pub fn new(attrs: ClientAttributes) -> Result<Self, ClientError> {
        let client = Self {
            id: attrs.id,
            name: attrs.name,
            email: attrs.email,
            rut: attrs.rut,
            phone: attrs.phone,
            age: attrs.age,
            region: attrs.region,
            commune: attrs.commune,
            income: attrs.income,
            dependents: attrs.dependents,
            health_insurance: attrs.health_insurance,
            created_at: attrs.created_at.unwrap_or_else(Utc::now),
            status: attrs.status.unwrap_or(ClientStatus::Pending),
            dependent_list: attrs.dependent_list,
        };
        client.validate()?;
        Ok(client)
    }

    /// Checks the construction-time invariants.
    fn validate(&self) -> Result<(), ClientError> {
        if !self.email.contains('@') {
            return Err(ClientError::InvalidEmail(self.email.clone()));
        }

        // Simple RUT check (minimum 8 characters for the Chilean format)
        if self.rut.chars().count() < 8 {
            return Err(ClientError::InvalidRut(self.rut.clone()));
        }

        // Income feeds plan calculations and cannot be negative
        if self.income < Decimal::ZERO {
            return Err(ClientError::NegativeIncome(self.income));
        }

        if self.created_at > Utc::now() {
            return Err(ClientError::FutureCreatedAt(self.created_at));
        }

        if self.dependents as usize > MAX_DEPENDENTS {
            return Err(ClientError::TooManyDependents {
                count: self.dependents,
            });
        }

        if self.dependent_list.len() > MAX_DEPENDENTS {
            return Err(ClientError::DependentLimitReached);
        }

        Ok(())
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> ClientStatus {
        self.status
    }

    /// Returns a read-only view of the attached dependents.
    ///
    /// Internal state cannot be mutated through the returned slice.
    pub fn dependent_list(&self) -> &[Dependent] {
        &self.dependent_list
    }

    /// Attaches a dependent to this client.
    ///
    /// The dependent's own invariants were established at its construction;
    /// only the list-size limit is checked here.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::DependentLimitReached`] when the client
    /// already holds [`MAX_DEPENDENTS`] dependents; the list is unchanged.
    pub fn add_dependent(&mut self, dependent: Dependent) -> Result<(), ClientError> {
        if self.dependent_list.len() >= MAX_DEPENDENTS {
            return Err(ClientError::DependentLimitReached);
        }
        self.dependent_list.push(dependent);
        Ok(())
    }

    /// Transitions the client from `Pending` to `Active`.
    ///
    /// Calling this on an already-active client is a no-op: the transition
    /// is idempotent as long as the income requirement still holds.
    ///
    /// # Errors
    ///
    /// Fails with [`ClientError::ActivationRequiresIncome`] when the
    /// declared income is zero or negative; the status is left unchanged.
    pub fn activate(&mut self) -> Result<(), ClientError> {
        if self.income <= Decimal::ZERO {
            return Err(ClientError::ActivationRequiresIncome(self.income));
        }
        self.status = ClientStatus::Active;
        Ok(())
    }
}
