//! Dependent entity
//!
//! A dependent is a validated family-member record attached to exactly one
//! client. It carries no behavior beyond its own construction rules; its
//! only role is aggregation under a [`Client`](crate::client::Client).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::DependentId;
use crate::error::ClientError;

/// A family member covered under a client's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    /// Unique dependent identifier, generated at creation
    pub id: DependentId,
    /// Chilean national-id string
    pub rut: String,
    pub age: u32,
    pub created_at: DateTime<Utc>,
}

impl Dependent {
    /// Constructs a dependent, enforcing its invariants.
    ///
    /// `created_at` defaults to "now" when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidRut`] when the RUT is shorter than
    /// 8 characters.
    pub fn new(
        id: DependentId,
        rut: String,
        age: u32,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ClientError> {
        // Simple RUT check (minimum 8 characters for the Chilean format)
        if rut.chars().count() < 8 {
            return Err(ClientError::InvalidRut(rut));
        }

        Ok(Self {
            id,
            rut,
            age,
            created_at: created_at.unwrap_or_else(Utc::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dependent() {
        let dependent =
            Dependent::new(DependentId::new(), "12345678-9".to_string(), 7, None).unwrap();
        assert_eq!(dependent.rut, "12345678-9");
        assert_eq!(dependent.age, 7);
        assert!(dependent.created_at <= Utc::now());
    }

    #[test]
    fn test_short_rut_rejected() {
        let result = Dependent::new(DependentId::new(), "1234567".to_string(), 7, None);
        assert!(matches!(result, Err(ClientError::InvalidRut(_))));
    }

    #[test]
    fn test_explicit_created_at_preserved() {
        let when = Utc::now() - chrono::Duration::days(3);
        let dependent =
            Dependent::new(DependentId::new(), "12345678-9".to_string(), 7, Some(when)).unwrap();
        assert_eq!(dependent.created_at, when);
    }
}
