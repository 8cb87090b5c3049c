//! Test Fixtures
//!
//! Pre-built valid field values for client intake entities. Every value
//! here passes both the input-form constraints and the entity invariants.

/// Valid string fixtures
pub struct StringFixtures;

impl StringFixtures {
    /// A well-formed Chilean RUT with a numeric check digit
    pub fn rut() -> &'static str {
        "12345678-9"
    }

    /// A well-formed RUT using the K check digit
    pub fn rut_with_k() -> &'static str {
        "12345678-K"
    }

    /// A second distinct RUT for multi-client scenarios
    pub fn other_rut() -> &'static str {
        "98765432-1"
    }

    pub fn email() -> &'static str {
        "ana@example.com"
    }

    pub fn other_email() -> &'static str {
        "luis@example.com"
    }

    pub fn phone() -> &'static str {
        "912345678"
    }

    pub fn region() -> &'static str {
        "Metropolitana"
    }

    pub fn commune() -> &'static str {
        "Maipú"
    }

    pub fn health_insurance() -> &'static str {
        "Fonasa"
    }
}
