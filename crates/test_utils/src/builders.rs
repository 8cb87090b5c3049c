//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::ClientId;
use domain_clients::{
    Client, ClientAttributes, ClientStatus, Dependent, RegisterClientInput,
};

use crate::fixtures::StringFixtures;

/// Builder for constructing test clients
pub struct TestClientBuilder {
    id: ClientId,
    name: String,
    email: String,
    rut: String,
    phone: String,
    age: u32,
    region: String,
    commune: String,
    income: Decimal,
    dependents: u32,
    health_insurance: String,
    created_at: Option<DateTime<Utc>>,
    status: Option<ClientStatus>,
    dependent_list: Vec<Dependent>,
}

impl Default for TestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClientBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: ClientId::new(),
            name: "Ana Paz".to_string(),
            email: StringFixtures::email().to_string(),
            rut: StringFixtures::rut().to_string(),
            phone: StringFixtures::phone().to_string(),
            age: 30,
            region: StringFixtures::region().to_string(),
            commune: StringFixtures::commune().to_string(),
            income: dec!(500000),
            dependents: 0,
            health_insurance: StringFixtures::health_insurance().to_string(),
            created_at: None,
            status: None,
            dependent_list: Vec::new(),
        }
    }

    /// Sets the client ID
    pub fn with_id(mut self, id: ClientId) -> Self {
        self.id = id;
        self
    }

    /// Sets the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the RUT
    pub fn with_rut(mut self, rut: impl Into<String>) -> Self {
        self.rut = rut.into();
        self
    }

    /// Sets the declared income
    pub fn with_income(mut self, income: Decimal) -> Self {
        self.income = income;
        self
    }

    /// Sets the declared dependent count
    pub fn with_dependents(mut self, dependents: u32) -> Self {
        self.dependents = dependents;
        self
    }

    /// Sets the lifecycle status
    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the creation timestamp
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Attaches a dependent
    pub fn with_dependent(mut self, dependent: Dependent) -> Self {
        self.dependent_list.push(dependent);
        self
    }

    /// Builds the client, panicking on invalid test data
    pub fn build(self) -> Client {
        Client::new(ClientAttributes {
            id: self.id,
            name: self.name,
            email: self.email,
            rut: self.rut,
            phone: self.phone,
            age: self.age,
            region: self.region,
            commune: self.commune,
            income: self.income,
            dependents: self.dependents,
            health_insurance: self.health_insurance,
            created_at: self.created_at,
            status: self.status,
            dependent_list: self.dependent_list,
        })
        .expect("test client should satisfy the entity invariants")
    }
}

/// Builder for constructing registration inputs
pub struct TestRegisterInputBuilder {
    input: RegisterClientInput,
}

impl Default for TestRegisterInputBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestRegisterInputBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            input: RegisterClientInput {
                name: "Ana Paz".to_string(),
                email: StringFixtures::email().to_string(),
                rut: StringFixtures::rut().to_string(),
                phone: StringFixtures::phone().to_string(),
                age: 30,
                region: StringFixtures::region().to_string(),
                commune: StringFixtures::commune().to_string(),
                income: dec!(500000),
                dependents: 0,
                health_insurance: StringFixtures::health_insurance().to_string(),
            },
        }
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.input.email = email.into();
        self
    }

    /// Sets the RUT
    pub fn with_rut(mut self, rut: impl Into<String>) -> Self {
        self.input.rut = rut.into();
        self
    }

    /// Sets the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.input.name = name.into();
        self
    }

    /// Sets the declared income
    pub fn with_income(mut self, income: Decimal) -> Self {
        self.input.income = income;
        self
    }

    /// Builds the registration input
    pub fn build(self) -> RegisterClientInput {
        self.input
    }
}
