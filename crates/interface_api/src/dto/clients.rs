//! Client intake DTOs
//!
//! The registration request accepts only the intake-form fields: system
//! fields (`id`, `status`, `createdAt`) are rejected outright by
//! `deny_unknown_fields` rather than silently ignored, so a caller cannot
//! attempt to pick their own identifier or start out active.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_clients::{Client, Dependent, RegisterClientInput};

/// Request body for registering a new client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterClientRequest {
    pub name: String,
    pub email: String,
    pub rut: String,
    pub phone: String,
    pub age: u32,
    pub region: String,
    pub commune: String,
    pub income: Decimal,
    pub dependents: u32,
    pub health_insurance: String,
}

impl From<RegisterClientRequest> for RegisterClientInput {
    fn from(request: RegisterClientRequest) -> Self {
        RegisterClientInput {
            name: request.name,
            email: request.email,
            rut: request.rut,
            phone: request.phone,
            age: request.age,
            region: request.region,
            commune: request.commune,
            income: request.income,
            dependents: request.dependents,
            health_insurance: request.health_insurance,
        }
    }
}

/// Client representation returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub rut: String,
    pub phone: String,
    pub age: u32,
    pub region: String,
    pub commune: String,
    pub income: Decimal,
    pub dependents: u32,
    pub health_insurance: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub dependent_list: Vec<DependentResponse>,
}

/// Dependent representation returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentResponse {
    pub id: String,
    pub rut: String,
    pub age: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&Client> for ClientResponse {
    fn from(client: &Client) -> Self {
        ClientResponse {
            id: client.id.as_uuid().to_string(),
            name: client.name.clone(),
            email: client.email.clone(),
            rut: client.rut.clone(),
            phone: client.phone.clone(),
            age: client.age,
            region: client.region.clone(),
            commune: client.commune.clone(),
            income: client.income,
            dependents: client.dependents,
            health_insurance: client.health_insurance.clone(),
            status: client.status().as_str().to_string(),
            created_at: client.created_at,
            dependent_list: client.dependent_list().iter().map(DependentResponse::from).collect(),
        }
    }
}

impl From<&Dependent> for DependentResponse {
    fn from(dependent: &Dependent) -> Self {
        DependentResponse {
            id: dependent.id.as_uuid().to_string(),
            rut: dependent.rut.clone(),
            age: dependent.age,
            created_at: dependent.created_at,
        }
    }
}
