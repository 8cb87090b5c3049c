//! Client registration workflow
//!
//! Orchestrates intake of a new client: field validation, duplicate-email
//! lookup, entity construction, persistence through the repository port and
//! a best-effort `ClientRegistered` event afterwards.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use core_kernel::ClientId;

use crate::client::{Client, ClientAttributes};
use crate::error::ClientError;
use crate::events::{ClientEvent, EventPublisher};
use crate::ports::ClientRepository;

/// Validated input for registering a client.
///
/// Field constraints mirror the intake form; the entity re-checks its own
/// invariants on construction, so a `Client` stays valid even if this layer
/// is bypassed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterClientInput {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(
        length(min = 8, max = 10, message = "RUT must be between 8 and 10 characters"),
        custom(function = validate_rut_format)
    )]
    pub rut: String,

    #[validate(length(min = 8, max = 15, message = "Phone must be between 8 and 15 characters"))]
    pub phone: String,

    pub age: u32,

    #[validate(length(min = 2, max = 50, message = "Region must be between 2 and 50 characters"))]
    pub region: String,

    #[validate(length(min = 2, max = 50, message = "Commune must be between 2 and 50 characters"))]
    pub commune: String,

    #[validate(custom(function = validate_income))]
    pub income: Decimal,

    #[validate(range(min = 0, max = 20, message = "Dependents must be between 0 and 20"))]
    pub dependents: u32,

    #[validate(length(
        min = 2,
        max = 50,
        message = "Health insurance must be between 2 and 50 characters"
    ))]
    pub health_insurance: String,
}

/// Digits followed by an optional dash and a single check digit (0-9, k or K).
fn validate_rut_format(rut: &str) -> Result<(), ValidationError> {
    let chars: Vec<char> = rut.chars().collect();
    let Some((&check, body)) = chars.split_last() else {
        return Err(ValidationError::new("rut_format"));
    };
    let body = match body.split_last() {
        Some((&'-', rest)) => rest,
        _ => body,
    };
    let body_ok = !body.is_empty() && body.iter().all(|c| c.is_ascii_digit());
    let check_ok = check.is_ascii_digit() || check == 'k' || check == 'K';
    if body_ok && check_ok {
        Ok(())
    } else {
        Err(ValidationError::new("rut_format"))
    }
}

fn validate_income(income: &Decimal) -> Result<(), ValidationError> {
    if *income < Decimal::ZERO {
        return Err(ValidationError::new("negative_income"));
    }
    Ok(())
}

/// Use case: register a new client.
///
/// # Workflow
///
/// 1. Validate the input fields
/// 2. Reject the registration if the email is already taken
/// 3. Construct the entity (domain invariants enforced there)
/// 4. Persist through the repository port
/// 5. Publish `ClientRegistered` (fire-and-forget)
pub struct RegisterClientUseCase {
    repository: Arc<dyn ClientRepository>,
    events: Arc<dyn EventPublisher>,
}

impl RegisterClientUseCase {
    pub fn new(repository: Arc<dyn ClientRepository>, events: Arc<dyn EventPublisher>) -> Self {
        Self { repository, events }
    }

    /// Runs the registration workflow.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] when an input field fails its constraint
    /// - [`ClientError::DuplicateEmail`] when the email is already registered
    /// - entity invariant errors from [`Client::new`]
    /// - [`ClientError::Port`] when persistence fails
    #[tracing::instrument(skip(self, input), fields(email = %input.email))]
    pub async fn execute(&self, input: RegisterClientInput) -> Result<Client, ClientError> {
        input
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        if self.repository.find_by_email(&input.email).await?.is_some() {
            tracing::info!(email = %input.email, "Registration rejected: email already taken");
            return Err(ClientError::DuplicateEmail(input.email));
        }

        let client = Client::new(ClientAttributes {
            id: ClientId::new(),
            name: input.name,
            email: input.email,
            rut: input.rut,
            phone: input.phone,
            age: input.age,
            region: input.region,
            commune: input.commune,
            income: input.income,
            dependents: input.dependents,
            health_insurance: input.health_insurance,
            created_at: None,
            status: None,
            dependent_list: Vec::new(),
        })?;

        let saved = self.repository.save(&client).await?;

        tracing::info!(client_id = %saved.id, "Client registered");
        self.events.publish(ClientEvent::registered(&saved));

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::mock::RecordingEventBus;
    use crate::ports::mock::InMemoryClientRepository;
    use rust_decimal_macros::dec;

    fn valid_input() -> RegisterClientInput {
        RegisterClientInput {
            name: "Ana Paz".to_string(),
            email: "ana@example.com".to_string(),
            rut: "12345678-9".to_string(),
            phone: "912345678".to_string(),
            age: 30,
            region: "Metropolitana".to_string(),
            commune: "Maipú".to_string(),
            income: dec!(500000),
            dependents: 2,
            health_insurance: "Fonasa".to_string(),
        }
    }

    fn use_case() -> (
        RegisterClientUseCase,
        Arc<InMemoryClientRepository>,
        Arc<RecordingEventBus>,
    ) {
        let repo = Arc::new(InMemoryClientRepository::new());
        let events = Arc::new(RecordingEventBus::new());
        let use_case = RegisterClientUseCase::new(repo.clone(), events.clone());
        (use_case, repo, events)
    }

    #[tokio::test]
    async fn test_register_persists_and_publishes() {
        let (use_case, repo, events) = use_case();

        let client = use_case.execute(valid_input()).await.unwrap();
        assert_eq!(client.email, "ana@example.com");
        assert_eq!(repo.save_count(), 1);

        let published = events.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].client_id(), client.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_before_save() {
        let (use_case, repo, events) = use_case();
        use_case.execute(valid_input()).await.unwrap();

        let mut second = valid_input();
        second.rut = "98765432-1".to_string();
        let err = use_case.execute(second).await.unwrap_err();

        assert!(matches!(err, ClientError::DuplicateEmail(ref e) if e == "ana@example.com"));
        assert_eq!(repo.save_count(), 1);
        assert_eq!(events.published().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_field_rejected_before_lookup() {
        let (use_case, repo, events) = use_case();

        let mut input = valid_input();
        input.name = "A".to_string();
        let err = use_case.execute(input).await.unwrap_err();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(repo.save_count(), 0);
        assert!(events.published().is_empty());
    }

    #[tokio::test]
    async fn test_rut_format_enforced() {
        let (use_case, _, _) = use_case();

        let mut input = valid_input();
        input.rut = "1234-5678".to_string();
        let err = use_case.execute(input).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rut_with_k_check_digit_accepted() {
        let (use_case, _, _) = use_case();

        let mut input = valid_input();
        input.rut = "12345678-K".to_string();
        assert!(use_case.execute(input).await.is_ok());
    }

    #[test]
    fn test_rut_format_rules() {
        assert!(validate_rut_format("12345678-9").is_ok());
        assert!(validate_rut_format("123456789").is_ok());
        assert!(validate_rut_format("12345678-k").is_ok());
        assert!(validate_rut_format("12-345678").is_err());
        assert!(validate_rut_format("abcdefgh-9").is_err());
        assert!(validate_rut_format("-9").is_err());
    }
}
