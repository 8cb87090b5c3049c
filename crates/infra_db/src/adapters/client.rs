//! PostgreSQL Client Adapter
//!
//! This module provides the internal (database) adapter for the client
//! intake domain, implementing the `ClientRepository` trait on PostgreSQL.
//!
//! # Overview
//!
//! The `PostgresClientAdapter` bridges the domain port and the database:
//!
//! - Translates domain lookups into SQL queries
//! - Converts database rows back to domain entities
//! - Handles error translation between database and port errors
//!
//! A client and its dependents are persisted as one unit: `save` runs in a
//! single transaction that upserts the client row and replaces its
//! dependent rows, and the `ON DELETE CASCADE` constraint removes the
//! dependents together with their client.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresClientAdapter;
//! use domain_clients::ClientRepository;
//! use std::sync::Arc;
//!
//! let adapter = PostgresClientAdapter::new(pool);
//! let repository: Arc<dyn ClientRepository> = Arc::new(adapter);
//! let client = repository.find_by_email("ana@example.com").await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, ClientId, DependentId, DomainPort, HealthCheckResult, HealthCheckable,
    PortError,
};
use domain_clients::{Client, ClientAttributes, ClientRepository, ClientStatus, Dependent};

use crate::error::DatabaseError;

/// PostgreSQL-backed implementation of the `ClientRepository` trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - unique violations (duplicate email or RUT) -> `PortError::Conflict`
/// - connection failures -> `PortError::Connection`
/// - everything else -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresClientAdapter {
    pool: PgPool,
}

impl PostgresClientAdapter {
    /// Creates a new PostgreSQL client adapter
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_dependents(&self, client_id: Uuid) -> Result<Vec<Dependent>, PortError> {
        let rows = sqlx::query_as::<_, DependentRow>(
            r#"
            SELECT id, client_id, rut, age, created_at
            FROM client_dependents
            WHERE client_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        rows.into_iter().map(row_to_dependent).collect()
    }

    async fn fetch_client(&self, row: ClientRow) -> Result<Client, PortError> {
        let dependents = self.fetch_dependents(row.id).await?;
        row_to_client(row, dependents)
    }
}

impl DomainPort for PostgresClientAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClientAdapter {
    /// Checks database connectivity with a simple SELECT 1 query
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-client-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-client-adapter".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl ClientRepository for PostgresClientAdapter {
    #[instrument(skip(self), fields(client_id = %id))]
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
        debug!("Fetching client by ID");

        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, email, rut, phone, age, region, commune,
                   income, dependents, health_insurance, status, created_at
            FROM clients
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        match row {
            Some(row) => Ok(Some(self.fetch_client(row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, PortError> {
        debug!("Fetching client by email");

        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, email, rut, phone, age, region, commune,
                   income, dependents, health_insurance, status, created_at
            FROM clients
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        match row {
            Some(row) => Ok(Some(self.fetch_client(row).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, client), fields(client_id = %client.id))]
    async fn save(&self, client: &Client) -> Result<Client, PortError> {
        debug!("Saving client with {} dependents", client.dependent_list().len());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        sqlx::query(
            r#"
            INSERT INTO clients (id, name, email, rut, phone, age, region, commune,
                                 income, dependents, health_insurance, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                rut = EXCLUDED.rut,
                phone = EXCLUDED.phone,
                age = EXCLUDED.age,
                region = EXCLUDED.region,
                commune = EXCLUDED.commune,
                income = EXCLUDED.income,
                dependents = EXCLUDED.dependents,
                health_insurance = EXCLUDED.health_insurance,
                status = EXCLUDED.status
            "#,
        )
        .bind(client.id.as_uuid())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.rut)
        .bind(&client.phone)
        .bind(client.age as i32)
        .bind(&client.region)
        .bind(&client.commune)
        .bind(client.income)
        .bind(client.dependents as i32)
        .bind(&client.health_insurance)
        .bind(client.status().as_str())
        .bind(client.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        // Replace the dependent rows wholesale; the list is small and bounded
        sqlx::query("DELETE FROM client_dependents WHERE client_id = $1")
            .bind(client.id.as_uuid())
            .execute(&mut *tx)
            .await
            .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        for dependent in client.dependent_list() {
            sqlx::query(
                r#"
                INSERT INTO client_dependents (id, client_id, rut, age, created_at)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(dependent.id.as_uuid())
            .bind(client.id.as_uuid())
            .bind(&dependent.rut)
            .bind(dependent.age as i32)
            .bind(dependent.created_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| PortError::from(DatabaseError::from(&e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        self.find_by_id(client.id)
            .await?
            .ok_or_else(|| PortError::internal("Client vanished after save"))
    }

    #[instrument(skip(self), fields(client_id = %id))]
    async fn delete(&self, id: ClientId) -> Result<(), PortError> {
        debug!("Deleting client");

        // Dependent rows go with the client via ON DELETE CASCADE;
        // deleting an absent client is a no-op
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::from(DatabaseError::from(&e)))?;

        debug!(rows = result.rows_affected(), "Client delete completed");
        Ok(())
    }
}

// =============================================================================
// Row Types and Conversions
// =============================================================================

/// Database row for the clients table
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    email: String,
    rut: String,
    phone: String,
    age: i32,
    region: String,
    commune: String,
    income: Decimal,
    dependents: i32,
    health_insurance: String,
    status: String,
    created_at: DateTime<Utc>,
}

/// Database row for the client_dependents table
#[derive(Debug, sqlx::FromRow)]
struct DependentRow {
    id: Uuid,
    #[allow(dead_code)]
    client_id: Uuid,
    rut: String,
    age: i32,
    created_at: DateTime<Utc>,
}

/// Converts a client row plus its dependent rows back to the domain entity
///
/// Construction re-runs the entity invariants, so a corrupted row surfaces
/// as a transformation error instead of an invalid entity.
fn row_to_client(row: ClientRow, dependents: Vec<Dependent>) -> Result<Client, PortError> {
    let status = ClientStatus::parse(&row.status)
        .map_err(|e| PortError::transformation(e.to_string()))?;

    Client::new(ClientAttributes {
        id: ClientId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        rut: row.rut,
        phone: row.phone,
        age: non_negative(row.age, "age")?,
        region: row.region,
        commune: row.commune,
        income: row.income,
        dependents: non_negative(row.dependents, "dependents")?,
        health_insurance: row.health_insurance,
        created_at: Some(row.created_at),
        status: Some(status),
        dependent_list: dependents,
    })
    .map_err(|e| PortError::transformation(e.to_string()))
}

fn row_to_dependent(row: DependentRow) -> Result<Dependent, PortError> {
    Dependent::new(
        DependentId::from_uuid(row.id),
        row.rut,
        non_negative(row.age, "age")?,
        Some(row.created_at),
    )
    .map_err(|e| PortError::transformation(e.to_string()))
}

fn non_negative(value: i32, field: &str) -> Result<u32, PortError> {
    u32::try_from(value)
        .map_err(|_| PortError::transformation(format!("Negative {field} in database: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn client_row() -> ClientRow {
        ClientRow {
            id: Uuid::new_v4(),
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
            status: "ACTIVE".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_to_client_preserves_status() {
        let client = row_to_client(client_row(), Vec::new()).unwrap();
        assert_eq!(client.status(), ClientStatus::Active);
        assert_eq!(client.income, dec!(500000));
    }

    #[test]
    fn test_row_with_unknown_status_rejected() {
        let mut row = client_row();
        row.status = "SUSPENDED".to_string();
        let err = row_to_client(row, Vec::new()).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[test]
    fn test_row_with_negative_age_rejected() {
        let mut row = client_row();
        row.age = -1;
        let err = row_to_client(row, Vec::new()).unwrap_err();
        assert!(matches!(err, PortError::Transformation { .. }));
    }

    #[test]
    fn test_dependent_row_conversion() {
        let row = DependentRow {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            rut: "23456789-0".to_string(),
            age: 5,
            created_at: Utc::now(),
        };
        let dependent = row_to_dependent(row).unwrap();
        assert_eq!(dependent.age, 5);
    }
}
