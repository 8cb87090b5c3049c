//! Repository port for client persistence
//!
//! The domain owns this interface; storage adapters implement it. The
//! workflow layer only ever sees `dyn ClientRepository`, so the concrete
//! store (Postgres in production, in-memory in tests) is swappable without
//! touching domain code.

use async_trait::async_trait;

use core_kernel::{ClientId, DomainPort, HealthCheckable, PortError};
use crate::client::Client;

/// Persistence port for the client aggregate.
///
/// `save` persists the client together with its attached dependents as a
/// single unit; a client is never stored without its dependent list.
#[async_trait]
pub trait ClientRepository: DomainPort + HealthCheckable {
    /// Looks up a client by its identifier.
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError>;

    /// Looks up a client by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<Client>, PortError>;

    /// Persists the client and its dependents, returning the stored record.
    async fn save(&self, client: &Client) -> Result<Client, PortError>;

    /// Removes a client; its dependents are removed with it.
    ///
    /// Deleting an absent client is a no-op, not an error.
    async fn delete(&self, id: ClientId) -> Result<(), PortError>;
}

/// Mock adapters for testing the workflow without a database.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// In-memory repository keyed by client ID.
    ///
    /// Counts `save` calls so tests can assert that a rejected registration
    /// never reached persistence.
    #[derive(Debug, Default)]
    pub struct InMemoryClientRepository {
        clients: RwLock<HashMap<ClientId, Client>>,
        save_calls: AtomicUsize,
    }

    impl InMemoryClientRepository {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of times `save` has been invoked.
        pub fn save_count(&self) -> usize {
            self.save_calls.load(Ordering::SeqCst)
        }

        /// Seeds a client directly, bypassing the workflow.
        pub async fn insert(&self, client: Client) {
            self.clients.write().await.insert(client.id, client);
        }
    }

    impl DomainPort for InMemoryClientRepository {}

    #[async_trait]
    impl HealthCheckable for InMemoryClientRepository {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("in_memory_client_repository")
        }
    }

    #[async_trait]
    impl ClientRepository for InMemoryClientRepository {
        async fn find_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
            Ok(self.clients.read().await.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Client>, PortError> {
            Ok(self
                .clients
                .read()
                .await
                .values()
                .find(|c| c.email == email)
                .cloned())
        }

        async fn save(&self, client: &Client) -> Result<Client, PortError> {
            self.save_calls.fetch_add(1, Ordering::SeqCst);
            self.clients
                .write()
                .await
                .insert(client.id, client.clone());
            Ok(client.clone())
        }

        async fn delete(&self, id: ClientId) -> Result<(), PortError> {
            self.clients.write().await.remove(&id);
            Ok(())
        }
    }
}
