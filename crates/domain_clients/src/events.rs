//! Domain events for the client intake workflow
//!
//! Events capture significant occurrences after a successful business
//! operation. They are consumed asynchronously by unrelated collaborators
//! (currently the outbound notification channel); delivery is best-effort
//! and never blocks or fails the operation that emitted the event.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use core_kernel::ClientId;
use crate::client::Client;

/// Domain events emitted by the client intake workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientEvent {
    /// A new client completed registration
    ClientRegistered {
        client_id: ClientId,
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
        status: String,
        /// Notification time, distinct from the client's creation time
        timestamp: DateTime<Utc>,
    },
}

impl ClientEvent {
    /// Builds the registration event from a persisted client.
    pub fn registered(client: &Client) -> Self {
        ClientEvent::ClientRegistered {
            client_id: client.id,
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
            timestamp: Utc::now(),
        }
    }

    /// Returns the client ID associated with this event
    pub fn client_id(&self) -> ClientId {
        match self {
            ClientEvent::ClientRegistered { client_id, .. } => *client_id,
        }
    }

    /// Returns the timestamp of this event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ClientEvent::ClientRegistered { timestamp, .. } => *timestamp,
        }
    }

    /// Returns the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            ClientEvent::ClientRegistered { .. } => "ClientRegistered",
        }
    }
}

/// Outbound port for publishing domain events.
///
/// Publication is fire-and-forget: implementations must not block the
/// caller and must swallow delivery failures (logging them) rather than
/// surface them to the registration workflow.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ClientEvent);
}

/// Channel-backed event bus.
///
/// Writes events to an unbounded tokio channel; a background worker owns
/// the receiving end and performs the actual delivery. A closed channel
/// (worker gone) is logged and otherwise ignored.
#[derive(Debug, Clone)]
pub struct ChannelEventBus {
    tx: mpsc::UnboundedSender<ClientEvent>,
}

impl ChannelEventBus {
    /// Creates the bus together with the receiver the delivery worker
    /// should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventPublisher for ChannelEventBus {
    fn publish(&self, event: ClientEvent) {
        let event_type = event.event_type();
        if self.tx.send(event).is_err() {
            tracing::warn!(event_type, "Event dropped: delivery worker is not running");
        }
    }
}

/// Mock publishers for testing without a delivery worker.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records every published event for later assertions.
    #[derive(Debug, Default)]
    pub struct RecordingEventBus {
        events: Mutex<Vec<ClientEvent>>,
    }

    impl RecordingEventBus {
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a snapshot of the events published so far.
        pub fn published(&self) -> Vec<ClientEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventPublisher for RecordingEventBus {
        fn publish(&self, event: ClientEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
