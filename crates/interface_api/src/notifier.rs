//! Telegram registration notifier
//!
//! A background worker drains the domain event channel and pushes a
//! formatted message to a Telegram chat for every registration. Delivery is
//! best-effort: failures are logged and never reach the intake workflow.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

use domain_clients::ClientEvent;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram delivery settings and HTTP client
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    bot_token: String,
    chat_id: i64,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: i64) -> Self {
        Self {
            http: reqwest::Client::new(),
            bot_token,
            chat_id,
        }
    }

    /// Sends one message to the configured chat
    async fn send(&self, text: &str) -> Result<(), reqwest::Error> {
        let url = format!("{TELEGRAM_API_BASE}/bot{}/sendMessage", self.bot_token);

        let response = self
            .http
            .post(&url)
            .json(&SendMessageRequest {
                chat_id: self.chat_id,
                text,
                parse_mode: "HTML",
            })
            .send()
            .await?;

        response.error_for_status()?;
        Ok(())
    }
}

/// Drains the event channel until every sender is dropped.
///
/// Runs as a spawned task; shutting the API down closes the channel and the
/// worker exits after delivering the remaining events.
pub async fn run_notifier(mut rx: UnboundedReceiver<ClientEvent>, notifier: TelegramNotifier) {
    info!("Telegram notifier started");

    while let Some(event) = rx.recv().await {
        let message = format_message(&event);
        match notifier.send(&message).await {
            Ok(()) => info!(client_id = %event.client_id(), "Telegram notification sent"),
            Err(e) => error!(client_id = %event.client_id(), "Telegram delivery failed: {e}"),
        }
    }

    info!("Telegram notifier stopped");
}

/// Drains and discards events when Telegram is not configured.
///
/// Keeps the channel alive so publishing stays a silent no-op instead of
/// logging a dropped-event warning per registration.
pub async fn run_discarding_notifier(mut rx: UnboundedReceiver<ClientEvent>) {
    warn!("Telegram not configured; registration notifications are disabled");
    while rx.recv().await.is_some() {}
}

/// Formats the registration announcement for Telegram (HTML parse mode)
fn format_message(event: &ClientEvent) -> String {
    let ClientEvent::ClientRegistered {
        client_id,
        name,
        email,
        rut,
        phone,
        age,
        income,
        dependents,
        health_insurance,
        ..
    } = event;

    let id = client_id.as_uuid().to_string();
    let short_id = &id[..8];

    format!(
        "🚀 <b>NUEVO CLIENTE REGISTRADO</b>\n\n\
         👤 <b>Nombre:</b> {name}\n\
         📧 <b>Email:</b> {email}\n\
         🆔 <b>RUT:</b> {rut}\n\
         📞 <b>Teléfono:</b> {phone}\n\
         🎂 <b>Edad:</b> {age} años\n\
         💰 <b>Ingreso mensual:</b> {income}\n\
         👥 <b>Cargas:</b> {dependents}\n\
         🏥 <b>Previsión actual:</b> {health_insurance}\n\n\
         🆔 <b>ID Interno:</b> <code>{short_id}...</code>\n\n\
         <i>Favor revisar el panel de administración.</i>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClientId;
    use domain_clients::{Client, ClientAttributes};
    use rust_decimal_macros::dec;

    fn registered_event() -> ClientEvent {
        let client = Client::new(ClientAttributes {
            id: ClientId::new(),
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
            created_at: None,
            status: None,
            dependent_list: Vec::new(),
        })
        .unwrap();
        ClientEvent::registered(&client)
    }

    #[test]
    fn test_message_contains_client_fields() {
        let event = registered_event();
        let message = format_message(&event);

        assert!(message.contains("Ana Paz"));
        assert!(message.contains("ana@example.com"));
        assert!(message.contains("12345678-9"));
        assert!(message.contains("Fonasa"));
        assert!(message.contains("NUEVO CLIENTE REGISTRADO"));
    }

    #[test]
    fn test_message_truncates_internal_id() {
        let event = registered_event();
        let full_id = event.client_id().as_uuid().to_string();
        let message = format_message(&event);

        assert!(message.contains(&format!("{}...", &full_id[..8])));
        assert!(!message.contains(&full_id));
    }
}
