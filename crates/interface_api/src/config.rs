//! API configuration

use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Telegram bot token; notifications are disabled when unset
    pub telegram_bot_token: Option<String>,
    /// Telegram chat to deliver registration notifications to
    pub telegram_chat_id: Option<i64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/intake".to_string(),
            log_level: "info".to_string(),
            telegram_bot_token: None,
            telegram_chat_id: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true when both Telegram settings are present
    pub fn telegram_enabled(&self) -> bool {
        self.telegram_bot_token.is_some() && self.telegram_chat_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_disabled_without_both_settings() {
        let mut config = ApiConfig::default();
        assert!(!config.telegram_enabled());

        config.telegram_bot_token = Some("123:abc".to_string());
        assert!(!config.telegram_enabled());

        config.telegram_chat_id = Some(-100_123);
        assert!(config.telegram_enabled());
    }

    #[test]
    fn test_server_addr() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }
}
