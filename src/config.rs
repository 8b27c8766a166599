//! Application configuration management with security considerations.
//!
//! This module handles all configuration values required for the application:
//! WhatsApp Business API credentials, wallet-custody API credentials and the
//! fiat-ramp API credentials. Sensitive fields are clearly marked and should
//! never be logged.

use envconfig::Envconfig;
use tokio::sync::OnceCell;

/// Application configuration with security-aware field management.
///
/// This struct contains all environment variables used to configure the bot.
///
/// # Security Requirements
/// - All `SENSITIVE` fields must be stored securely (encrypted at rest)
/// - Use secret management systems in production
/// - Never log or expose sensitive values
#[derive(Envconfig, Clone)]
pub struct AppConfig {
    /// Environment name to deploy the app (NON-SENSITIVE)
    /// Values: "local", "dev", "staging", "prod"
    #[envconfig(default = "local")]
    pub env: String,

    /// Host address for web server binding (NON-SENSITIVE)
    /// Example: "0.0.0.0", "localhost"
    #[envconfig(default = "0.0.0.0")]
    pub web_server_host: String,

    /// Port for web server binding (NON-SENSITIVE)
    #[envconfig(default = "8080")]
    pub web_server_port: u64,

    /// Path to SSL private key file (SENSITIVE PATH)
    /// Security: File should have 600 permissions, store path securely
    #[envconfig(default = "server.key")]
    pub private_key_path: String,

    /// Path to SSL certificate file (NON-SENSITIVE)
    #[envconfig(default = "server.crt")]
    pub certificate_path: String,

    /// WhatsApp Business phone number ID (SEMI-SENSITIVE)
    /// Security: Restrict access, don't log in production
    pub whatsapp_business_phone_number_id: u64,

    /// 🔒 SENSITIVE: WhatsApp Business authentication token
    /// Security: Store in secure secret management system
    pub whatsapp_business_auth: String,

    /// Token echoed back during the webhook subscription handshake
    /// (SEMI-SENSITIVE)
    pub whatsapp_verify_token: String,

    /// 🔒 SENSITIVE: Meta app secret used to verify X-Hub-Signature-256
    /// webhook signatures
    pub whatsapp_app_secret: String,

    /// Base URL of the wallet-custody API (NON-SENSITIVE)
    /// Example: "https://api.wallets.example.com/v1"
    pub wallet_api_base_url: String,

    /// 🔒 SENSITIVE: Wallet-custody API bearer token
    pub wallet_api_key: String,

    /// Base URL of the fiat on/off-ramp API (NON-SENSITIVE)
    /// Example: "https://api.ramp.example.com/v1"
    pub ramp_api_base_url: String,

    /// 🔒 SENSITIVE: Fiat-ramp API bearer token
    pub ramp_api_key: String,

    /// 🔒 SENSITIVE: Logfire write token for telemetry export
    #[envconfig(default = "")]
    pub logfire_token: String,
}

impl AppConfig {
    /// Checks if running in production environment
    pub fn is_prod(&self) -> bool {
        self.env.to_lowercase() == "prod"
    }

    /// Constructs the WhatsApp Business API endpoint for sending messages
    pub fn whatsapp_send_msg_endpoint(&self) -> String {
        format!(
            "https://graph.facebook.com/v22.0/{id}/messages",
            id = self.whatsapp_business_phone_number_id
        )
    }
}

/// Global application configuration instance.
///
/// Initialized once at startup by [`init_config`]; route handlers and vendor
/// clients read it through `APP_CONFIG.get()`.
pub static APP_CONFIG: OnceCell<AppConfig> = OnceCell::const_new();

/// Loads the configuration from environment variables and installs it in
/// [`APP_CONFIG`].
pub async fn init_config() -> anyhow::Result<()> {
    let app_config = AppConfig::init_from_env()?;
    APP_CONFIG
        .set(app_config)
        .map_err(|_| anyhow::anyhow!("app config was already initialized"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            env: "local".to_string(),
            web_server_host: "0.0.0.0".to_string(),
            web_server_port: 8080,
            private_key_path: "server.key".to_string(),
            certificate_path: "server.crt".to_string(),
            whatsapp_business_phone_number_id: 1234567890,
            whatsapp_business_auth: "wa-token".to_string(),
            whatsapp_verify_token: "verify-me".to_string(),
            whatsapp_app_secret: "app-secret".to_string(),
            wallet_api_base_url: "https://api.wallets.example.com/v1/".to_string(),
            wallet_api_key: "wallet-key".to_string(),
            ramp_api_base_url: "https://api.ramp.example.com/v1".to_string(),
            ramp_api_key: "ramp-key".to_string(),
            logfire_token: String::new(),
        }
    }

    #[test]
    fn test_whatsapp_send_msg_endpoint() {
        let config = test_config();
        assert_eq!(
            config.whatsapp_send_msg_endpoint(),
            "https://graph.facebook.com/v22.0/1234567890/messages"
        );
    }

    #[test]
    fn test_is_prod() {
        let mut config = test_config();
        assert!(!config.is_prod());
        config.env = "PROD".to_string();
        assert!(config.is_prod());
    }
}
