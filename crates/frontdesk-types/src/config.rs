//! Configuration types for Frontdesk.
//!
//! Deserialized from `config.toml` in the data directory. Every field
//! has a default so a partial (or missing) file still yields a usable
//! configuration.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub admin: AdminConfig,
    pub mailer: MailerConfig,
    pub site: SiteConfig,
    pub chat: ChatConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built marketing site; served when present.
    pub web_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            web_dir: "site/dist".to_string(),
        }
    }
}

/// Admin console settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Console login password. Login is refused while unset.
    pub password: Option<String>,
    /// Recipient for admin alert emails.
    pub alert_email: Option<String>,
}

/// Outbound email HTTP API settings.
///
/// When `api_url` or `api_token` is missing, the mailer degrades to a
/// logged no-op and the rest of the system behaves identically.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub from: String,
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            from: "Frontdesk <no-reply@localhost>".to_string(),
        }
    }
}

/// Public site details woven into notification email footers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub url: Option<String>,
    pub phone: Option<String>,
}

/// Live-chat relay tuning.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Delay before an automated reply is generated, in milliseconds.
    pub reply_delay_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_usable() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.chat.reply_delay_ms, 1500);
        assert!(config.mailer.api_url.is_none());
        assert!(config.admin.password.is_none());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[server]
port = 8080

[admin]
password = "hunter2"
alert_email = "owner@example.com"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.admin.password.as_deref(), Some("hunter2"));
        assert_eq!(config.chat.reply_delay_ms, 1500);
    }
}
