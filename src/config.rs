//! Environment-driven configuration

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to (`BIND_ADDR`, default 0.0.0.0:8080)
    pub bind_addr: SocketAddr,
    /// Directory with the static marketing pages (`STATIC_DIR`, default `public`)
    pub static_dir: PathBuf,
    /// Resend API key; empty disables outbound mail (`RESEND_API_KEY`)
    pub resend_api_key: String,
    /// Sender address for admin notifications (`MAIL_FROM`)
    pub mail_from: String,
    /// Recipient address for admin notifications (`MAIL_TO`)
    pub mail_to: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("invalid BIND_ADDR")?;
        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()));
        let resend_api_key = std::env::var("RESEND_API_KEY").unwrap_or_default();
        let mail_from = std::env::var("MAIL_FROM")
            .unwrap_or_else(|_| "Kalkulator <kalkulator@rinnenklar.example>".to_string());
        let mail_to =
            std::env::var("MAIL_TO").unwrap_or_else(|_| "info@rinnenklar.example".to_string());

        Ok(Self {
            bind_addr,
            static_dir,
            resend_api_key,
            mail_from,
            mail_to,
        })
    }
}
