use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;

use crate::domains::auth::password::MIN_COST;

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    /// Base64-encoded PEM RSA private key
    pub token_private_key: String,
    /// Base64-encoded PEM RSA public key
    pub token_public_key: String,
    pub token_issuer: String,
    pub token_ttl_seconds: i64,
    pub bcrypt_cost: u32,
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "1323".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            token_private_key: env::var("TOKEN_PRIVATE_KEY")
                .context("TOKEN_PRIVATE_KEY must be set")?,
            token_public_key: env::var("TOKEN_PUBLIC_KEY")
                .context("TOKEN_PUBLIC_KEY must be set")?,
            token_issuer: env::var("TOKEN_ISSUER").unwrap_or_else(|_| "user-service".to_string()),
            token_ttl_seconds: env::var("TOKEN_TTL_SECONDS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("TOKEN_TTL_SECONDS must be a valid number")?,
            bcrypt_cost: env::var("BCRYPT_COST")
                .unwrap_or_else(|_| MIN_COST.to_string())
                .parse()
                .context("BCRYPT_COST must be a valid number")?,
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECONDS must be a valid number")?,
        })
    }
}

// Key material and credentials stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("database_max_connections", &self.database_max_connections)
            .field("port", &self.port)
            .field("token_private_key", &"<redacted>")
            .field("token_public_key", &"<redacted>")
            .field("token_issuer", &self.token_issuer)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}
