use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means the in-memory repository.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expires_in: i64,
    pub admin_email: String,
    pub admin_password_hash: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expires_in: env::var("JWT_EXPIRES_IN")
                .unwrap_or_else(|_| "3600".to_string()) // 1 hour
                .parse()
                .context("JWT_EXPIRES_IN must be a number of seconds")?,
            admin_email: env::var("ADMIN_EMAIL").context("ADMIN_EMAIL must be set")?,
            admin_password_hash: env::var("ADMIN_PASSWORD_HASH")
                .context("ADMIN_PASSWORD_HASH must be set (see `ofitsoft-server hash-password`)")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,
        })
    }
}
