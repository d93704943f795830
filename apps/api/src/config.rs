use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// When unset the service runs on the in-memory document store.
    pub database_url: Option<String>,
    pub anthropic_api_key: String,
    pub jwt_secret: String,
    /// The only account allowed into the admin console. Provisioned at startup.
    pub admin_email: String,
    pub admin_password: String,
    pub token_ttl_hours: i64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            admin_email: require_env("ADMIN_EMAIL")?.trim().to_lowercase(),
            admin_password: require_env("ADMIN_PASSWORD")?,
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse::<i64>()
                .context("TOKEN_TTL_HOURS must be a whole number of hours")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            database_url: None,
            anthropic_api_key: "test-key".to_string(),
            jwt_secret: "test-secret".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin-secret".to_string(),
            token_ttl_hours: 1,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
