// src/config/mod.rs
// Environment-backed configuration, resolved once at startup and passed
// down explicitly (the engine never reads ambient globals).

use std::str::FromStr;
use std::time::Duration;

use crate::engine::EngineConfig;

#[derive(Debug, Clone)]
pub struct HumanizerConfig {
    // ── Server
    pub host: String,
    pub port: u16,
    pub cors_origin: String,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Generation provider
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub model: String,
    pub max_retries: u32,

    // ── Engine limits
    pub max_text_length: usize,

    // ── Logging
    pub log_level: String,
}

fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(val) => val.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}

impl HumanizerConfig {
    pub fn from_env() -> Self {
        // A missing .env file is fine; plain environment variables still apply.
        let _ = dotenvy::dotenv();

        Self {
            host: env_var_or("HUMANIZER_HOST", "0.0.0.0".to_string()),
            port: env_var_or("HUMANIZER_PORT", 5000),
            cors_origin: env_var_or("CORS_ORIGIN", "http://localhost:5173".to_string()),
            database_url: env_var_or("DATABASE_URL", "sqlite:./humanizer.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_base_url: env_var_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com/v1".to_string(),
            ),
            model: env_var_or("OPENAI_MODEL", "gpt-4o-mini".to_string()),
            max_retries: env_var_or("HUMANIZER_MAX_RETRIES", 3),
            max_text_length: env_var_or("HUMANIZER_MAX_TEXT_LENGTH", 10_000),
            log_level: env_var_or("HUMANIZER_LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            max_text_length: self.max_text_length,
            max_retries: self.max_retries,
            backoff_base: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_env() {
        let config = HumanizerConfig::from_env();
        assert!(config.max_text_length >= 1);
        assert!(config.max_retries >= 1);
        assert!(!config.bind_address().is_empty());
    }

    #[test]
    fn engine_config_mirrors_limits() {
        let config = HumanizerConfig::from_env();
        let engine = config.engine_config();
        assert_eq!(engine.max_text_length, config.max_text_length);
        assert_eq!(engine.max_retries, config.max_retries);
    }
}
