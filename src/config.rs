use std::env;
use std::net::SocketAddr;

use crate::db::DEFAULT_NAMESPACE;
use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub namespace: String,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://course_catalog.db?mode=rwc".to_string());

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let namespace = lookup("STORAGE_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        if namespace.trim().is_empty() {
            return Err(AppError::Config("STORAGE_NAMESPACE must not be empty".to_string()));
        }

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            None => true,
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| AppError::Config(format!("SEED_DEMO_DATA is not a boolean: {}", raw)))?,
        };

        Ok(Self {
            database_url,
            bind_addr,
            namespace,
            seed_demo_data,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
