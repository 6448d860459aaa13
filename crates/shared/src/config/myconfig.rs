use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!(
                "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub is_dev: bool,
    pub enable_file_log: bool,
    pub otel_endpoint: Option<String>,
    pub admin: Option<AdminBootstrap>,
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}

fn bool_var(key: &str, default: bool) -> Result<bool> {
    optional_var(key)
        .map(|v| parse_bool(key, &v))
        .transpose()
        .map(|v| v.unwrap_or(default))
}

fn parsed_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_var(key) {
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: {v}")),
        None => Ok(default),
    }
}

impl Config {
    pub fn init() -> Result<Self> {
        let storage = optional_var("STORAGE_BACKEND")
            .map(|v| v.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::Postgres);

        let database_url = match storage {
            StorageBackend::Postgres => Some(
                std::env::var("DATABASE_URL")
                    .context("Missing environment variable: DATABASE_URL")?,
            ),
            StorageBackend::Memory => optional_var("DATABASE_URL"),
        };

        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let admin = optional_var("ADMIN_EMAIL").map(|email| AdminBootstrap {
            email,
            password: optional_var("ADMIN_PASSWORD"),
        });

        Ok(Self {
            storage,
            database_url,
            db_max_connections: parsed_var("DB_MAX_CONNECTIONS", 10)?,
            jwt_secret,
            run_migrations: bool_var("RUN_MIGRATIONS", false)?,
            port: parsed_var("PORT", 8000)?,
            bcrypt_cost: parsed_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            is_dev: bool_var("DEV_MODE", false)?,
            enable_file_log: bool_var("ENABLE_FILE_LOG", false)?,
            otel_endpoint: optional_var("OTEL_ENDPOINT"),
            admin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_backend_parses_known_values() {
        assert_eq!(
            "Memory".parse::<StorageBackend>().unwrap(),
            StorageBackend::Memory
        );
        assert_eq!(
            "postgresql".parse::<StorageBackend>().unwrap(),
            StorageBackend::Postgres
        );
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn booleans_accept_words_and_digits() {
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "false").unwrap());
        assert!(parse_bool("X", "yes").is_err());
    }
}
