use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub db_url: String,
    pub app_name: String,
    pub deployment: String,
    pub bind_address: String,
    /// Dimensions given to imported plates when the request does not set them
    pub plate_default_height: i32,
    pub plate_default_length: i32,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load from .env file if available

        let db_url = match env::var("DB_URL") {
            Ok(url) => url,
            Err(_) => format!(
                "{}://{}:{}@{}:{}/{}",
                var_or("DB_PREFIX", "postgresql"),
                env::var("DB_USER").context("DB_USER must be set when DB_URL is not")?,
                env::var("DB_PASSWORD").context("DB_PASSWORD must be set when DB_URL is not")?,
                env::var("DB_HOST").context("DB_HOST must be set when DB_URL is not")?,
                var_or("DB_PORT", "5432"),
                env::var("DB_NAME").context("DB_NAME must be set when DB_URL is not")?,
            ),
        };

        Ok(Config {
            db_url,
            app_name: var_or("APP_NAME", "freegenes-api"),
            deployment: var_or("DEPLOYMENT", "local"),
            bind_address: var_or("BIND_ADDRESS", "0.0.0.0:3000"),
            plate_default_height: parse_var("PLATE_DEFAULT_HEIGHT", 16)?,
            plate_default_length: parse_var("PLATE_DEFAULT_LENGTH", 24)?,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Config {
            db_url: "sqlite::memory:".to_string(),
            app_name: "freegenes-api-test".to_string(),
            deployment: "test".to_string(),
            bind_address: "127.0.0.1:0".to_string(),
            plate_default_height: 16,
            plate_default_length: 24,
        }
    }
}
