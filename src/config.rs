// src/config.rs
use std::path::PathBuf;

/// Runtime configuration, loaded once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://metrify.db".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string())
            .into();
        let secret_key = std::env::var("SECRET_KEY")
            .unwrap_or_else(|_| "metrify-dev-secret".to_string());

        Self {
            database_url,
            upload_dir,
            secret_key,
        }
    }
}
