//! Process configuration, read from the environment at startup.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to.
    pub bind_addr: String,
    /// Store location, e.g. `sqlite://my.db` (created if missing).
    pub database_url: String,
    /// Directory served for paths matching no route.
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("POSTBOX_ADDR", "0.0.0.0:8080"),
            database_url: env_or("DATABASE_URL", "sqlite://my.db"),
            static_dir: PathBuf::from(env_or("POSTBOX_STATIC_DIR", "public")),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(key, default, "environment variable not set, using default");
            default.to_string()
        }
    }
}
