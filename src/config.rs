use std::{net::SocketAddr, path::PathBuf, str::FromStr};

use anyhow::Context;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `DATABASE_MAX_CONNECTIONS`
    pub max_connections: u32,
    /// `CHAT_ADDR`
    pub addr: SocketAddr,
    /// `CLIENT_DIR`, served at `/`.
    pub client_dir: PathBuf,
    /// `MAX_BODY_BYTES`, the largest POST body accepted.
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: "sqlite://chat.db?mode=rwc".to_owned(),
            max_connections: 16,
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            client_dir: PathBuf::from("client"),
            max_body_bytes: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Config> {
        Self::from_vars(|key| dotenv::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let defaults = Config::default();
        let config = Config {
            database_url: var("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse(&var, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(defaults.max_connections),
            addr: parse(&var, "CHAT_ADDR")?.unwrap_or(defaults.addr),
            client_dir: var("CLIENT_DIR").map(PathBuf::from).unwrap_or(defaults.client_dir),
            max_body_bytes: parse(&var, "MAX_BODY_BYTES")?.unwrap_or(defaults.max_body_bytes),
        };

        anyhow::ensure!(config.max_connections > 0, "DATABASE_MAX_CONNECTIONS must be at least 1");
        Ok(config)
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|value| {
            value
                .parse::<T>()
                .with_context(|| format!("invalid {key}: {value:?}"))
        })
        .transpose()
}
