use std::{future::Future, path::Path, time::Duration};

use anyhow::{anyhow, Context};

use crate::appresult::StoreError;

const DATABASE_URL: &str = "DATABASE_URL";
const DATABASE_MAX_CONNECTIONS: &str = "DATABASE_MAX_CONNECTIONS";
const HOST: &str = "CHAT_HOST";
const PORT: &str = "CHAT_PORT";
const STORE_TIMEOUT_MS: &str = "STORE_TIMEOUT_MS";

const DEFAULT_CONFIG_PATH: &str = ".env";
const DEFAULT_MAX_CONNECTIONS: u32 = 16;
const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub store_deadline: StoreDeadline,
}

impl Config {
    /// Reads a dotenv file into the environment, then builds the config from
    /// the environment. An explicit `path` must exist. Without one, `.env` is
    /// read if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                dotenv::from_path(path)
                    .with_context(|| format!("unable to read config file {}", path.display()))?;
            }
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    dotenv::from_path(default)
                        .with_context(|| format!("unable to read config file {DEFAULT_CONFIG_PATH}"))?;
                } else {
                    tracing::warn!(path = DEFAULT_CONFIG_PATH, "config file not found, using process environment");
                }
            }
        }

        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| anyhow!("{key} not found"))
        };

        let port = required(PORT)?;
        let port = port.parse().with_context(|| format!("{PORT} is not a port: {port}"))?;

        let max_connections = match lookup(DATABASE_MAX_CONNECTIONS) {
            Some(value) => value
                .parse()
                .with_context(|| format!("{DATABASE_MAX_CONNECTIONS} is not a number: {value}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let store_deadline = match lookup(STORE_TIMEOUT_MS) {
            Some(value) => StoreDeadline(Duration::from_millis(
                value
                    .parse()
                    .with_context(|| format!("{STORE_TIMEOUT_MS} is not a number: {value}"))?,
            )),
            None => StoreDeadline::default(),
        };

        Ok(Self {
            database_url: required(DATABASE_URL)?,
            max_connections,
            host: required(HOST)?,
            port,
            store_deadline,
        })
    }

    pub fn address(&self) -> String {
        // bracket bare IPv6 hosts
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// How long a single store call may take before it is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreDeadline(pub Duration);

impl Default for StoreDeadline {
    fn default() -> Self {
        Self(DEFAULT_STORE_TIMEOUT)
    }
}

impl StoreDeadline {
    /// Runs `call`, dropping it if the deadline passes. Dropping an unfinished
    /// call rolls back whatever transaction it had open.
    pub async fn run<T>(
        self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.0, call)
            .await
            .map_err(|_| StoreError::Timeout(self.0))?
    }
}
