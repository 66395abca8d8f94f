use std::{net::SocketAddr, path::PathBuf, time::Duration};

use super::{env_millis, env_number, env_or, env_url, upstream, ConfigError};

pub const PORT: u16 = 8080;
pub const DB_PATH: &str = "./cotacoes.db";
pub const COTACAO_ROUTE: &str = "/cotacao";
pub const INSERT_TIMEOUT_MS: u64 = 10;
pub const INSERT_TIMEOUT: Duration = Duration::from_millis(INSERT_TIMEOUT_MS);

/// Per-stage deadlines of the quote handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub upstream: Duration,
    pub insert: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Timeouts {
            upstream: upstream::UPSTREAM_TIMEOUT,
            insert: INSERT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    pub upstream_url: String,
    pub timeouts: Timeouts,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env_number("PORT", PORT)?;
        let db_path = PathBuf::from(env_or("DB_PATH", DB_PATH));
        let upstream_url = env_url("UPSTREAM_URL", upstream::AWESOME_API_URL)?;
        let timeouts = Timeouts {
            upstream: env_millis("UPSTREAM_TIMEOUT_MS", upstream::UPSTREAM_TIMEOUT_MS)?,
            insert: env_millis("INSERT_TIMEOUT_MS", INSERT_TIMEOUT_MS)?,
        };

        Ok(ServerConfig {
            port,
            db_path,
            upstream_url,
            timeouts,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
