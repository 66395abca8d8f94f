use std::{path::PathBuf, time::Duration};

use super::{env_millis, env_or, env_url, ConfigError};

pub const SERVER_URL: &str = "http://localhost:8080/cotacao";
pub const OUTPUT_FILE: &str = "cotacao.txt";
pub const CLIENT_TIMEOUT_MS: u64 = 300;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub output_file: PathBuf,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(ClientConfig {
            server_url: env_url("SERVER_URL", SERVER_URL)?,
            output_file: PathBuf::from(env_or("OUTPUT_FILE", OUTPUT_FILE)),
            timeout: env_millis("CLIENT_TIMEOUT_MS", CLIENT_TIMEOUT_MS)?,
        })
    }
}
