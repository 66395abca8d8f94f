use std::{env, time::Duration};
use thiserror::Error;
use url::Url;

pub mod client;
pub mod server;
pub mod upstream;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("ENV var {var} should be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("ENV var {var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

fn env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_url(var: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = env_or(var, default);

    Url::parse(&value).map_err(|source| ConfigError::InvalidUrl { var, source })?;

    Ok(value)
}

fn env_number<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}

fn env_millis(var: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    let millis = env_number(var, default_ms)?;

    Ok(Duration::from_millis(millis))
}
