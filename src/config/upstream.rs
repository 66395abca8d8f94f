use std::time::Duration;

pub const AWESOME_API_URL: &str = "https://economia.awesomeapi.com.br/json/last/USD-BRL";
pub const UPSTREAM_TIMEOUT_MS: u64 = 200;
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_millis(UPSTREAM_TIMEOUT_MS);
