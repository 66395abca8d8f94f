use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

use crate::models::quotes::CurrencyResponse;

#[derive(Error, Debug)]
pub enum AwesomeApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("upstream did not answer within {0:?}")]
    Timeout(Duration),
    #[error("upstream answered with status {0}")]
    Status(StatusCode),
    #[error("Response parsing error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("upstream answered with an empty bid")]
    EmptyBid,
}

impl AwesomeApiError {
    pub fn is_timeout(&self) -> bool {
        match self {
            AwesomeApiError::Timeout(_) => true,
            AwesomeApiError::Reqwest(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Fetches the current USD-BRL bid from `url`, abandoning the call once
/// `deadline` has elapsed.
pub async fn fetch_usd_brl(
    client: &Client,
    url: &str,
    deadline: Duration,
) -> Result<String, AwesomeApiError> {
    let res = tokio::time::timeout(deadline, request_bid(client, url))
        .await
        .map_err(|_| AwesomeApiError::Timeout(deadline))
        .and_then(|res| res);

    match &res {
        Ok(bid) => info!("USD-BRL bid received: {}", bid),
        Err(e) if e.is_timeout() => warn!("timeout fetching quote from upstream API: {}", url),
        Err(_) => {}
    }

    res
}

async fn request_bid(client: &Client, url: &str) -> Result<String, AwesomeApiError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        return Err(AwesomeApiError::Status(status));
    }

    let body = response.bytes().await?;

    parse_usd_brl(&body)
}

fn parse_usd_brl(body: &[u8]) -> Result<String, AwesomeApiError> {
    let currency: CurrencyResponse = serde_json::from_slice(body)?;

    if currency.usdbrl.bid.is_empty() {
        return Err(AwesomeApiError::EmptyBid);
    }

    Ok(currency.usdbrl.bid)
}
