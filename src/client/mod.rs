use log::{info, warn};
use reqwest::{Client, StatusCode};
use std::{fs, io, path::Path, time::Duration};
use thiserror::Error;

use crate::{config::client::ClientConfig, models::quotes::QuoteReply};

#[derive(Error, Debug)]
pub enum QuoteClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server did not answer within {0:?}")]
    Timeout(Duration),
    #[error("server answered with status {0}")]
    Status(StatusCode),
    #[error("Response parsing error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not write quote file: {0}")]
    Io(#[from] io::Error),
}

impl QuoteClientError {
    pub fn is_timeout(&self) -> bool {
        match self {
            QuoteClientError::Timeout(_) => true,
            QuoteClientError::Request(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Asks the quote server for the current bid. The deadline covers the whole
/// exchange, body included.
pub async fn fetch_quote(
    client: &Client,
    url: &str,
    deadline: Duration,
) -> Result<QuoteReply, QuoteClientError> {
    let res = tokio::time::timeout(deadline, request_quote(client, url))
        .await
        .map_err(|_| QuoteClientError::Timeout(deadline))
        .and_then(|res| res);

    if let Err(e) = &res {
        if e.is_timeout() {
            warn!("timeout waiting for the quote server response");
        }
    }

    res
}

async fn request_quote(client: &Client, url: &str) -> Result<QuoteReply, QuoteClientError> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if status != StatusCode::OK {
        return Err(QuoteClientError::Status(status));
    }

    let body = response.bytes().await?;

    Ok(serde_json::from_slice(&body)?)
}

/// Overwrites `path` with a single `Dólar: <bid>` line.
pub fn write_quote(path: &Path, quote: &QuoteReply) -> Result<(), QuoteClientError> {
    fs::write(path, format!("Dólar: {}", quote.cotacao))?;

    Ok(())
}

/// One full client run. Nothing is written unless the whole exchange worked.
pub async fn run(client: &Client, config: &ClientConfig) -> Result<QuoteReply, QuoteClientError> {
    let quote = fetch_quote(client, &config.server_url, config.timeout).await?;

    write_quote(&config.output_file, &quote)?;

    info!("quote saved to {}", config.output_file.display());

    Ok(quote)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn config(server: &mockito::ServerGuard, dir: &Path) -> ClientConfig {
        ClientConfig {
            server_url: format!("{}/cotacao", server.url()),
            output_file: dir.join("cotacao.txt"),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_run_writes_quote_line() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cotacao")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"cotacao": "5.32"}"#)
            .create_async()
            .await;
        let dir = tempdir().unwrap();
        let config = config(&server, dir.path());

        let quote = run(&Client::new(), &config).await.unwrap();

        assert_eq!(quote.cotacao, "5.32");
        assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "Dólar: 5.32");
    }

    #[tokio::test]
    async fn test_run_overwrites_previous_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cotacao")
            .with_status(200)
            .with_body(r#"{"cotacao": "5.10"}"#)
            .create_async()
            .await;
        let dir = tempdir().unwrap();
        let config = config(&server, dir.path());
        fs::write(&config.output_file, "Dólar: 4.99\nleftover line\n").unwrap();

        run(&Client::new(), &config).await.unwrap();

        assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "Dólar: 5.10");
    }

    #[tokio::test]
    async fn test_run_server_error_creates_no_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cotacao")
            .with_status(500)
            .with_body("error fetching quote")
            .create_async()
            .await;
        let dir = tempdir().unwrap();
        let config = config(&server, dir.path());

        let res = run(&Client::new(), &config).await;

        match res {
            Err(QuoteClientError::Status(status)) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
        assert!(!config.output_file.exists());
    }

    #[tokio::test]
    async fn test_run_server_error_keeps_existing_file() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cotacao")
            .with_status(500)
            .create_async()
            .await;
        let dir = tempdir().unwrap();
        let config = config(&server, dir.path());
        fs::write(&config.output_file, "Dólar: 4.99").unwrap();

        assert!(run(&Client::new(), &config).await.is_err());
        assert_eq!(fs::read_to_string(&config.output_file).unwrap(), "Dólar: 4.99");
    }

    #[tokio::test]
    async fn test_run_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cotacao")
            .with_status(200)
            .with_body(r#"{"bid": "5.32"}"#)
            .create_async()
            .await;
        let dir = tempdir().unwrap();
        let config = config(&server, dir.path());

        let res = run(&Client::new(), &config).await;

        assert!(matches!(res, Err(QuoteClientError::Decode(_))));
        assert!(!config.output_file.exists());
    }

    #[tokio::test]
    async fn test_fetch_quote_deadline_exceeded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/cotacao")
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(500));
                w.write_all(br#"{"cotacao": "5.32"}"#)
            })
            .create_async()
            .await;
        let url = format!("{}/cotacao", server.url());

        let res = fetch_quote(&Client::new(), &url, Duration::from_millis(50)).await;

        let err = res.unwrap_err();
        assert!(err.is_timeout(), "Expected timeout, got {:?}", err);
    }

    #[test]
    fn test_write_quote_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("cotacao.txt");
        let quote = QuoteReply {
            cotacao: "5.32".to_string(),
        };

        assert!(matches!(write_quote(&path, &quote), Err(QuoteClientError::Io(_))));
    }
}
