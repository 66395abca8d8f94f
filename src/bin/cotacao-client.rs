use cotacao_rs::{client, config::client::ClientConfig};
use log::{error, LevelFilter};
use reqwest::Client;
use simple_logger::SimpleLogger;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = SimpleLogger::new()
        .with_colors(true)
        .with_level(LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("logger init: {}", e);
    }

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = client::run(&Client::new(), &config).await {
        error!("quote request failed: {}", e);
        process::exit(1);
    }
}
