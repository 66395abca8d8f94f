use cotacao_rs::{
    config::server::ServerConfig,
    db::quotes::{QuoteStore, SqliteQuoteStore},
    server::{run_server, QuoteService, Router},
};
use log::{error, info, LevelFilter};
use reqwest::Client;
use simple_logger::SimpleLogger;
use std::{process, sync::Arc};

#[tokio::main]
async fn main() {
    if let Err(e) = SimpleLogger::new()
        .with_colors(true)
        .with_level(LevelFilter::Info)
        .env()
        .init()
    {
        eprintln!("logger init: {}", e);
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let store = SqliteQuoteStore::new(&config.db_path);

    if let Err(e) = store.ensure_schema() {
        error!("database setup {}: {}", config.db_path.display(), e);
        process::exit(1);
    }

    info!(
        "quotes stored in {}, upstream {}",
        config.db_path.display(),
        config.upstream_url
    );

    let router = Router::new(QuoteService {
        http: Client::new(),
        upstream_url: config.upstream_url.clone(),
        store: Arc::new(store),
        timeouts: config.timeouts,
    });

    if let Err(e) = run_server(config.addr(), router).await {
        error!("server stopped: {}", e);
        process::exit(1);
    }
}
