use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::{error, info};
use std::{io, net::SocketAddr};
use tokio::net::TcpListener;

use crate::db::quotes::QuoteStore;

pub use routers::{QuoteService, Router};

mod routers;

pub async fn run_server<S: QuoteStore>(addr: SocketAddr, router: Router<S>) -> Result<(), io::Error> {
    let listener = TcpListener::bind(&addr).await?;

    info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, router).await
}

/// Accept loop. Each connection runs on its own task with a handle to the
/// shared router.
pub async fn serve<S: QuoteStore>(listener: TcpListener, router: Router<S>) -> Result<(), io::Error> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let router = router.clone();

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                let router = router.clone();

                async move { router.route(req).await }
            });

            if let Err(err) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                error!("Failed to serve connection from {}: {:?}", peer, err);
            }
        });
    }
}
