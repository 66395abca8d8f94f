use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    header::{self, HeaderValue},
    Request, Response, StatusCode,
};
use reqwest::Client;
use std::{convert::Infallible, sync::Arc};

use crate::{
    config::server::{Timeouts, COTACAO_ROUTE},
    db::quotes::QuoteStore,
};

mod cotacao;

/// Everything a quote request needs, shared read-only by all connections.
pub struct QuoteService<S> {
    pub http: Client,
    pub upstream_url: String,
    pub store: Arc<S>,
    pub timeouts: Timeouts,
}

/// Request dispatcher. Built explicitly and handed to the server, so every
/// test can run its own instance.
pub struct Router<S> {
    service: Arc<QuoteService<S>>,
}

impl<S> Clone for Router<S> {
    fn clone(&self) -> Self {
        Router {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: QuoteStore> Router<S> {
    pub fn new(service: QuoteService<S>) -> Self {
        Router {
            service: Arc::new(service),
        }
    }

    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Full<Bytes>>, Infallible> {
        match req.uri().path() {
            COTACAO_ROUTE => Ok(cotacao::handle_get_cotacao(&self.service).await),
            _ => Ok(text_response(StatusCode::NOT_FOUND, "Not Found")),
        }
    }
}

pub(crate) fn text_response(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));

    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );

    response
}

pub(crate) fn json_response(body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));

    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    response
}
