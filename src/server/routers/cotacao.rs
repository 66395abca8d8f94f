use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use log::error;

use super::{json_response, text_response, QuoteService};
use crate::{
    components::awesomeapi::fetch_usd_brl,
    db::quotes::{ensure_schema, insert_with_deadline, QuoteStore},
    models::quotes::QuoteReply,
};

const DB_SETUP_FAILED: &str = "error configuring database";
const FETCH_FAILED: &str = "error fetching quote";
const SAVE_FAILED: &str = "error saving to database";

/// Fetches the bid, stores it and echoes it back. Any failing stage ends the
/// request with a 500; the cause only goes to the log.
pub async fn handle_get_cotacao<S: QuoteStore>(
    service: &QuoteService<S>,
) -> Response<Full<Bytes>> {
    if let Err(e) = ensure_schema(&service.store).await {
        error!("database setup: {}", e);

        return text_response(StatusCode::INTERNAL_SERVER_ERROR, DB_SETUP_FAILED);
    }

    let bid = match fetch_usd_brl(
        &service.http,
        &service.upstream_url,
        service.timeouts.upstream,
    )
    .await
    {
        Ok(bid) => bid,
        Err(e) => {
            error!("fetch quote: {}", e);

            return text_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED);
        }
    };

    if let Err(e) = insert_with_deadline(&service.store, &bid, service.timeouts.insert).await {
        error!("save quote: {}", e);

        return text_response(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED);
    }

    match serde_json::to_string(&QuoteReply { cotacao: bid }) {
        Ok(body) => json_response(body),
        Err(e) => {
            error!("encode reply: {}", e);

            text_response(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
        }
    }
}
