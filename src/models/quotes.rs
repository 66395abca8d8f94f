use serde::{Deserialize, Serialize};

/// Body of `GET /json/last/USD-BRL`. Only the bid is kept.
#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct CurrencyResponse {
    #[serde(rename = "USDBRL")]
    pub usdbrl: CurrencyInfo,
}

#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct CurrencyInfo {
    pub bid: String,
}

/// Payload exchanged between the quote server and the client.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct QuoteReply {
    pub cotacao: String,
}

