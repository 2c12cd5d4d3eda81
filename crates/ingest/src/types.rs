use serde::{Deserialize, Serialize};

/// Envelope returned by the quote API: `{"results":[...]}`.
///
/// Entry order follows the API response, which is not guaranteed to match
/// watchlist order.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteQueryResponse {
    #[serde(default)]
    pub results: Vec<RawQuote>,
}

/// One raw quote record as the API returns it. Every field is optional on
/// the wire; absent strings deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuote {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub last_trade_price: String,
    #[serde(default)]
    pub last_extended_hours_trade_price: String,
}

impl RawQuote {
    /// The price to publish: extended-hours when present and non-empty,
    /// otherwise the regular trade price.
    pub fn effective_price(&self) -> &str {
        if self.last_extended_hours_trade_price.is_empty() {
            &self.last_trade_price
        } else {
            &self.last_extended_hours_trade_price
        }
    }
}

/// The normalized message published to the broker:
/// `{"quote":"150.25","at":"2024-01-01 00:00:00 +0000"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteMessage {
    pub quote: String,
    pub at: String,
}
