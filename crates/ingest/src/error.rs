use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("failed to decode quote envelope: {0}")]
    Decode(String),
    #[error("price is not a valid decimal: {raw:?}")]
    PriceParse { raw: String },
    #[error("watchlist is empty")]
    EmptyWatchlist,
}
