//! qfeed-ingest: Quote API ingestion
//!
//! Fetches raw quote records from the upstream price API and normalizes
//! them into publishable price messages. Pure normalization logic is kept
//! separate from the HTTP client so it can be tested without I/O.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;
pub mod watchlist;

pub use client::QuoteClient;
pub use error::IngestError;
pub use normalize::{normalize, normalize_at};
pub use types::{QuoteMessage, QuoteQueryResponse, RawQuote};
pub use watchlist::Watchlist;
