use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::IngestError;
use crate::types::{QuoteQueryResponse, RawQuote};
use crate::watchlist::Watchlist;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Quote API REST client.
///
/// One GET per poll cycle; retry policy lives with the caller — the next
/// scheduled cycle is the retry.
pub struct QuoteClient {
    http: Client,
    endpoint: String,
}

impl QuoteClient {
    pub fn new(endpoint: String) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self { http, endpoint }
    }

    /// Fetch the raw quote records for every symbol on the watchlist.
    ///
    /// Returns the records in response order. Non-200 responses keep the
    /// body text in the error for diagnostics.
    pub async fn fetch_quotes(&self, watchlist: &Watchlist) -> Result<Vec<RawQuote>, IngestError> {
        debug!(endpoint = %self.endpoint, symbols = %watchlist, "fetching quotes");

        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[("symbols", watchlist.query_param())])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IngestError::Timeout {
                        timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
                    }
                } else {
                    IngestError::Transport(e.to_string())
                }
            })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(IngestError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| IngestError::Transport(e.to_string()))?;

        let envelope: QuoteQueryResponse =
            serde_json::from_slice(&body).map_err(|e| IngestError::Decode(e.to_string()))?;

        Ok(envelope.results)
    }
}

impl std::fmt::Debug for QuoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
