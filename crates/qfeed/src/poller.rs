use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, error, info};

use qfeed_ingest::{normalize, IngestError, QuoteClient, Watchlist};
use qfeed_transport::TransportError;

use crate::producer::Producer;

#[derive(Error, Debug)]
pub enum CycleError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Publish(#[from] TransportError),
}

/// The polling loop: sleep the configured interval, run one cycle, repeat
/// until shutdown. Cycle failures are logged and never terminate the loop;
/// the next scheduled cycle is the retry.
pub async fn run(
    client: &QuoteClient,
    producer: &Producer,
    watchlist: &Watchlist,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(
        interval_secs = interval.as_secs(),
        symbols = %watchlist,
        "polling started"
    );

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                match run_cycle(client, producer, watchlist).await {
                    Ok(published) => debug!(published, "cycle complete"),
                    Err(e) => error!(error = %e, "cycle failed"),
                }
            }
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("polling stopped");
}

/// One ingestion cycle: fetch the watchlist's quotes, then normalize and
/// publish each record in response order. The first failure aborts the
/// remaining records of this cycle.
pub async fn run_cycle(
    client: &QuoteClient,
    producer: &Producer,
    watchlist: &Watchlist,
) -> Result<usize, CycleError> {
    let results = client.fetch_quotes(watchlist).await?;

    let mut published = 0;
    for raw in &results {
        let message = normalize(raw)?;
        producer.publish(&raw.symbol, &message).await?;
        published += 1;
    }

    Ok(published)
}
