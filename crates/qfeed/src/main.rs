//! qfeed: equity quote poller → broker relay
//!
//! Polls the quote API for a fixed watchlist on an interval and republishes
//! one normalized price per symbol to `{topic}.{symbol}`, indefinitely.

mod config;
mod poller;
mod producer;
mod shutdown;

use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qfeed_ingest::{QuoteClient, Watchlist};
use qfeed_transport::Topic;

use config::Config;
use producer::Producer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    // Configuration problems are the only fatal errors; everything past
    // this point is retried or logged.
    let watchlist = Watchlist::parse(&config.watchlist)?;
    let topic = Topic::new(config.topic.clone())?;
    let interval = Duration::from_secs(config.poll_interval_secs);

    info!(
        endpoint = %config.api_endpoint,
        broker = %config.broker_url,
        topic = %topic,
        symbols = %watchlist,
        interval_secs = interval.as_secs(),
        "qfeed starting"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    shutdown::spawn_listener(shutdown_tx);

    // No fetch cycle runs until the broker connection exists.
    let Some((producer, drain)) =
        Producer::connect(&config.broker_url, topic, shutdown_rx.clone()).await
    else {
        info!("shut down before broker connection was established");
        return Ok(());
    };

    let client = QuoteClient::new(config.api_endpoint.clone());
    poller::run(&client, &producer, &watchlist, interval, shutdown_rx).await;

    // Closing the delivery channel lets the drain task finish the
    // outstanding acks before the connection is dropped.
    drop(producer);
    drain.await.ok();

    info!("qfeed stopped");
    Ok(())
}
