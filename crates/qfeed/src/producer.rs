use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use qfeed_ingest::QuoteMessage;
use qfeed_transport::{Backoff, Delivery, NatsTransport, Topic, Transport, TransportError};

const BACKOFF_BASE: Duration = Duration::from_millis(500);
const BACKOFF_CAP: Duration = Duration::from_secs(30);

/// Owns the broker connection for the life of the process.
///
/// Messages are enqueued fire-and-forget; each publish hands its delivery
/// handle to a background drain task that awaits broker acks and logs
/// failures without ever interrupting ingestion. Dropping the producer
/// closes the delivery channel, which ends the drain task once the
/// remaining acks have been consumed.
pub struct Producer {
    transport: Arc<dyn Transport>,
    topic: Topic,
    deliveries: mpsc::UnboundedSender<(String, Delivery)>,
}

impl Producer {
    /// Establish the broker connection, retrying with capped exponential
    /// backoff until it succeeds or shutdown is requested. Returns `None`
    /// only on shutdown.
    pub async fn connect(
        broker_url: &str,
        topic: Topic,
        mut shutdown: watch::Receiver<bool>,
    ) -> Option<(Self, JoinHandle<()>)> {
        let mut backoff = Backoff::new(BACKOFF_BASE, BACKOFF_CAP);

        loop {
            if *shutdown.borrow() {
                return None;
            }

            match Self::try_connect(broker_url, &topic).await {
                Ok(transport) => {
                    info!(broker = %broker_url, topic = %topic, "broker connection established");
                    return Some(Self::with_transport(Arc::new(transport), topic));
                }
                Err(e) => {
                    let delay = backoff.next();
                    warn!(
                        error = %e,
                        retry_in_ms = delay.as_millis() as u64,
                        "broker connection failed, retrying"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = shutdown.changed() => {}
                    }
                }
            }
        }
    }

    async fn try_connect(broker_url: &str, topic: &Topic) -> Result<NatsTransport, TransportError> {
        let transport = NatsTransport::connect(broker_url).await?;
        transport.ensure_stream(topic).await?;
        Ok(transport)
    }

    /// Build a producer over an already-connected transport and spawn the
    /// delivery drain task.
    pub fn with_transport(transport: Arc<dyn Transport>, topic: Topic) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let drain = tokio::spawn(drain_deliveries(rx));
        let producer = Self {
            transport,
            topic,
            deliveries: tx,
        };
        (producer, drain)
    }

    /// Serialize one quote and enqueue it on `{topic}.{symbol}`.
    ///
    /// An `Err` means the message never reached the connection's send queue
    /// and aborts the rest of the cycle; failures after enqueue surface in
    /// the drain task instead.
    pub async fn publish(&self, symbol: &str, quote: &QuoteMessage) -> Result<(), TransportError> {
        let payload =
            serde_json::to_vec(quote).map_err(|e| TransportError::PublishFailed(e.to_string()))?;
        let subject = self.topic.subject(symbol);

        let delivery = self.transport.publish(&subject, Bytes::from(payload)).await?;

        // A closed channel means shutdown is already underway.
        let _ = self.deliveries.send((symbol.to_string(), delivery));
        Ok(())
    }
}

async fn drain_deliveries(mut rx: mpsc::UnboundedReceiver<(String, Delivery)>) {
    while let Some((symbol, delivery)) = rx.recv().await {
        if let Err(e) = delivery.await {
            error!(symbol = %symbol, error = %e, "delivery failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qfeed_transport::InMemoryTransport;

    fn quote() -> QuoteMessage {
        QuoteMessage {
            quote: "150.25".into(),
            at: "2024-01-01 00:00:00 +0000".into(),
        }
    }

    #[tokio::test]
    async fn test_publish_keys_by_symbol() {
        let transport = Arc::new(InMemoryTransport::new());
        let topic = Topic::new("quotes").unwrap();
        let (producer, drain) = Producer::with_transport(transport.clone(), topic);

        producer.publish("AAPL", &quote()).await.unwrap();

        let published = transport.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, "quotes.AAPL");
        assert_eq!(
            published[0].1,
            Bytes::from(r#"{"quote":"150.25","at":"2024-01-01 00:00:00 +0000"}"#)
        );

        drop(producer);
        drain.await.unwrap();
    }

    #[tokio::test]
    async fn test_enqueue_failure_propagates() {
        let transport = Arc::new(InMemoryTransport::new());
        transport.set_fail_publish(true);
        let topic = Topic::new("quotes").unwrap();
        let (producer, drain) = Producer::with_transport(transport, topic);

        let err = producer.publish("AAPL", &quote()).await.unwrap_err();
        assert!(matches!(err, TransportError::PublishFailed(_)));

        drop(producer);
        drain.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_retries_until_shutdown() {
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            Producer::connect("nats://127.0.0.1:1", Topic::new("quotes").unwrap(), rx).await
        });

        // Unreachable broker: no producer may exist yet, the retry loop
        // just keeps backing off.
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(
            !handle.is_finished(),
            "connect gave up against an unreachable broker"
        );

        tx.send(true).unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("connect did not honor shutdown")
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_drain_survives_delivery_failures() {
        let transport = Arc::new(InMemoryTransport::new());
        let topic = Topic::new("quotes").unwrap();
        let (producer, drain) = Producer::with_transport(transport.clone(), topic);

        transport.set_fail_delivery(true);
        producer.publish("AAPL", &quote()).await.unwrap();

        // Drain logs the failed delivery and keeps consuming.
        transport.set_fail_delivery(false);
        producer.publish("MSFT", &quote()).await.unwrap();

        drop(producer);
        drain.await.unwrap();
        assert_eq!(transport.published().len(), 2);
    }
}
