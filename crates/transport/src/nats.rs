use async_nats::jetstream::stream::{Config, RetentionPolicy, StorageType};
use async_nats::jetstream::{self, Context};
use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;
use crate::subject::Topic;
use crate::transport::{Delivery, Transport};

/// NATS JetStream transport.
///
/// Publishes enqueue onto the client's write buffer and resolve through the
/// JetStream ack (leader ack, not quorum). The underlying client reconnects
/// on its own; publishes attempted while the connection is down fail fast.
pub struct NatsTransport {
    jetstream: Context,
}

impl NatsTransport {
    /// Create a transport from an existing client.
    pub fn new(client: async_nats::Client) -> Self {
        let jetstream = jetstream::new(client);
        Self { jetstream }
    }

    /// Connect to the broker and create a transport.
    pub async fn connect(url: &str) -> Result<Self, TransportError> {
        let client = async_nats::connect(url)
            .await
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        Ok(Self::new(client))
    }

    /// Create or get the stream backing a topic's subjects.
    pub async fn ensure_stream(&self, topic: &Topic) -> Result<(), TransportError> {
        let config = Config {
            name: topic.stream_name(),
            subjects: vec![topic.wildcard()],
            retention: RetentionPolicy::Limits,
            storage: StorageType::File,
            max_age: std::time::Duration::from_secs(24 * 60 * 60), // 24 hours
            ..Default::default()
        };

        self.jetstream
            .get_or_create_stream(config)
            .await
            .map_err(|e| {
                TransportError::ConnectionFailed(format!("stream creation failed: {}", e))
            })?;

        Ok(())
    }
}

#[async_trait]
impl Transport for NatsTransport {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<Delivery, TransportError> {
        let ack = self
            .jetstream
            .publish(subject.to_string(), payload)
            .await
            .map_err(|e| TransportError::PublishFailed(e.to_string()))?;

        Ok(Box::pin(async move {
            ack.await
                .map(|_| ())
                .map_err(|e| TransportError::DeliveryFailed(e.to_string()))
        }))
    }
}
