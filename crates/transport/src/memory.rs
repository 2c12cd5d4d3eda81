use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;
use crate::transport::{Delivery, Transport};

/// In-memory transport for tests: captures published messages and can be
/// told to fail enqueues or deliveries on demand.
#[derive(Default)]
pub struct InMemoryTransport {
    published: Mutex<Vec<(String, Bytes)>>,
    fail_publish: AtomicBool,
    fail_delivery: AtomicBool,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in publish order.
    pub fn published(&self) -> Vec<(String, Bytes)> {
        self.published.lock().unwrap().clone()
    }

    /// Make subsequent `publish` calls fail at enqueue time.
    pub fn set_fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent deliveries resolve with an error (the enqueue still
    /// succeeds and the message is still captured).
    pub fn set_fail_delivery(&self, fail: bool) {
        self.fail_delivery.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<Delivery, TransportError> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(TransportError::PublishFailed(
                "in-memory transport closed".to_string(),
            ));
        }

        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), payload));

        let fail = self.fail_delivery.load(Ordering::SeqCst);
        Ok(Box::pin(async move {
            if fail {
                Err(TransportError::DeliveryFailed(
                    "in-memory delivery rejected".to_string(),
                ))
            } else {
                Ok(())
            }
        }))
    }
}
