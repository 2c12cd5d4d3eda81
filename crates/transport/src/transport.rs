use async_trait::async_trait;
use bytes::Bytes;
use futures_util::future::BoxFuture;

use crate::error::TransportError;

/// Handle for an in-flight message: resolves once the broker has
/// acknowledged (or rejected) delivery.
pub type Delivery = BoxFuture<'static, Result<(), TransportError>>;

/// Publish abstraction over the broker connection.
///
/// `publish` enqueues the message onto the connection and returns a
/// [`Delivery`] handle; an `Err` here means the message never left the
/// process (connection gone, subject invalid). Delivery failures after a
/// successful enqueue surface only through the handle.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn publish(&self, subject: &str, payload: Bytes) -> Result<Delivery, TransportError>;
}
