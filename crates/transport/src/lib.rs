//! qfeed-transport: Broker publishing abstractions
//!
//! Provides a trait-based publish abstraction with a NATS JetStream
//! implementation and an in-memory implementation for testing. Delivery is
//! asynchronous: `publish` enqueues and hands back a delivery handle the
//! caller can await (or feed to a background drain task).

pub mod backoff;
pub mod error;
pub mod memory;
pub mod nats;
pub mod subject;
pub mod transport;

pub use backoff::Backoff;
pub use error::TransportError;
pub use memory::InMemoryTransport;
pub use nats::NatsTransport;
pub use subject::Topic;
pub use transport::{Delivery, Transport};
