use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("publish failed: {0}")]
    PublishFailed(String),
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
    #[error("validation failed: {0}")]
    ValidationFailed(String),
}
