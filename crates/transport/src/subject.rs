use crate::error::TransportError;

/// The configured destination topic, mapped onto broker subjects.
///
/// Each symbol publishes to `{topic}.{symbol}` — the subject takes the role
/// of the per-message key: consumers get per-symbol ordering and can filter
/// a single symbol without seeing the rest of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
}

impl Topic {
    /// Validate a topic name. Whitespace and subject wildcards are rejected
    /// since they would corrupt the subject hierarchy.
    pub fn new(name: impl Into<String>) -> Result<Self, TransportError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TransportError::ValidationFailed(
                "topic must not be empty".to_string(),
            ));
        }
        if name.contains([' ', '\t', '*', '>']) {
            return Err(TransportError::ValidationFailed(format!(
                "invalid topic name: {:?}",
                name
            )));
        }
        Ok(Self { name })
    }

    /// Subject for one symbol: `{topic}.{symbol}`.
    pub fn subject(&self, symbol: &str) -> String {
        format!("{}.{}", self.name, symbol)
    }

    /// Wildcard covering every symbol under this topic: `{topic}.>`.
    pub fn wildcard(&self) -> String {
        format!("{}.>", self.name)
    }

    /// Stream name for the topic (uppercase, dots flattened).
    pub fn stream_name(&self) -> String {
        self.name.to_uppercase().replace('.', "_")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
