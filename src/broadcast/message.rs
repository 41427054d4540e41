use std::fmt;
use std::sync::Arc;

/// Represents one relayed text message.
///
/// The payload is opaque UTF-8 with no schema or size bound. It is stored
/// behind an `Arc` so fanning the same message out to every connection
/// only bumps a reference count.
///
/// # Example
///
/// ```rust
/// use wsrelay::broadcast::RelayMessage;
///
/// let msg = RelayMessage::relayed("📦 ", "hello");
/// assert_eq!(msg.as_str(), "📦 hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayMessage(Arc<str>);

impl RelayMessage {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// Builds the message fanned out for `text` received from a client.
    pub fn relayed(prefix: &str, text: &str) -> Self {
        Self::new(format!("{prefix}{text}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RelayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
