//! In-memory publisher.

use crate::error::PublishError;
use crate::publish::traits::{MessageId, PublishedMessage, Publisher};

/// Publisher that keeps every accepted message in memory.
///
/// Identifiers are `mem-1`, `mem-2`, ... in submission order. A failure can
/// be injected at a given submission index to exercise error paths.
///
/// # Examples
///
/// ```
/// use threadsplit::publish::{MemoryPublisher, Publisher};
///
/// let mut publisher = MemoryPublisher::new();
/// let first = publisher.submit("Hear, O Israel.", None).unwrap();
/// publisher.submit("The LORD is our God.", Some(&first)).unwrap();
/// assert_eq!(publisher.messages()[1].in_reply_to.as_deref(), Some("mem-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryPublisher {
    messages: Vec<PublishedMessage>,
    fail_at: Option<usize>,
}

impl MemoryPublisher {
    /// Creates an empty publisher.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            fail_at: None,
        }
    }

    /// Makes the submission with zero-based `index` fail with a transport
    /// error.
    #[must_use]
    pub const fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Returns the accepted messages.
    #[must_use]
    pub fn messages(&self) -> &[PublishedMessage] {
        &self.messages
    }

    /// Consumes the publisher, returning the accepted messages.
    #[must_use]
    pub fn into_messages(self) -> Vec<PublishedMessage> {
        self.messages
    }
}

impl Publisher for MemoryPublisher {
    fn submit(
        &mut self,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<MessageId, PublishError> {
        let index = self.messages.len();
        if self.fail_at == Some(index) {
            return Err(PublishError::Transport {
                index,
                reason: "injected failure".to_string(),
            });
        }
        if text.trim().is_empty() {
            return Err(PublishError::Rejected {
                index,
                reason: "empty message".to_string(),
            });
        }

        let id = format!("mem-{}", index + 1);
        self.messages.push(PublishedMessage {
            id: id.clone(),
            in_reply_to: reply_to.map(str::to_string),
            text: text.to_string(),
        });
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
