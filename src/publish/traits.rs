//! Publisher trait and thread chaining.

use crate::core::Segment;
use crate::error::{PublishError, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Identifier assigned to a message by a publisher.
pub type MessageId = String;

/// A message as it was handed to a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedMessage {
    /// Identifier returned by the publisher.
    pub id: MessageId,
    /// Identifier of the message this one replies to.
    pub in_reply_to: Option<MessageId>,
    /// Message text.
    pub text: String,
}

/// Trait for thread publishing backends.
///
/// A publisher accepts one message at a time and returns the identifier it
/// assigned, which the caller passes as `reply_to` for the next message.
pub trait Publisher {
    /// Submits a message, optionally as a reply to an earlier one.
    ///
    /// # Errors
    ///
    /// Returns a [`PublishError`] if the message could not be delivered or
    /// was refused.
    fn submit(
        &mut self,
        text: &str,
        reply_to: Option<&str>,
    ) -> std::result::Result<MessageId, PublishError>;

    /// Returns the name of the publisher.
    fn name(&self) -> &'static str;
}

/// Publishes `segments` as a reply chain.
///
/// The first segment is submitted without a parent; every later segment
/// replies to the identifier returned for its predecessor. Submission stops
/// at the first failure and the publisher's error is returned as is. There
/// are no retries.
///
/// # Errors
///
/// Returns [`crate::Error::Publish`] wrapping the first submission failure.
///
/// # Examples
///
/// ```
/// use threadsplit::core::Segment;
/// use threadsplit::publish::{MemoryPublisher, publish_thread};
///
/// let mut publisher = MemoryPublisher::new();
/// let segments = vec![Segment::new("First."), Segment::new("Second.")];
/// let thread = publish_thread(&mut publisher, &segments).unwrap();
/// assert_eq!(thread[1].in_reply_to.as_deref(), Some(thread[0].id.as_str()));
/// ```
pub fn publish_thread<P>(publisher: &mut P, segments: &[Segment]) -> Result<Vec<PublishedMessage>>
where
    P: Publisher + ?Sized,
{
    let mut thread: Vec<PublishedMessage> = Vec::with_capacity(segments.len());

    for (index, segment) in segments.iter().enumerate() {
        let reply_to = thread.last().map(|m| m.id.clone());
        let id = match publisher.submit(&segment.text, reply_to.as_deref()) {
            Ok(id) => id,
            Err(e) => {
                error!(publisher = publisher.name(), index, error = %e, "publish failed");
                return Err(e.into());
            }
        };
        info!(
            publisher = publisher.name(),
            index,
            id = %id,
            reply_to = reply_to.as_deref().unwrap_or("-"),
            "published segment"
        );
        thread.push(PublishedMessage {
            id,
            in_reply_to: reply_to,
            text: segment.text.clone(),
        });
    }

    Ok(thread)
}
