//! NDJSON outbox publisher.

use crate::error::PublishError;
use crate::publish::traits::{MessageId, PublishedMessage, Publisher};
use std::io::Write;

/// Identifier prefix used when none is given.
pub const DEFAULT_ID_PREFIX: &str = "msg";

/// Publisher that appends each message to a writer as one JSON line.
///
/// Each line is a [`PublishedMessage`] record. Identifiers are
/// `<prefix>-1`, `<prefix>-2`, ... in submission order. The writer is
/// flushed after every record so a failure leaves a complete prefix of the
/// thread behind.
///
/// # Examples
///
/// ```
/// use threadsplit::publish::{NdjsonPublisher, Publisher};
///
/// let mut publisher = NdjsonPublisher::new(Vec::new());
/// publisher.submit("Be still.", None).unwrap();
/// let out = String::from_utf8(publisher.into_inner()).unwrap();
/// assert_eq!(out, "{\"id\":\"msg-1\",\"in_reply_to\":null,\"text\":\"Be still.\"}\n");
/// ```
#[derive(Debug)]
pub struct NdjsonPublisher<W: Write> {
    writer: W,
    prefix: String,
    published: usize,
}

impl<W: Write> NdjsonPublisher<W> {
    /// Creates a publisher with the default identifier prefix.
    pub fn new(writer: W) -> Self {
        Self::with_prefix(writer, DEFAULT_ID_PREFIX)
    }

    /// Creates a publisher with a custom identifier prefix.
    pub fn with_prefix(writer: W, prefix: impl Into<String>) -> Self {
        Self {
            writer,
            prefix: prefix.into(),
            published: 0,
        }
    }

    /// Returns the number of records written.
    #[must_use]
    pub const fn published(&self) -> usize {
        self.published
    }

    /// Consumes the publisher, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record(&mut self, record: &PublishedMessage) -> Result<(), PublishError> {
        let index = self.published;
        let transport = |e: std::io::Error| PublishError::Transport {
            index,
            reason: e.to_string(),
        };

        let line = serde_json::to_string(record)?;
        writeln!(self.writer, "{line}").map_err(transport)?;
        self.writer.flush().map_err(transport)
    }
}

impl<W: Write> Publisher for NdjsonPublisher<W> {
    fn submit(
        &mut self,
        text: &str,
        reply_to: Option<&str>,
    ) -> Result<MessageId, PublishError> {
        let id = format!("{}-{}", self.prefix, self.published + 1);
        let record = PublishedMessage {
            id: id.clone(),
            in_reply_to: reply_to.map(str::to_string),
            text: text.to_string(),
        };
        self.write_record(&record)?;
        self.published += 1;
        Ok(id)
    }

    fn name(&self) -> &'static str {
        "ndjson"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Segment;
    use crate::publish::publish_thread;

    /// Writer that fails after accepting `budget` bytes.
    struct FailingWriter {
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.len() > self.budget {
                return Err(std::io::Error::other("disk full"));
            }
            self.budget -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_ndjson_thread_records() {
        let mut publisher = NdjsonPublisher::with_prefix(Vec::new(), "psalm");
        let segments = vec![Segment::new("The LORD is my shepherd;"), Segment::new("I shall not want.")];
        publish_thread(&mut publisher, &segments).unwrap();
        assert_eq!(publisher.published(), 2);

        let out = String::from_utf8(publisher.into_inner()).unwrap();
        let records: Vec<PublishedMessage> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "psalm-1");
        assert_eq!(records[0].in_reply_to, None);
        assert_eq!(records[1].id, "psalm-2");
        assert_eq!(records[1].in_reply_to.as_deref(), Some("psalm-1"));
        assert_eq!(records[1].text, "I shall not want.");
    }

    #[test]
    fn test_ndjson_multiline_text_single_record() {
        let mut publisher = NdjsonPublisher::new(Vec::new());
        publisher.submit("line one\nline two", None).unwrap();
        let out = String::from_utf8(publisher.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("line one\\nline two"));
    }

    #[test]
    fn test_ndjson_write_failure_is_transport_error() {
        let mut publisher = NdjsonPublisher::new(FailingWriter { budget: 4 });
        let err = publisher.submit("too long for the writer", None).unwrap_err();
        assert!(matches!(err, PublishError::Transport { index: 0, .. }));
        assert_eq!(publisher.published(), 0);
    }
}
