//! Thread publishing.
//!
//! Segments are published strictly in order, each one as a reply to the
//! message created for the segment before it. Two local publishers are
//! provided:
//!
//! - **memory**: records messages in a vector, with optional injected
//!   failures for testing callers
//! - **ndjson**: an outbox writing one JSON record per message to any
//!   [`std::io::Write`] sink

pub mod memory;
pub mod ndjson;
pub mod traits;

pub use memory::MemoryPublisher;
pub use ndjson::{DEFAULT_ID_PREFIX, NdjsonPublisher};
pub use traits::{MessageId, PublishedMessage, Publisher, publish_thread};
