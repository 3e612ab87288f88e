//! Core domain models for threadsplit.
//!
//! Spans and segments are immutable value data passed between pipeline
//! stages. They carry no I/O dependencies.

pub mod segment;
pub mod span;

pub use segment::Segment;
pub use span::{Span, SpanKind};
