//! I/O utilities for threadsplit.
//!
//! Reading paragraphs from files (memory mapped when large) or standard
//! input, writing output files, and the grapheme-based length measure used
//! wherever a segment budget is checked.

pub mod reader;
pub mod unicode;

pub use reader::{InputSource, create_output, read_file, read_stdin, write_file};
pub use unicode::{grapheme_count, truncate_graphemes};
