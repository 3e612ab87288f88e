//! Paragraph input and output files.
//!
//! A paragraph comes from a file or from standard input. Files at or above
//! [`MMAP_THRESHOLD`] are memory mapped instead of copied through a read
//! buffer. Line endings are folded to `\n` on the way in, since the
//! splitter treats a bare `\n` as the only line break.

// Memory mapping requires unsafe; the map is read-only and short-lived
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Size from which input files are memory mapped (1 MiB).
pub const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Largest accepted input file (256 MiB).
pub const MAX_INPUT_SIZE: u64 = 256 * 1024 * 1024;

/// Path argument that selects standard input.
pub const STDIN_ARG: &str = "-";

/// Where a paragraph is read from.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use threadsplit::io::InputSource;
///
/// assert_eq!(InputSource::from_path(Path::new("-")), InputSource::Stdin);
/// assert_eq!(InputSource::from_path(Path::new("day1.txt")).to_string(), "day1.txt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

impl InputSource {
    /// Interprets a command-line path, where `-` means standard input.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == STDIN_ARG {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Reads the whole source as one paragraph.
    ///
    /// # Errors
    ///
    /// Returns an [`IoError`] if the source cannot be read, is too large
    /// or is not valid UTF-8.
    pub fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => read_stdin(),
            Self::File(path) => read_file(path),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn read_failed(path: &Path, reason: impl ToString) -> IoError {
    IoError::ReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Reads a paragraph file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file and
/// [`IoError::ReadFailed`] or [`IoError::MmapFailed`] when the content
/// cannot be loaded or decoded.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut file = File::open(path).map_err(|e| read_failed(path, e))?;
    let size = file.metadata().map_err(|e| read_failed(path, e))?.len();
    if size > MAX_INPUT_SIZE {
        return Err(read_failed(
            path,
            format!("file too large: {size} bytes (max: {MAX_INPUT_SIZE} bytes)"),
        )
        .into());
    }

    let text = if size >= MMAP_THRESHOLD {
        // Safety: read-only map, dropped before the function returns
        let map = unsafe { Mmap::map(&file) }.map_err(|e| IoError::MmapFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::str::from_utf8(&map)
            .map_err(|e| read_failed(path, format!("invalid UTF-8: {e}")))?
            .to_string()
    } else {
        let mut text = String::new();
        file.read_to_string(&mut text)
            .map_err(|e| read_failed(path, e))?;
        text
    };

    Ok(normalize_line_endings(text))
}

/// Reads all of standard input as one paragraph.
///
/// # Errors
///
/// Returns [`IoError::ReadFailed`] if stdin cannot be read or is not valid
/// UTF-8.
pub fn read_stdin() -> Result<String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| read_failed(Path::new("<stdin>"), e))?;
    Ok(normalize_line_endings(text))
}

/// Folds `\r\n` and lone `\r` line endings to `\n`.
fn normalize_line_endings(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

/// Creates or truncates an output file, creating missing parent
/// directories.
///
/// # Errors
///
/// Returns [`IoError::DirectoryFailed`] or [`IoError::WriteFailed`].
pub fn create_output<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(File::create(path).map_err(|e| IoError::WriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?)
}

/// Writes `content` to a file, creating missing parent directories.
///
/// # Errors
///
/// Returns [`IoError::DirectoryFailed`] or [`IoError::WriteFailed`].
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    create_output(path)?
        .write_all(content.as_bytes())
        .map_err(|e| {
            IoError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
}
