//! Sentence and token boundary detection.
//!
//! The fallback splitter never inspects raw text itself; it asks a
//! [`BoundaryDetector`] where sentences and words begin and end. Two
//! detectors are available:
//!
//! - **rules**: punctuation-driven sentences that ignore bare line breaks and
//!   skip initials and common abbreviations
//! - **unicode**: UAX #29 sentence boundaries from `unicode-segmentation`

pub mod rules;
pub mod traits;
pub mod unicode;

pub use rules::RuleBasedDetector;
pub use traits::{BoundaryDetector, CLOSING_MARKS, is_closing_marks, whitespace_tokens};
pub use unicode::UnicodeDetector;

/// Name of the detector used when none is requested.
pub const DEFAULT_DETECTOR: &str = "rules";

/// Creates a boundary detector by name.
///
/// # Arguments
///
/// * `name` - Detector name: "rules" or "unicode" (case-insensitive).
///
/// # Errors
///
/// Returns [`crate::error::SplitError::UnknownDetector`] if the name is not
/// recognized.
pub fn create_detector(name: &str) -> crate::error::Result<Box<dyn BoundaryDetector>> {
    match name.to_lowercase().as_str() {
        "rules" => Ok(Box::new(RuleBasedDetector::new())),
        "unicode" | "uax29" => Ok(Box::new(UnicodeDetector::new())),
        _ => Err(crate::error::SplitError::UnknownDetector {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Returns the names of all available detectors.
#[must_use]
pub const fn available_detectors() -> &'static [&'static str] {
    &["rules", "unicode"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_detector_by_name() {
        assert_eq!(create_detector("rules").unwrap().name(), "rules");
        assert_eq!(create_detector("UNICODE").unwrap().name(), "unicode");
        assert_eq!(create_detector("uax29").unwrap().name(), "unicode");
    }

    #[test]
    fn test_create_detector_unknown() {
        let result = create_detector("nltk");
        assert!(matches!(
            result,
            Err(crate::Error::Split(
                crate::error::SplitError::UnknownDetector { .. }
            ))
        ));
    }

    #[test]
    fn test_available_detectors_resolve() {
        for name in available_detectors() {
            assert!(create_detector(name).is_ok());
        }
        assert!(available_detectors().contains(&DEFAULT_DETECTOR));
    }
}
