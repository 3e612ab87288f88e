//! Splitter configuration.
//!
//! The whole pipeline depends on a single budget, the maximum segment
//! length, plus the policy for tokens that cannot be split below it. Both
//! travel explicitly in a [`SplitConfig`] value.

use crate::error::{Result, SplitError};
use serde::{Deserialize, Serialize};

/// Default maximum segment length in graphemes.
pub const DEFAULT_MAX_LENGTH: usize = 280;

/// Segment length used by deployments on the older 250 character budget.
pub const LEGACY_MAX_LENGTH: usize = 250;

/// What to do with a single token longer than the maximum length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OversizePolicy {
    /// Emit the token as an oversized fragment and log a warning.
    #[default]
    Emit,
    /// Fail with [`SplitError::SegmentTooLong`].
    Reject,
}

/// Configuration threaded through every pipeline stage.
///
/// # Examples
///
/// ```
/// use threadsplit::config::{OversizePolicy, SplitConfig};
///
/// let config = SplitConfig::with_max_length(250).oversize_policy(OversizePolicy::Reject);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_length, 250);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Maximum segment length in graphemes.
    pub max_length: usize,
    /// Handling of unsplittable oversized tokens.
    pub oversize_policy: OversizePolicy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitConfig {
    /// Creates a configuration with the default length budget.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            oversize_policy: OversizePolicy::Emit,
        }
    }

    /// Creates a configuration with a custom length budget.
    #[must_use]
    pub const fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            oversize_policy: OversizePolicy::Emit,
        }
    }

    /// Sets the oversized token policy.
    #[must_use]
    pub const fn oversize_policy(mut self, policy: OversizePolicy) -> Self {
        self.oversize_policy = policy;
        self
    }

    /// Checks whether a text of `length` graphemes fits the budget.
    #[must_use]
    pub const fn fits(&self, length: usize) -> bool {
        length <= self.max_length
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::InvalidConfig`] if `max_length` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(SplitError::InvalidConfig {
                reason: "max_length must be > 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = SplitConfig::default();
        assert_eq!(config.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(config.oversize_policy, OversizePolicy::Emit);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config =
            SplitConfig::with_max_length(LEGACY_MAX_LENGTH).oversize_policy(OversizePolicy::Reject);
        assert_eq!(config.max_length, 250);
        assert_eq!(config.oversize_policy, OversizePolicy::Reject);
        assert!(config.fits(250));
        assert!(!config.fits(251));
    }

    #[test]
    fn test_config_zero_length_invalid() {
        let result = SplitConfig::with_max_length(0).validate();
        assert!(matches!(
            result,
            Err(crate::Error::Split(SplitError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&OversizePolicy::Reject).unwrap();
        assert_eq!(json, "\"reject\"");
    }
}
