//! Error types for the repform exercise-tracking engine.
//!
//! The frame stream is continuous and unreliable by nature (occlusion, fast
//! motion, estimator noise), so almost nothing here is a hard error. The
//! split is:
//!
//! - [`CoreError`]: hard failures, surfaced only at configuration/start
//!   time. Frame processing never returns these.
//! - [`SkipReason`]: recoverable per-frame conditions. A skipped frame
//!   changes no state and the stream continues; the reason is reported on
//!   the frame outcome for observability.
//!
//! Degenerate geometry (a zero-length vector in an angle computation) is the
//! third recoverable class and never surfaces at all: the geometry kernel
//! substitutes a neutral 0° angle.

use thiserror::Error;

/// A specialized `Result` type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Hard-failure error type for the repform system.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CoreError {
    /// Configuration rejected at start time
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl CoreError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Always false: recoverable conditions are modeled as [`SkipReason`]
    /// values on frame outcomes, never as errors.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Configuration { .. } | Self::Validation { .. } => false,
        }
    }
}

/// Why a frame was skipped instead of classified.
///
/// Skipping changes no tracker state beyond resetting pending debounce
/// counters; the last committed classification is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// A required landmark was missing or below the visibility threshold.
    InsufficientVisibility,
    /// The frame timestamp was non-monotonic or the gap exceeded the sanity
    /// ceiling; the frame contributed zero held duration.
    InvalidTimestamp,
}

impl SkipReason {
    /// Returns the skip reason as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsufficientVisibility => "insufficient_visibility",
            Self::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        let err = CoreError::configuration("visibility_threshold must be in (0.0, 1.0]");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("visibility_threshold"));
    }

    #[test]
    fn test_hard_errors_are_not_recoverable() {
        assert!(!CoreError::configuration("x").is_recoverable());
        assert!(!CoreError::validation("y").is_recoverable());
    }

    #[test]
    fn test_skip_reason_names() {
        assert_eq!(
            SkipReason::InsufficientVisibility.name(),
            "insufficient_visibility"
        );
        assert_eq!(SkipReason::InvalidTimestamp.name(), "invalid_timestamp");
    }
}
