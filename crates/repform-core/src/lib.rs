//! # Repform Core
//!
//! Core types and pure geometry for the repform exercise-tracking engine.
//!
//! This crate provides the foundational building blocks used throughout the
//! repform ecosystem, including:
//!
//! - **Core Data Types**: [`Landmark`], [`PoseFrame`], [`BodyPoint`],
//!   [`Confidence`], and [`FrameTimestamp`] for representing externally
//!   detected body keypoints and frame timing.
//!
//! - **Geometry Kernel**: stateless joint-angle, distance, and body-line
//!   helpers in the [`geometry`] module. Two angle formulations are exposed
//!   because exercise thresholds are tuned against one or the other and the
//!   formulas are not numerically identical at extreme inputs.
//!
//! - **Visibility Gating**: confidence-threshold predicates on landmarks and
//!   frames that fail closed when required keypoints are missing.
//!
//! - **Error Types**: the [`error`] module separates hard configuration
//!   failures from the recoverable per-frame skip conditions that a noisy
//!   landmark stream produces continuously.
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialization/deserialization via serde
//!
//! ## Example
//!
//! ```rust
//! use repform_core::{BodyPoint, Confidence, Landmark};
//!
//! let knee = Landmark::new(0.5, 0.72, Confidence::new(0.91).unwrap());
//! assert!(knee.is_visible(0.5));
//! assert_eq!(BodyPoint::LeftKnee.name(), "left_knee");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod traits;
pub mod types;

pub use error::{CoreError, CoreResult, SkipReason};
pub use traits::{Resettable, Validate};
pub use types::{BodyPoint, Confidence, FrameTimestamp, Landmark, PoseFrame};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of body-point roles in a full pose frame (BlazePose topology).
pub const NUM_BODY_POINTS: usize = 33;

/// Default confidence threshold for landmark visibility
pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.5;

/// Prelude module for convenient imports.
///
/// ```rust
/// use repform_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult, SkipReason};
    pub use crate::traits::{Resettable, Validate};
    pub use crate::types::{BodyPoint, Confidence, FrameTimestamp, Landmark, PoseFrame};
}
