//! Exercise configuration.
//!
//! [`ExerciseConfig`] carries the tunables supplied by the host at exercise
//! start: targets, the landmark visibility threshold, the debounce frame
//! count, and the plank variant. It is immutable for the lifetime of an
//! exercise session and serializable so hosts can store presets as JSON.
//!
//! Per-exercise geometry thresholds (knee angles, span ratios, alignment
//! margins) are fixed constants in the exercise modules, not configuration:
//! they are tuned against a specific angle formula and landmark topology and
//! are not meaningful user-facing knobs.
//!
//! # Example
//!
//! ```rust
//! use repform_exercise::config::ExerciseConfig;
//! use repform_core::Validate;
//!
//! let cfg = ExerciseConfig::default();
//! cfg.validate().expect("default config is valid");
//! assert_eq!(cfg.required_consecutive_frames, 3);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use repform_core::{CoreError, CoreResult, Validate};

/// Arm support variant for the plank hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlankVariant {
    /// Forearms on the ground, elbows under shoulders.
    #[default]
    Forearm,
    /// Arms extended, wrists under shoulders.
    StraightArm,
}

impl PlankVariant {
    /// Returns the variant name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Forearm => "forearm",
            Self::StraightArm => "straight_arm",
        }
    }
}

/// Tunables for one exercise session, fixed at start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    /// Target repetition count for count-based exercises. Default: **10**.
    pub target_reps: u32,

    /// Target held duration in seconds for hold-based exercises.
    /// Default: **30**.
    pub target_hold_seconds: u32,

    /// Minimum landmark visibility for repetition counting. Form checks use
    /// the stricter of this and the exercise's own form threshold.
    /// Default: **0.5**.
    pub visibility_threshold: f32,

    /// Consecutive agreeing frames required to commit a state transition
    /// (or to confirm a hold). Default: **3**.
    pub required_consecutive_frames: u32,

    /// Which plank variant to check. Ignored by count-based exercises.
    /// Default: **forearm**.
    pub plank_variant: PlankVariant,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            target_reps: 10,
            target_hold_seconds: 30,
            visibility_threshold: 0.5,
            required_consecutive_frames: 3,
            plank_variant: PlankVariant::Forearm,
        }
    }
}

impl ExerciseConfig {
    /// Load an [`ExerciseConfig`] from a JSON file at `path` and validate it.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read, the JSON is
    /// malformed, or validation fails.
    pub fn from_json(path: &Path) -> CoreResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CoreError::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        let cfg: ExerciseConfig = serde_json::from_str(&contents)
            .map_err(|e| CoreError::configuration(format!("malformed config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialize this configuration to pretty-printed JSON at `path`,
    /// creating parent directories if necessary.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be written.
    pub fn to_json(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CoreError::configuration(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::configuration(format!("serialization failed: {e}")))?;
        std::fs::write(path, json).map_err(|e| {
            CoreError::configuration(format!("failed to write {}: {e}", path.display()))
        })
    }
}

impl Validate for ExerciseConfig {
    /// Validate all fields and return the first problem found.
    fn validate(&self) -> CoreResult<()> {
        if self.target_reps == 0 {
            return Err(CoreError::configuration("target_reps must be > 0"));
        }
        if self.target_hold_seconds == 0 {
            return Err(CoreError::configuration("target_hold_seconds must be > 0"));
        }
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(CoreError::configuration(
                "visibility_threshold must be in (0.0, 1.0]",
            ));
        }
        if self.required_consecutive_frames == 0 {
            return Err(CoreError::configuration(
                "required_consecutive_frames must be >= 1",
            ));
        }
        Ok(())
    }
}
