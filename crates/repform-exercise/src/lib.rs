//! # Repform Exercise
//!
//! Per-exercise repetition and form-quality classifiers over externally
//! detected pose frames.
//!
//! Each exercise is a small state machine that consumes one [`PoseFrame`]
//! per detection cycle and produces a [`FrameOutcome`]: an optional
//! edge-triggered [`TrackEvent`], an optional prioritized [`FormFeedback`],
//! or a [`SkipReason`] when the frame could not be classified. Count-based
//! exercises (squat, push-up, jumping jack, wall slide) share the
//! [`RepMachine`] hysteresis/debounce protocol; the plank runs the
//! [`HoldTimer`] accumulator instead.
//!
//! Dispatch over exercise kinds is the closed [`Exercise`] enum, so adding
//! a kind is a compile-checked, exhaustive change.
//!
//! # Example
//!
//! ```rust,no_run
//! use repform_exercise::{Exercise, ExerciseKind, config::ExerciseConfig};
//! use repform_core::{FrameTimestamp, PoseFrame};
//!
//! let mut exercise = Exercise::new(ExerciseKind::Squat, &ExerciseConfig::default());
//! let frame = PoseFrame::default();
//! let outcome = exercise.process_frame(&frame, FrameTimestamp::from_seconds(0.0));
//! if let Some(event) = outcome.event {
//!     println!("event: {event:?}");
//! }
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod exercises;
pub mod form;
pub mod hold;
pub mod repetition;

pub use config::{ExerciseConfig, PlankVariant};
pub use exercises::{
    jumping_jack::JumpingJackTracker, plank::PlankTracker, pushup::PushupTracker,
    squat::SquatTracker, wall_slide::WallSlideTracker,
};
pub use form::{FeedbackCode, FormFeedback};
pub use hold::{HoldStep, HoldTimer, MAX_FRAME_GAP_SECONDS};
pub use repetition::{RepMachine, RepObservation, RepPhase};

use serde::{Deserialize, Serialize};

use repform_core::{FrameTimestamp, PoseFrame, Resettable, SkipReason};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The supported exercise families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Bodyweight squat (count-based)
    Squat,
    /// Push-up (count-based)
    Pushup,
    /// Jumping jack (count-based)
    JumpingJack,
    /// Wall slide (count-based)
    WallSlide,
    /// Plank (duration-based)
    Plank,
}

impl ExerciseKind {
    /// Returns the exercise name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Squat => "squat",
            Self::Pushup => "pushup",
            Self::JumpingJack => "jumping_jack",
            Self::WallSlide => "wall_slide",
            Self::Plank => "plank",
        }
    }

    /// Returns `true` for duration-based (hold) exercises.
    #[must_use]
    pub fn is_hold_based(&self) -> bool {
        matches!(self, Self::Plank)
    }
}

/// Edge-triggered event produced by a classifier.
///
/// Events are returned to the caller, never stored by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TrackEvent {
    /// One full Open→Closed→Open cycle completed.
    Repetition {
        /// Repetitions completed so far this session.
        total: u32,
    },
    /// Hold confirmation completed; the clock is now running.
    HoldStarted,
    /// Held duration advanced while validly holding.
    HoldTick {
        /// Seconds contributed by this frame.
        delta_seconds: f64,
        /// Accumulated held seconds.
        total_seconds: f64,
    },
    /// Form broke; the clock paused with the total preserved.
    HoldBroken {
        /// Accumulated held seconds at the break.
        total_seconds: f64,
    },
}

/// Result of classifying one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    /// Edge-triggered event, if one fired this frame.
    pub event: Option<TrackEvent>,
    /// Highest-priority form defect detected this frame, if any.
    pub feedback: Option<FormFeedback>,
    /// Set when the frame was skipped instead of classified.
    pub skipped: Option<SkipReason>,
}

impl FrameOutcome {
    /// Outcome for a frame that was skipped rather than classified.
    #[must_use]
    pub fn skip(reason: SkipReason) -> Self {
        Self {
            event: None,
            feedback: None,
            skipped: Some(reason),
        }
    }
}

/// An active exercise classifier, dispatched by kind.
///
/// Owns its runtime state exclusively; frames are borrowed per call and no
/// reference is held beyond the call. `process_frame` must be invoked
/// strictly sequentially: counters and accumulators are order-dependent.
#[derive(Debug)]
pub enum Exercise {
    /// Squat classifier
    Squat(SquatTracker),
    /// Push-up classifier
    Pushup(PushupTracker),
    /// Jumping-jack classifier
    JumpingJack(JumpingJackTracker),
    /// Wall-slide classifier
    WallSlide(WallSlideTracker),
    /// Plank hold classifier
    Plank(PlankTracker),
}

impl Exercise {
    /// Creates the classifier for `kind` configured by `config`.
    #[must_use]
    pub fn new(kind: ExerciseKind, config: &ExerciseConfig) -> Self {
        match kind {
            ExerciseKind::Squat => Self::Squat(SquatTracker::new(config)),
            ExerciseKind::Pushup => Self::Pushup(PushupTracker::new(config)),
            ExerciseKind::JumpingJack => Self::JumpingJack(JumpingJackTracker::new(config)),
            ExerciseKind::WallSlide => Self::WallSlide(WallSlideTracker::new(config)),
            ExerciseKind::Plank => Self::Plank(PlankTracker::new(config)),
        }
    }

    /// Which exercise family this classifier tracks.
    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        match self {
            Self::Squat(_) => ExerciseKind::Squat,
            Self::Pushup(_) => ExerciseKind::Pushup,
            Self::JumpingJack(_) => ExerciseKind::JumpingJack,
            Self::WallSlide(_) => ExerciseKind::WallSlide,
            Self::Plank(_) => ExerciseKind::Plank,
        }
    }

    /// Classify one frame.
    pub fn process_frame(&mut self, frame: &PoseFrame, timestamp: FrameTimestamp) -> FrameOutcome {
        match self {
            Self::Squat(t) => t.process_frame(frame),
            Self::Pushup(t) => t.process_frame(frame),
            Self::JumpingJack(t) => t.process_frame(frame),
            Self::WallSlide(t) => t.process_frame(frame),
            Self::Plank(t) => t.process_frame(frame, timestamp),
        }
    }

    /// Repetitions completed so far (always 0 for hold-based exercises).
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        match self {
            Self::Squat(t) => t.total_reps(),
            Self::Pushup(t) => t.total_reps(),
            Self::JumpingJack(t) => t.total_reps(),
            Self::WallSlide(t) => t.total_reps(),
            Self::Plank(_) => 0,
        }
    }

    /// Accumulated held seconds (always 0 for count-based exercises).
    #[must_use]
    pub fn hold_seconds(&self) -> f64 {
        match self {
            Self::Plank(t) => t.total_hold_seconds(),
            _ => 0.0,
        }
    }
}

impl Resettable for Exercise {
    fn reset(&mut self) {
        match self {
            Self::Squat(t) => t.reset(),
            Self::Pushup(t) => t.reset(),
            Self::JumpingJack(t) => t.reset(),
            Self::WallSlide(t) => t.reset(),
            Self::Plank(t) => t.reset(),
        }
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{ExerciseConfig, PlankVariant};
    pub use crate::form::{FeedbackCode, FormFeedback};
    pub use crate::{Exercise, ExerciseKind, FrameOutcome, TrackEvent};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn kind_round_trips_through_constructor() {
        let config = ExerciseConfig::default();
        for kind in [
            ExerciseKind::Squat,
            ExerciseKind::Pushup,
            ExerciseKind::JumpingJack,
            ExerciseKind::WallSlide,
            ExerciseKind::Plank,
        ] {
            assert_eq!(Exercise::new(kind, &config).kind(), kind);
        }
    }

    #[test]
    fn only_plank_is_hold_based() {
        assert!(ExerciseKind::Plank.is_hold_based());
        assert!(!ExerciseKind::Squat.is_hold_based());
        assert!(!ExerciseKind::JumpingJack.is_hold_based());
    }
}
