//! Jumping-jack classifier.
//!
//! Purely span/height based: the closed position needs both wrists above
//! the nose with the feet spread wide relative to the shoulders, the open
//! position needs the arms back down by the hips with the feet together.
//! The enter/exit span ratios differ to give the usual hysteresis band.
//! Form rules catch the two halves getting out of sync: legs spread with
//! the arms lagging, or arms overhead over a narrow stance.

use repform_core::geometry::distance;
use repform_core::{BodyPoint, PoseFrame, Resettable, SkipReason};

use crate::config::ExerciseConfig;
use crate::exercises::{pair_midpoint, point};
use crate::form::{FeedbackCode, FormFeedback};
use crate::repetition::{RepMachine, RepPhase};
use crate::{FrameOutcome, TrackEvent};

/// Landmarks gating both counting and form.
const REP_LANDMARKS: [BodyPoint; 9] = [
    BodyPoint::Nose,
    BodyPoint::LeftShoulder,
    BodyPoint::RightShoulder,
    BodyPoint::LeftWrist,
    BodyPoint::RightWrist,
    BodyPoint::LeftHip,
    BodyPoint::RightHip,
    BodyPoint::LeftAnkle,
    BodyPoint::RightAnkle,
];

/// Ankle span over shoulder span at or above which the legs read as spread.
const SPREAD_ENTER_RATIO: f32 = 1.5;
/// Ankle span over shoulder span at or below which the legs read as together.
const SPREAD_EXIT_RATIO: f32 = 1.2;
/// Legs count as committed to the jump above this ratio (form rule).
const SPREAD_FORM_RATIO: f32 = 1.4;
/// Stance reads as too narrow for raised arms below this ratio (form rule).
const NARROW_FORM_RATIO: f32 = 1.3;
/// Form rules need at least this visibility.
const FORM_VISIBILITY_FLOOR: f32 = 0.5;

/// Jumping-jack repetition and form tracker.
#[derive(Debug)]
pub struct JumpingJackTracker {
    visibility_threshold: f32,
    machine: RepMachine,
}

impl JumpingJackTracker {
    /// Creates a tracker from the session configuration.
    #[must_use]
    pub fn new(config: &ExerciseConfig) -> Self {
        Self {
            visibility_threshold: config.visibility_threshold,
            machine: RepMachine::new(config.required_consecutive_frames),
        }
    }

    /// Classify one frame.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameOutcome {
        if !frame.all_visible(&REP_LANDMARKS, self.visibility_threshold) {
            self.machine.visibility_lost();
            return FrameOutcome::skip(SkipReason::InsufficientVisibility);
        }

        let observation = self.machine.observe(self.classify(frame));
        let event = observation.repetition.then(|| TrackEvent::Repetition {
            total: self.machine.total_reps(),
        });

        FrameOutcome {
            event,
            feedback: self.check_form(frame),
            skipped: None,
        }
    }

    /// Last committed phase (`Closed` = arms up, legs spread).
    #[must_use]
    pub fn phase(&self) -> RepPhase {
        self.machine.phase()
    }

    /// Repetitions completed so far.
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.machine.total_reps()
    }

    fn classify(&self, frame: &PoseFrame) -> Option<RepPhase> {
        let nose = point(frame, BodyPoint::Nose)?;
        let left_wrist = point(frame, BodyPoint::LeftWrist)?;
        let right_wrist = point(frame, BodyPoint::RightWrist)?;
        let hip_mid = pair_midpoint(frame, BodyPoint::LeftHip, BodyPoint::RightHip)?;
        let ratio = span_ratio(frame)?;

        let arms_up = left_wrist.1 < nose.1 && right_wrist.1 < nose.1;
        let arms_down = left_wrist.1 > hip_mid.1 && right_wrist.1 > hip_mid.1;

        if arms_up && ratio > SPREAD_ENTER_RATIO {
            Some(RepPhase::Closed)
        } else if arms_down && ratio < SPREAD_EXIT_RATIO {
            Some(RepPhase::Open)
        } else {
            None
        }
    }

    /// First-match-wins defect check, highest priority first.
    fn check_form(&self, frame: &PoseFrame) -> Option<FormFeedback> {
        let threshold = self.visibility_threshold.max(FORM_VISIBILITY_FLOOR);
        if !frame.all_visible(&REP_LANDMARKS, threshold) {
            return None;
        }

        let nose = point(frame, BodyPoint::Nose)?;
        let left_wrist = point(frame, BodyPoint::LeftWrist)?;
        let right_wrist = point(frame, BodyPoint::RightWrist)?;
        let ratio = span_ratio(frame)?;

        let arms_overhead = left_wrist.1 < nose.1 && right_wrist.1 < nose.1;

        if ratio > SPREAD_FORM_RATIO && !arms_overhead {
            return Some(FormFeedback::new(FeedbackCode::ArmsNotOverhead));
        }
        if arms_overhead && ratio < NARROW_FORM_RATIO {
            return Some(FormFeedback::new(FeedbackCode::StanceTooNarrow));
        }

        None
    }
}

impl Resettable for JumpingJackTracker {
    fn reset(&mut self) {
        self.machine.reset();
    }
}

fn span_ratio(frame: &PoseFrame) -> Option<f32> {
    let shoulder_span = distance(
        point(frame, BodyPoint::LeftShoulder)?,
        point(frame, BodyPoint::RightShoulder)?,
    );
    if shoulder_span < f32::EPSILON {
        return None;
    }
    let ankle_span = distance(
        point(frame, BodyPoint::LeftAnkle)?,
        point(frame, BodyPoint::RightAnkle)?,
    );
    Some(ankle_span / shoulder_span)
}
