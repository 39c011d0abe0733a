//! Plank hold classifier.
//!
//! No repetition cycle: each frame yields a single "form currently correct"
//! verdict that drives the [`HoldTimer`]. Correct form means the
//! shoulder–hip–ankle body line is near straight (arccosine formula) and
//! the variant-specific support check passes: forearm planks need the
//! elbows stacked under the shoulders, straight-arm planks need extended
//! elbows with the wrists stacked under the shoulders. Feedback, most
//! actionable first: hips piked, hips sagging, support not stacked.

use repform_core::geometry::{joint_angle_atan2_deg, joint_angle_deg, vertical_offset_from_line};
use repform_core::{BodyPoint, FrameTimestamp, PoseFrame, Resettable, SkipReason};

use crate::config::{ExerciseConfig, PlankVariant};
use crate::exercises::{pair_midpoint, point};
use crate::form::{FeedbackCode, FormFeedback};
use crate::hold::{HoldStep, HoldTimer};
use crate::{FrameOutcome, TrackEvent};

/// Landmarks every plank variant needs.
const BASE_LANDMARKS: [BodyPoint; 8] = [
    BodyPoint::LeftShoulder,
    BodyPoint::RightShoulder,
    BodyPoint::LeftElbow,
    BodyPoint::RightElbow,
    BodyPoint::LeftHip,
    BodyPoint::RightHip,
    BodyPoint::LeftAnkle,
    BodyPoint::RightAnkle,
];

/// Additional landmarks for the straight-arm variant.
const STRAIGHT_ARM_LANDMARKS: [BodyPoint; 2] = [BodyPoint::LeftWrist, BodyPoint::RightWrist];

/// Body line must be at least this straight to hold.
const MIN_BODY_LINE_DEG: f32 = 155.0;
/// Hip offset from the shoulder–ankle line beyond which pike/sag fires.
const BODY_LINE_OFFSET_MARGIN: f32 = 0.05;
/// Support joint must be within this of the shoulder, horizontally.
const SUPPORT_STACK_MARGIN: f32 = 0.10;
/// Straight-arm variant needs at least this elbow extension.
const STRAIGHT_ARM_MIN_ELBOW_DEG: f32 = 160.0;

/// Plank hold tracker.
#[derive(Debug)]
pub struct PlankTracker {
    visibility_threshold: f32,
    variant: PlankVariant,
    hold: HoldTimer,
}

impl PlankTracker {
    /// Creates a tracker from the session configuration.
    #[must_use]
    pub fn new(config: &ExerciseConfig) -> Self {
        Self {
            visibility_threshold: config.visibility_threshold,
            variant: config.plank_variant,
            hold: HoldTimer::new(config.required_consecutive_frames),
        }
    }

    /// Classify one frame.
    ///
    /// `timestamp` must come from the same monotonic clock for the whole
    /// session; held time accumulates from its deltas while holding.
    pub fn process_frame(&mut self, frame: &PoseFrame, timestamp: FrameTimestamp) -> FrameOutcome {
        if !self.required_visible(frame) {
            // Cannot determine form: suspend rather than break, so an
            // occlusion is not reported as a technique failure.
            self.hold.suspend();
            return FrameOutcome::skip(SkipReason::InsufficientVisibility);
        }

        let feedback = self.check_form(frame);
        let form_ok = feedback.is_none() && self.support_extended(frame);

        let (event, skipped) = match self.hold.update(form_ok, timestamp) {
            HoldStep::Idle => (None, None),
            HoldStep::Started => (Some(TrackEvent::HoldStarted), None),
            HoldStep::Tick { delta_seconds } => (
                Some(TrackEvent::HoldTick {
                    delta_seconds,
                    total_seconds: self.hold.total_seconds(),
                }),
                None,
            ),
            HoldStep::InvalidGap => (None, Some(SkipReason::InvalidTimestamp)),
            HoldStep::Broken => (
                Some(TrackEvent::HoldBroken {
                    total_seconds: self.hold.total_seconds(),
                }),
                None,
            ),
        };

        FrameOutcome {
            event,
            feedback,
            skipped,
        }
    }

    /// Accumulated correctly-held seconds.
    #[must_use]
    pub fn total_hold_seconds(&self) -> f64 {
        self.hold.total_seconds()
    }

    /// Returns `true` while the hold is active.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.hold.is_holding()
    }

    /// Which plank variant this tracker checks.
    #[must_use]
    pub fn variant(&self) -> PlankVariant {
        self.variant
    }

    fn required_visible(&self, frame: &PoseFrame) -> bool {
        if !frame.all_visible(&BASE_LANDMARKS, self.visibility_threshold) {
            return false;
        }
        match self.variant {
            PlankVariant::Forearm => true,
            PlankVariant::StraightArm => {
                frame.all_visible(&STRAIGHT_ARM_LANDMARKS, self.visibility_threshold)
            }
        }
    }

    /// First-match-wins defect check, highest priority first.
    fn check_form(&self, frame: &PoseFrame) -> Option<FormFeedback> {
        let shoulder_mid = pair_midpoint(frame, BodyPoint::LeftShoulder, BodyPoint::RightShoulder)?;
        let hip_mid = pair_midpoint(frame, BodyPoint::LeftHip, BodyPoint::RightHip)?;
        let ankle_mid = pair_midpoint(frame, BodyPoint::LeftAnkle, BodyPoint::RightAnkle)?;

        let offset = vertical_offset_from_line(hip_mid, shoulder_mid, ankle_mid);
        if offset < -BODY_LINE_OFFSET_MARGIN {
            return Some(FormFeedback::new(FeedbackCode::HipsTooHigh));
        }
        if offset > BODY_LINE_OFFSET_MARGIN {
            return Some(FormFeedback::new(FeedbackCode::HipsSagging));
        }

        let (support_mid, code) = match self.variant {
            PlankVariant::Forearm => (
                pair_midpoint(frame, BodyPoint::LeftElbow, BodyPoint::RightElbow)?,
                FeedbackCode::ElbowsNotUnderShoulders,
            ),
            PlankVariant::StraightArm => (
                pair_midpoint(frame, BodyPoint::LeftWrist, BodyPoint::RightWrist)?,
                FeedbackCode::WristsNotUnderShoulders,
            ),
        };
        if (support_mid.0 - shoulder_mid.0).abs() > SUPPORT_STACK_MARGIN {
            return Some(FormFeedback::new(code));
        }

        None
    }

    /// Non-feedback form conditions: the body line must be near straight,
    /// and straight-arm planks need the elbows actually extended.
    fn support_extended(&self, frame: &PoseFrame) -> bool {
        let Some(alignment) = self.body_line_angle(frame) else {
            return false;
        };
        if alignment < MIN_BODY_LINE_DEG {
            return false;
        }
        match self.variant {
            PlankVariant::Forearm => true,
            PlankVariant::StraightArm => {
                let angles = [
                    (BodyPoint::LeftShoulder, BodyPoint::LeftElbow, BodyPoint::LeftWrist),
                    (
                        BodyPoint::RightShoulder,
                        BodyPoint::RightElbow,
                        BodyPoint::RightWrist,
                    ),
                ];
                angles.iter().all(|(s, e, w)| {
                    let angle = match (point(frame, *s), point(frame, *e), point(frame, *w)) {
                        (Some(s), Some(e), Some(w)) => joint_angle_atan2_deg(s, e, w),
                        _ => 0.0,
                    };
                    angle >= STRAIGHT_ARM_MIN_ELBOW_DEG
                })
            }
        }
    }

    fn body_line_angle(&self, frame: &PoseFrame) -> Option<f32> {
        Some(joint_angle_deg(
            pair_midpoint(frame, BodyPoint::LeftShoulder, BodyPoint::RightShoulder)?,
            pair_midpoint(frame, BodyPoint::LeftHip, BodyPoint::RightHip)?,
            pair_midpoint(frame, BodyPoint::LeftAnkle, BodyPoint::RightAnkle)?,
        ))
    }
}

impl Resettable for PlankTracker {
    fn reset(&mut self) {
        self.hold.reset();
    }
}
