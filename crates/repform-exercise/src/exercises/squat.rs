//! Bodyweight-squat classifier.
//!
//! Repetition detection uses the knee angle (hip–knee–ankle, arccosine
//! formula) with a hysteresis pair: the bottom position requires a deep
//! knee bend *and* the hips dropped to knee height, while standing requires
//! both knees near straight. Form rules, most actionable first: knees
//! caving inward (checked only at the bottom), back rounding, heels
//! lifting.

use repform_core::geometry::{distance, joint_angle_deg};
use repform_core::{BodyPoint, PoseFrame, Resettable, SkipReason};

use crate::config::ExerciseConfig;
use crate::exercises::{pair_midpoint, point};
use crate::form::{FeedbackCode, FormFeedback};
use crate::repetition::{RepMachine, RepPhase};
use crate::{FrameOutcome, TrackEvent};

/// Landmarks gating repetition counting (legs only).
const REP_LANDMARKS: [BodyPoint; 6] = [
    BodyPoint::LeftHip,
    BodyPoint::RightHip,
    BodyPoint::LeftKnee,
    BodyPoint::RightKnee,
    BodyPoint::LeftAnkle,
    BodyPoint::RightAnkle,
];

/// Landmarks gating form rules (legs, torso, feet).
const FORM_LANDMARKS: [BodyPoint; 12] = [
    BodyPoint::LeftShoulder,
    BodyPoint::RightShoulder,
    BodyPoint::LeftHip,
    BodyPoint::RightHip,
    BodyPoint::LeftKnee,
    BodyPoint::RightKnee,
    BodyPoint::LeftAnkle,
    BodyPoint::RightAnkle,
    BodyPoint::LeftHeel,
    BodyPoint::RightHeel,
    BodyPoint::LeftFootIndex,
    BodyPoint::RightFootIndex,
];

/// Knee angle at or below which the bottom position is a candidate.
const BOTTOM_KNEE_ANGLE_DEG: f32 = 100.0;
/// Knee angle at or above which standing is a candidate.
const STANDING_KNEE_ANGLE_DEG: f32 = 160.0;
/// Hip counts as lowered when within this much of knee height.
const HIP_DROP_MARGIN: f32 = 0.05;
/// Knee span below this fraction of ankle span reads as caving in.
const KNEE_CAVE_SPAN_RATIO: f32 = 0.7;
/// Torso lean past vertical beyond this reads as back rounding.
const TORSO_LEAN_MAX_DEG: f32 = 45.0;
/// Heel above the toe by this much reads as a lifted heel.
const HEEL_LIFT_MARGIN: f32 = 0.02;
/// Form rules need at least this visibility on the wider landmark set.
const FORM_VISIBILITY_FLOOR: f32 = 0.6;

/// Squat repetition and form tracker.
#[derive(Debug)]
pub struct SquatTracker {
    visibility_threshold: f32,
    machine: RepMachine,
}

impl SquatTracker {
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

    /// Last committed phase.
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
        let left = knee_angle(frame, BodyPoint::LeftHip, BodyPoint::LeftKnee, BodyPoint::LeftAnkle)?;
        let right = knee_angle(
            frame,
            BodyPoint::RightHip,
            BodyPoint::RightKnee,
            BodyPoint::RightAnkle,
        )?;
        let deepest = left.min(right);

        let hip_mid = pair_midpoint(frame, BodyPoint::LeftHip, BodyPoint::RightHip)?;
        let knee_mid = pair_midpoint(frame, BodyPoint::LeftKnee, BodyPoint::RightKnee)?;
        let hips_lowered = hip_mid.1 > knee_mid.1 - HIP_DROP_MARGIN;

        if deepest <= BOTTOM_KNEE_ANGLE_DEG && hips_lowered {
            Some(RepPhase::Closed)
        } else if deepest >= STANDING_KNEE_ANGLE_DEG {
            Some(RepPhase::Open)
        } else {
            None
        }
    }

    /// First-match-wins defect check, highest priority first.
    fn check_form(&self, frame: &PoseFrame) -> Option<FormFeedback> {
        let threshold = self.visibility_threshold.max(FORM_VISIBILITY_FLOOR);
        if !frame.all_visible(&FORM_LANDMARKS, threshold) {
            return None;
        }

        // Knee tracking is only assessable at the bottom of the squat.
        if self.machine.phase() == RepPhase::Closed {
            let knee_span = distance(
                point(frame, BodyPoint::LeftKnee)?,
                point(frame, BodyPoint::RightKnee)?,
            );
            let ankle_span = distance(
                point(frame, BodyPoint::LeftAnkle)?,
                point(frame, BodyPoint::RightAnkle)?,
            );
            if ankle_span > f32::EPSILON && knee_span / ankle_span < KNEE_CAVE_SPAN_RATIO {
                return Some(FormFeedback::new(FeedbackCode::KneesCavingIn));
            }
        }

        let shoulder_mid = pair_midpoint(frame, BodyPoint::LeftShoulder, BodyPoint::RightShoulder)?;
        let hip_mid = pair_midpoint(frame, BodyPoint::LeftHip, BodyPoint::RightHip)?;
        let vertical_ref = (hip_mid.0, hip_mid.1 - 0.5);
        let lean = joint_angle_deg(shoulder_mid, hip_mid, vertical_ref);
        if lean > TORSO_LEAN_MAX_DEG {
            return Some(FormFeedback::new(FeedbackCode::BackRounding));
        }

        for (heel, toe) in [
            (BodyPoint::LeftHeel, BodyPoint::LeftFootIndex),
            (BodyPoint::RightHeel, BodyPoint::RightFootIndex),
        ] {
            let heel = point(frame, heel)?;
            let toe = point(frame, toe)?;
            if heel.1 + HEEL_LIFT_MARGIN < toe.1 {
                return Some(FormFeedback::new(FeedbackCode::HeelsLifting));
            }
        }

        None
    }
}

impl Resettable for SquatTracker {
    fn reset(&mut self) {
        self.machine.reset();
    }
}

fn knee_angle(frame: &PoseFrame, hip: BodyPoint, knee: BodyPoint, ankle: BodyPoint) -> Option<f32> {
    Some(joint_angle_deg(
        point(frame, hip)?,
        point(frame, knee)?,
        point(frame, ankle)?,
    ))
}
