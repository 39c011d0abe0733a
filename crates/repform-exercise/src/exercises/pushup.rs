//! Push-up classifier.
//!
//! Repetition detection uses the elbow angle (shoulder–elbow–wrist,
//! two-argument-arctangent formula) with a hysteresis pair between the down
//! and up positions. Form rules, most actionable first: knees resting on
//! the ground (depth proxy via landmark z), hips piking above the body
//! line, hips sagging below it, elbows flaring wide while down.

use repform_core::geometry::{joint_angle_atan2_deg, joint_angle_deg, vertical_offset_from_line};
use repform_core::{BodyPoint, PoseFrame, Resettable, SkipReason};

use crate::config::ExerciseConfig;
use crate::exercises::{pair_midpoint, point};
use crate::form::{FeedbackCode, FormFeedback};
use crate::repetition::{RepMachine, RepPhase};
use crate::{FrameOutcome, TrackEvent};

/// Landmarks gating repetition counting (arms only).
const REP_LANDMARKS: [BodyPoint; 6] = [
    BodyPoint::LeftShoulder,
    BodyPoint::RightShoulder,
    BodyPoint::LeftElbow,
    BodyPoint::RightElbow,
    BodyPoint::LeftWrist,
    BodyPoint::RightWrist,
];

/// Landmarks gating form rules (arms plus the body line).
const FORM_LANDMARKS: [BodyPoint; 12] = [
    BodyPoint::LeftShoulder,
    BodyPoint::RightShoulder,
    BodyPoint::LeftElbow,
    BodyPoint::RightElbow,
    BodyPoint::LeftWrist,
    BodyPoint::RightWrist,
    BodyPoint::LeftHip,
    BodyPoint::RightHip,
    BodyPoint::LeftKnee,
    BodyPoint::RightKnee,
    BodyPoint::LeftAnkle,
    BodyPoint::RightAnkle,
];

/// Elbow angle at or below which the down position is a candidate.
const DOWN_ELBOW_ANGLE_DEG: f32 = 95.0;
/// Elbow angle at or above which the up position is a candidate.
const UP_ELBOW_ANGLE_DEG: f32 = 160.0;
/// Hip offset from the shoulder–ankle line beyond which sag/pike fires.
const BODY_LINE_OFFSET_MARGIN: f32 = 0.05;
/// Upper-arm/torso angle beyond which the elbows read as flared.
const ELBOW_FLARE_MAX_DEG: f32 = 75.0;
/// Knee closer to the camera than the hip by this much reads as kneeling.
const KNEE_DEPTH_MARGIN: f32 = 0.15;
/// Form rules need at least this visibility on the wider landmark set.
const FORM_VISIBILITY_FLOOR: f32 = 0.5;

/// Push-up repetition and form tracker.
#[derive(Debug)]
pub struct PushupTracker {
    visibility_threshold: f32,
    machine: RepMachine,
}

impl PushupTracker {
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

    /// Last committed phase (`Closed` = down).
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
        let left = elbow_angle(
            frame,
            BodyPoint::LeftShoulder,
            BodyPoint::LeftElbow,
            BodyPoint::LeftWrist,
        )?;
        let right = elbow_angle(
            frame,
            BodyPoint::RightShoulder,
            BodyPoint::RightElbow,
            BodyPoint::RightWrist,
        )?;
        let most_bent = left.min(right);

        if most_bent <= DOWN_ELBOW_ANGLE_DEG {
            Some(RepPhase::Closed)
        } else if most_bent >= UP_ELBOW_ANGLE_DEG {
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

        if self.knees_on_ground(frame) {
            return Some(FormFeedback::new(FeedbackCode::KneesOnGround));
        }

        let shoulder_mid = pair_midpoint(frame, BodyPoint::LeftShoulder, BodyPoint::RightShoulder)?;
        let hip_mid = pair_midpoint(frame, BodyPoint::LeftHip, BodyPoint::RightHip)?;
        let ankle_mid = pair_midpoint(frame, BodyPoint::LeftAnkle, BodyPoint::RightAnkle)?;

        let offset = vertical_offset_from_line(hip_mid, shoulder_mid, ankle_mid);
        if offset < -BODY_LINE_OFFSET_MARGIN {
            return Some(FormFeedback::new(FeedbackCode::BodyPiking));
        }
        if offset > BODY_LINE_OFFSET_MARGIN {
            return Some(FormFeedback::new(FeedbackCode::BodySagging));
        }

        // Flare is only meaningful with the elbows loaded in the down phase.
        if self.machine.phase() == RepPhase::Closed {
            for (shoulder, elbow, hip) in [
                (BodyPoint::LeftShoulder, BodyPoint::LeftElbow, BodyPoint::LeftHip),
                (
                    BodyPoint::RightShoulder,
                    BodyPoint::RightElbow,
                    BodyPoint::RightHip,
                ),
            ] {
                let flare = joint_angle_deg(
                    point(frame, elbow)?,
                    point(frame, shoulder)?,
                    point(frame, hip)?,
                );
                if flare > ELBOW_FLARE_MAX_DEG {
                    return Some(FormFeedback::new(FeedbackCode::ElbowsFlaring));
                }
            }
        }

        None
    }

    /// Depth-proxy check: a knee markedly closer to the camera than the hip
    /// on the same side reads as kneeling. Skipped when the estimator
    /// delivers no depth.
    fn knees_on_ground(&self, frame: &PoseFrame) -> bool {
        for (hip, knee) in [
            (BodyPoint::LeftHip, BodyPoint::LeftKnee),
            (BodyPoint::RightHip, BodyPoint::RightKnee),
        ] {
            let (Some(hip_z), Some(knee_z)) = (
                frame.get(hip).and_then(|lm| lm.z),
                frame.get(knee).and_then(|lm| lm.z),
            ) else {
                continue;
            };
            if knee_z < hip_z - KNEE_DEPTH_MARGIN {
                return true;
            }
        }
        false
    }
}

impl Resettable for PushupTracker {
    fn reset(&mut self) {
        self.machine.reset();
    }
}

fn elbow_angle(
    frame: &PoseFrame,
    shoulder: BodyPoint,
    elbow: BodyPoint,
    wrist: BodyPoint,
) -> Option<f32> {
    Some(joint_angle_atan2_deg(
        point(frame, shoulder)?,
        point(frame, elbow)?,
        point(frame, wrist)?,
    ))
}
