//! Wall-slide classifier.
//!
//! Arms start in the goalpost position (elbows bent at shoulder height) and
//! slide to full extension overhead. Repetition detection uses the elbow
//! angle (shoulder–elbow–wrist, two-argument-arctangent formula): extended
//! overhead is the closed position, the goalpost return is open. Form
//! rules, most actionable first: wrists drifting off the wall plane,
//! elbows dropping below shoulder height while the arms are raised.

use repform_core::geometry::joint_angle_atan2_deg;
use repform_core::{BodyPoint, PoseFrame, Resettable, SkipReason};

use crate::config::ExerciseConfig;
use crate::exercises::point;
use crate::form::{FeedbackCode, FormFeedback};
use crate::repetition::{RepMachine, RepPhase};
use crate::{FrameOutcome, TrackEvent};

/// Landmarks gating both counting and form.
const REP_LANDMARKS: [BodyPoint; 7] = [
    BodyPoint::Nose,
    BodyPoint::LeftShoulder,
    BodyPoint::RightShoulder,
    BodyPoint::LeftElbow,
    BodyPoint::RightElbow,
    BodyPoint::LeftWrist,
    BodyPoint::RightWrist,
];

/// Elbow angle at or above which the arms read as extended overhead.
const EXTENDED_ELBOW_ANGLE_DEG: f32 = 155.0;
/// Elbow angle at or below which the goalpost return is a candidate.
const GOALPOST_ELBOW_ANGLE_DEG: f32 = 110.0;
/// Wrist this far from the shoulder plane reads as off the wall.
const WRIST_DRIFT_MARGIN: f32 = 0.12;
/// Elbow below shoulder height by this much reads as dropping.
const ELBOW_DROP_MARGIN: f32 = 0.03;
/// Form rules need at least this visibility.
const FORM_VISIBILITY_FLOOR: f32 = 0.5;

/// Wall-slide repetition and form tracker.
#[derive(Debug)]
pub struct WallSlideTracker {
    visibility_threshold: f32,
    machine: RepMachine,
}

impl WallSlideTracker {
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

    /// Last committed phase (`Closed` = arms extended overhead).
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
        let least_extended = left.min(right);
        let wrists_overhead = left_wrist.1 < nose.1 && right_wrist.1 < nose.1;

        if least_extended >= EXTENDED_ELBOW_ANGLE_DEG && wrists_overhead {
            Some(RepPhase::Closed)
        } else if least_extended <= GOALPOST_ELBOW_ANGLE_DEG {
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

        for (shoulder, wrist) in [
            (BodyPoint::LeftShoulder, BodyPoint::LeftWrist),
            (BodyPoint::RightShoulder, BodyPoint::RightWrist),
        ] {
            let shoulder = point(frame, shoulder)?;
            let wrist = point(frame, wrist)?;
            if (wrist.0 - shoulder.0).abs() > WRIST_DRIFT_MARGIN {
                return Some(FormFeedback::new(FeedbackCode::WristsOffWall));
            }
        }

        for (shoulder, elbow, wrist) in [
            (BodyPoint::LeftShoulder, BodyPoint::LeftElbow, BodyPoint::LeftWrist),
            (
                BodyPoint::RightShoulder,
                BodyPoint::RightElbow,
                BodyPoint::RightWrist,
            ),
        ] {
            let shoulder = point(frame, shoulder)?;
            let elbow = point(frame, elbow)?;
            let wrist = point(frame, wrist)?;
            let arm_raised = wrist.1 < shoulder.1;
            if arm_raised && elbow.1 > shoulder.1 + ELBOW_DROP_MARGIN {
                return Some(FormFeedback::new(FeedbackCode::ElbowsDropping));
            }
        }

        None
    }
}

impl Resettable for WallSlideTracker {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::testing::frame_with;

    fn goalpost_pose() -> PoseFrame {
        frame_with(&[
            (BodyPoint::Nose, (0.50, 0.20)),
            (BodyPoint::LeftShoulder, (0.40, 0.40)),
            (BodyPoint::RightShoulder, (0.60, 0.40)),
            (BodyPoint::LeftElbow, (0.35, 0.40)),
            (BodyPoint::RightElbow, (0.65, 0.40)),
            (BodyPoint::LeftWrist, (0.35, 0.25)),
            (BodyPoint::RightWrist, (0.65, 0.25)),
        ])
    }

    fn overhead_pose() -> PoseFrame {
        frame_with(&[
            (BodyPoint::Nose, (0.50, 0.20)),
            (BodyPoint::LeftShoulder, (0.40, 0.40)),
            (BodyPoint::RightShoulder, (0.60, 0.40)),
            (BodyPoint::LeftElbow, (0.42, 0.25)),
            (BodyPoint::RightElbow, (0.58, 0.25)),
            (BodyPoint::LeftWrist, (0.43, 0.10)),
            (BodyPoint::RightWrist, (0.57, 0.10)),
        ])
    }

    fn config(required_frames: u32) -> ExerciseConfig {
        ExerciseConfig {
            required_consecutive_frames: required_frames,
            ..ExerciseConfig::default()
        }
    }

    #[test]
    fn full_cycle_counts_one_rep() {
        let mut tracker = WallSlideTracker::new(&config(3));
        let goalpost = goalpost_pose();
        let overhead = overhead_pose();

        for _ in 0..3 {
            assert!(tracker.process_frame(&overhead).event.is_none());
        }
        assert_eq!(tracker.phase(), RepPhase::Closed);

        let mut reps = 0;
        for _ in 0..3 {
            if tracker.process_frame(&goalpost).event.is_some() {
                reps += 1;
            }
        }
        assert_eq!(reps, 1);
        assert_eq!(tracker.total_reps(), 1);
    }

    #[test]
    fn clean_positions_produce_no_feedback() {
        let mut tracker = WallSlideTracker::new(&config(2));
        assert!(tracker.process_frame(&goalpost_pose()).feedback.is_none());
        assert!(tracker.process_frame(&overhead_pose()).feedback.is_none());
    }

    #[test]
    fn drifted_wrist_reads_as_wrists_off_wall() {
        let mut tracker = WallSlideTracker::new(&config(2));
        // Left wrist has wandered far past the shoulder plane.
        let drifted = frame_with(&[
            (BodyPoint::Nose, (0.50, 0.20)),
            (BodyPoint::LeftShoulder, (0.40, 0.40)),
            (BodyPoint::RightShoulder, (0.60, 0.40)),
            (BodyPoint::LeftElbow, (0.42, 0.25)),
            (BodyPoint::RightElbow, (0.58, 0.25)),
            (BodyPoint::LeftWrist, (0.57, 0.10)),
            (BodyPoint::RightWrist, (0.57, 0.10)),
        ]);
        let feedback = tracker.process_frame(&drifted).feedback.unwrap();
        assert_eq!(feedback.code, FeedbackCode::WristsOffWall);
    }

    #[test]
    fn dropped_elbow_reads_as_elbows_dropping() {
        let mut tracker = WallSlideTracker::new(&config(2));
        let dropped = frame_with(&[
            (BodyPoint::Nose, (0.50, 0.20)),
            (BodyPoint::LeftShoulder, (0.40, 0.40)),
            (BodyPoint::RightShoulder, (0.60, 0.40)),
            // Wrists raised but the left elbow has sunk below the shoulder.
            (BodyPoint::LeftElbow, (0.41, 0.48)),
            (BodyPoint::RightElbow, (0.58, 0.25)),
            (BodyPoint::LeftWrist, (0.43, 0.10)),
            (BodyPoint::RightWrist, (0.57, 0.10)),
        ]);
        let feedback = tracker.process_frame(&dropped).feedback.unwrap();
        assert_eq!(feedback.code, FeedbackCode::ElbowsDropping);
    }

    #[test]
    fn mid_slide_is_dead_band() {
        let mut tracker = WallSlideTracker::new(&config(2));
        // Elbows at ~130 degrees: between the goalpost and extended bands.
        let mid = frame_with(&[
            (BodyPoint::Nose, (0.50, 0.20)),
            (BodyPoint::LeftShoulder, (0.40, 0.40)),
            (BodyPoint::RightShoulder, (0.60, 0.40)),
            (BodyPoint::LeftElbow, (0.37, 0.30)),
            (BodyPoint::RightElbow, (0.63, 0.30)),
            (BodyPoint::LeftWrist, (0.43, 0.18)),
            (BodyPoint::RightWrist, (0.57, 0.18)),
        ]);
        for _ in 0..6 {
            tracker.process_frame(&mid);
        }
        assert_eq!(tracker.phase(), RepPhase::Open);
        assert_eq!(tracker.total_reps(), 0);
    }
}
