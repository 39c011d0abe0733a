//! Session orchestration over a single active exercise.
//!
//! [`SessionTracker`] owns at most one (config, classifier) pair at a time,
//! forwards frames to it, aggregates the externally visible rep count and
//! held duration, and paces how often form feedback is allowed to reach
//! subscribers. The pacing is independent of the classifiers' own frame
//! debounce: it exists purely to stop feedback delivery (speech, toasts)
//! from flooding while a defect persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use repform_core::{CoreError, CoreResult, FrameTimestamp, PoseFrame, Resettable, Validate};
use repform_exercise::{Exercise, ExerciseConfig, ExerciseKind, FormFeedback, TrackEvent};

/// Unique identifier for one tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrator tunables, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Minimum seconds between forwarded non-empty feedback messages,
    /// measured on the frame-timestamp clock. Default: **3.0**.
    pub feedback_interval_seconds: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_interval_seconds: 3.0,
        }
    }
}

impl Validate for SessionConfig {
    fn validate(&self) -> CoreResult<()> {
        if !(self.feedback_interval_seconds > 0.0) {
            return Err(CoreError::configuration(
                "feedback_interval_seconds must be > 0",
            ));
        }
        Ok(())
    }
}

/// What one forwarded frame produced at the session level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    /// Edge-triggered classifier event, passed through unchanged.
    pub event: Option<TrackEvent>,
    /// Feedback change to deliver to subscribers this frame.
    ///
    /// `None` means no change; `Some(Some(_))` announces a defect;
    /// `Some(None)` is an explicit clear of a corrected defect.
    pub announced_feedback: Option<Option<FormFeedback>>,
}

/// Read-only snapshot of session progress for UI readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub session_id: SessionId,
    /// Wall-clock time the current exercise was started.
    pub started_at: DateTime<Utc>,
    /// Active exercise, if one is running.
    pub exercise: Option<ExerciseKind>,
    /// Repetitions committed so far (count-based exercises).
    pub rep_count: u32,
    /// Target repetition count from the exercise configuration.
    pub target_reps: u32,
    /// Correctly-held seconds accumulated so far (hold-based exercises).
    pub hold_seconds: f64,
    /// Target held duration from the exercise configuration.
    pub target_hold_seconds: u32,
    /// Feedback most recently forwarded to subscribers, if still active.
    pub active_feedback: Option<FormFeedback>,
    /// Whether the configured target has been met.
    pub target_reached: bool,
}

struct ActiveExercise {
    kind: ExerciseKind,
    config: ExerciseConfig,
    classifier: Exercise,
}

/// Single-session orchestrator.
///
/// `process_frame` must be called strictly sequentially; wrap the tracker in
/// [`crate::SharedSession`] when frames and UI readers live on different
/// threads.
pub struct SessionTracker {
    session_id: SessionId,
    config: SessionConfig,
    started_at: DateTime<Utc>,
    active: Option<ActiveExercise>,
    rep_count: u32,
    hold_seconds: f64,
    announced: Option<FormFeedback>,
    last_announce_at: Option<FrameTimestamp>,
}

impl SessionTracker {
    /// Creates an idle tracker with the given orchestrator configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(config: SessionConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            session_id: SessionId::new(),
            config,
            started_at: Utc::now(),
            active: None,
            rep_count: 0,
            hold_seconds: 0.0,
            announced: None,
            last_announce_at: None,
        })
    }

    /// Starts tracking `kind`, replacing any previously active exercise.
    ///
    /// All aggregates and feedback state reset to zero.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation; the
    /// previously active exercise is left untouched in that case.
    pub fn start(&mut self, kind: ExerciseKind, config: ExerciseConfig) -> CoreResult<()> {
        config.validate()?;
        info!(exercise = kind.name(), "session exercise started");
        self.active = Some(ActiveExercise {
            kind,
            classifier: Exercise::new(kind, &config),
            config,
        });
        self.started_at = Utc::now();
        self.clear_progress();
        Ok(())
    }

    /// Stops the active exercise, if any.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            info!(
                exercise = active.kind.name(),
                reps = self.rep_count,
                hold_seconds = self.hold_seconds,
                "session exercise stopped"
            );
        }
    }

    /// Restarts the active exercise from scratch with the same configuration.
    pub fn restart(&mut self) {
        if let Some(active) = &mut self.active {
            active.classifier.reset();
            self.started_at = Utc::now();
        }
        self.clear_progress();
    }

    /// Forwards one frame to the active exercise.
    ///
    /// Returns an empty update when no exercise is active or the classifier
    /// skipped the frame.
    pub fn process_frame(&mut self, frame: &PoseFrame, timestamp: FrameTimestamp) -> SessionUpdate {
        let Some(active) = &mut self.active else {
            return SessionUpdate::default();
        };

        let outcome = active.classifier.process_frame(frame, timestamp);

        match outcome.event {
            Some(TrackEvent::Repetition { total }) => {
                self.rep_count += 1;
                debug!(reps = self.rep_count, machine_total = total, "repetition");
            }
            Some(TrackEvent::HoldTick { delta_seconds, .. }) => {
                self.hold_seconds += delta_seconds;
            }
            _ => {}
        }

        let announced_feedback = if outcome.skipped.is_some() {
            // Cannot determine form this frame; the last announcement stands.
            None
        } else {
            self.pace_feedback(outcome.feedback.clone(), timestamp)
        };

        SessionUpdate {
            event: outcome.event,
            announced_feedback,
        }
    }

    /// Applies the delivery debounce to one frame's feedback value.
    fn pace_feedback(
        &mut self,
        feedback: Option<FormFeedback>,
        timestamp: FrameTimestamp,
    ) -> Option<Option<FormFeedback>> {
        match feedback {
            Some(feedback) => {
                let elapsed_ok = self.last_announce_at.map_or(true, |last| {
                    timestamp.duration_since(last) >= self.config.feedback_interval_seconds
                });
                if !elapsed_ok {
                    return None;
                }
                debug!(code = feedback.code.code(), "feedback announced");
                self.announced = Some(feedback.clone());
                self.last_announce_at = Some(timestamp);
                Some(Some(feedback))
            }
            None => {
                // Form corrected: clear immediately, no interval applies.
                if self.announced.take().is_some() {
                    debug!("feedback cleared");
                    Some(None)
                } else {
                    None
                }
            }
        }
    }

    /// Cheap copyable view of current progress.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let (exercise, target_reps, target_hold_seconds) = match &self.active {
            Some(active) => (
                Some(active.kind),
                active.config.target_reps,
                active.config.target_hold_seconds,
            ),
            None => (None, 0, 0),
        };
        let target_reached = match exercise {
            Some(kind) if kind.is_hold_based() => {
                self.hold_seconds >= f64::from(target_hold_seconds)
            }
            Some(_) => self.rep_count >= target_reps,
            None => false,
        };

        SessionSnapshot {
            session_id: self.session_id,
            started_at: self.started_at,
            exercise,
            rep_count: self.rep_count,
            target_reps,
            hold_seconds: self.hold_seconds,
            target_hold_seconds,
            active_feedback: self.announced.clone(),
            target_reached,
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Repetitions committed so far; monotonically nondecreasing until the
    /// exercise restarts.
    #[must_use]
    pub fn rep_count(&self) -> u32 {
        self.rep_count
    }

    /// Correctly-held seconds accumulated so far.
    #[must_use]
    pub fn hold_seconds(&self) -> f64 {
        self.hold_seconds
    }

    fn clear_progress(&mut self) {
        self.rep_count = 0;
        self.hold_seconds = 0.0;
        self.announced = None;
        self.last_announce_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_config_is_valid() {
        SessionConfig::default()
            .validate()
            .expect("default session config should be valid");
    }

    #[test]
    fn non_positive_feedback_interval_is_invalid() {
        let cfg = SessionConfig {
            feedback_interval_seconds: 0.0,
        };
        assert!(cfg.validate().is_err());
        let cfg = SessionConfig {
            feedback_interval_seconds: f64::NAN,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tracker_rejects_invalid_session_config() {
        let cfg = SessionConfig {
            feedback_interval_seconds: -1.0,
        };
        assert!(SessionTracker::new(cfg).is_err());
    }

    #[test]
    fn start_rejects_invalid_exercise_config() {
        let mut tracker = SessionTracker::new(SessionConfig::default()).unwrap();
        let mut bad = ExerciseConfig::default();
        bad.required_consecutive_frames = 0;
        assert!(tracker.start(ExerciseKind::Squat, bad).is_err());
        assert!(tracker.snapshot().exercise.is_none());
    }

    #[test]
    fn idle_tracker_ignores_frames() {
        let mut tracker = SessionTracker::new(SessionConfig::default()).unwrap();
        let update = tracker.process_frame(&PoseFrame::default(), FrameTimestamp::from_seconds(0.0));
        assert_eq!(update, SessionUpdate::default());
    }

    #[test]
    fn snapshot_reflects_started_exercise() {
        let mut tracker = SessionTracker::new(SessionConfig::default()).unwrap();
        tracker
            .start(ExerciseKind::Plank, ExerciseConfig::default())
            .unwrap();
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.exercise, Some(ExerciseKind::Plank));
        assert_eq!(snapshot.rep_count, 0);
        assert_eq!(snapshot.hold_seconds, 0.0);
        assert!(!snapshot.target_reached);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut tracker = SessionTracker::new(SessionConfig::default()).unwrap();
        tracker
            .start(ExerciseKind::Squat, ExerciseConfig::default())
            .unwrap();
        let json = serde_json::to_string(&tracker.snapshot()).unwrap();
        assert!(json.contains("\"exercise\":\"squat\""));
        assert!(json.contains("\"rep_count\":0"));
    }
}
