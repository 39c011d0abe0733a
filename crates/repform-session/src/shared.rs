//! Thread-safe handle around a [`SessionTracker`].
//!
//! The tracker itself is single-writer: counters and accumulators are
//! order-dependent, so frames must be applied strictly sequentially. When
//! the detection pipeline and UI readers live on different threads, this
//! handle serializes frame application behind a write lock and gives
//! readers cheap [`SessionSnapshot`] copies instead of direct access to the
//! mutable state.

use std::sync::Arc;

use parking_lot::RwLock;

use repform_core::{CoreResult, FrameTimestamp, PoseFrame};
use repform_exercise::{ExerciseConfig, ExerciseKind};

use crate::session::{SessionConfig, SessionSnapshot, SessionTracker, SessionUpdate};

/// Cloneable shared handle to one tracking session.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<RwLock<SessionTracker>>,
}

impl SharedSession {
    /// Creates a shared handle around a fresh tracker.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(config: SessionConfig) -> CoreResult<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(SessionTracker::new(config)?)),
        })
    }

    /// Starts tracking `kind`. See [`SessionTracker::start`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `exercise_config` fails validation.
    pub fn start(&self, kind: ExerciseKind, exercise_config: ExerciseConfig) -> CoreResult<()> {
        self.inner.write().start(kind, exercise_config)
    }

    /// Stops the active exercise, if any.
    pub fn stop(&self) {
        self.inner.write().stop();
    }

    /// Restarts the active exercise with fresh state.
    pub fn restart(&self) {
        self.inner.write().restart();
    }

    /// Applies one frame under the write lock.
    ///
    /// Callers must not invoke this concurrently from multiple producers:
    /// the lock serializes access but cannot restore frame-arrival order.
    pub fn process_frame(&self, frame: &PoseFrame, timestamp: FrameTimestamp) -> SessionUpdate {
        self.inner.write().process_frame(frame, timestamp)
    }

    /// Takes a read-locked snapshot of current progress.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.read().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_observe_the_same_session() {
        let session = SharedSession::new(SessionConfig::default()).unwrap();
        session
            .start(ExerciseKind::Squat, ExerciseConfig::default())
            .unwrap();

        let reader = session.clone();
        assert_eq!(reader.snapshot().exercise, Some(ExerciseKind::Squat));
        assert_eq!(
            reader.snapshot().session_id,
            session.snapshot().session_id
        );

        session.stop();
        assert!(reader.snapshot().exercise.is_none());
    }

    #[test]
    fn snapshot_does_not_block_further_writes() {
        let session = SharedSession::new(SessionConfig::default()).unwrap();
        session
            .start(ExerciseKind::Plank, ExerciseConfig::default())
            .unwrap();
        // Snapshots are copies; holding one must not pin the lock.
        let before = session.snapshot();
        session.restart();
        let after = session.snapshot();
        assert_eq!(before.exercise, after.exercise);
        assert_eq!(after.hold_seconds, 0.0);
    }
}
