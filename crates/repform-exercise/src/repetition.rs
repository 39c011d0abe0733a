//! Shared repetition state machine: hysteresis plus temporal debouncing.
//!
//! Raw per-frame threshold comparisons are too jittery to use as a discrete
//! state, so every count-based exercise runs its candidate classification
//! through [`RepMachine`]: a transition commits only after the configured
//! number of consecutive frames agree on the same direction, and the two
//! directions keep independent agreement counters. One full
//! Open→Closed→Open cycle counts exactly one repetition, emitted on the
//! closing Open commit.

use tracing::debug;

use repform_core::Resettable;

/// Coarse phase of a count-based movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepPhase {
    /// Resting position: standing tall, arms down, body up.
    Open,
    /// Target position: squat bottom, push-up down, arms overhead.
    Closed,
}

impl RepPhase {
    /// Returns the phase name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// What one observed frame did to the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepObservation {
    /// A phase transition committed on this frame.
    pub committed: Option<RepPhase>,
    /// A full Open→Closed→Open cycle completed on this frame.
    pub repetition: bool,
}

/// Debounced two-phase repetition machine.
///
/// Starts in [`RepPhase::Open`]. Exercises feed one candidate phase per
/// frame (or `None` when the geometry sits in the hysteresis dead band
/// between the enter and leave thresholds); the machine handles confirmation
/// and rep counting.
#[derive(Debug, Clone)]
pub struct RepMachine {
    required_frames: u32,
    phase: RepPhase,
    open_streak: u32,
    closed_streak: u32,
    /// A Closed commit has happened since the last Open commit.
    rep_armed: bool,
    total_reps: u32,
}

impl RepMachine {
    /// Creates a machine committing after `required_frames` agreeing frames.
    #[must_use]
    pub fn new(required_frames: u32) -> Self {
        Self {
            required_frames: required_frames.max(1),
            phase: RepPhase::Open,
            open_streak: 0,
            closed_streak: 0,
            rep_armed: false,
            total_reps: 0,
        }
    }

    /// Feed one frame's candidate classification.
    ///
    /// `None` means the frame supports neither phase; it resets both
    /// agreement counters. A candidate frame extends its own direction's
    /// streak and, being a disagreeing frame for the opposite direction,
    /// zeroes the other counter.
    pub fn observe(&mut self, candidate: Option<RepPhase>) -> RepObservation {
        let mut observation = RepObservation::default();

        let Some(direction) = candidate else {
            self.open_streak = 0;
            self.closed_streak = 0;
            return observation;
        };

        let streak = match direction {
            RepPhase::Open => {
                self.closed_streak = 0;
                self.open_streak += 1;
                self.open_streak
            }
            RepPhase::Closed => {
                self.open_streak = 0;
                self.closed_streak += 1;
                self.closed_streak
            }
        };

        if direction != self.phase && streak >= self.required_frames {
            self.phase = direction;
            self.open_streak = 0;
            self.closed_streak = 0;
            observation.committed = Some(direction);

            match direction {
                RepPhase::Closed => {
                    self.rep_armed = true;
                }
                RepPhase::Open => {
                    if self.rep_armed {
                        self.rep_armed = false;
                        self.total_reps += 1;
                        observation.repetition = true;
                        debug!(total_reps = self.total_reps, "repetition completed");
                    }
                }
            }
            debug!(phase = direction.name(), "phase committed");
        }

        observation
    }

    /// Required visibility was lost this frame.
    ///
    /// Both pending counters reset so a single noisy frame after reacquiring
    /// the subject cannot commit, but the committed phase and the armed rep
    /// are preserved: losing sight of the subject does not retroactively
    /// cancel a rep in progress.
    pub fn visibility_lost(&mut self) {
        self.open_streak = 0;
        self.closed_streak = 0;
    }

    /// Last committed phase.
    #[must_use]
    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    /// Repetitions committed since creation or the last reset.
    #[must_use]
    pub fn total_reps(&self) -> u32 {
        self.total_reps
    }
}

impl Resettable for RepMachine {
    fn reset(&mut self) {
        self.phase = RepPhase::Open;
        self.open_streak = 0;
        self.closed_streak = 0;
        self.rep_armed = false;
        self.total_reps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_open_with_no_reps() {
        let machine = RepMachine::new(3);
        assert_eq!(machine.phase(), RepPhase::Open);
        assert_eq!(machine.total_reps(), 0);
    }

    #[test]
    fn commits_after_required_consecutive_frames() {
        let mut machine = RepMachine::new(3);
        assert_eq!(machine.observe(Some(RepPhase::Closed)).committed, None);
        assert_eq!(machine.observe(Some(RepPhase::Closed)).committed, None);
        let obs = machine.observe(Some(RepPhase::Closed));
        assert_eq!(obs.committed, Some(RepPhase::Closed));
        assert!(!obs.repetition);
        assert_eq!(machine.phase(), RepPhase::Closed);
    }

    #[test]
    fn one_frame_short_never_commits() {
        let mut machine = RepMachine::new(3);
        machine.observe(Some(RepPhase::Closed));
        machine.observe(Some(RepPhase::Closed));
        // Disagreeing frame resets the closed streak.
        machine.observe(Some(RepPhase::Open));
        machine.observe(Some(RepPhase::Closed));
        machine.observe(Some(RepPhase::Closed));
        assert_eq!(machine.phase(), RepPhase::Open);
        assert_eq!(machine.total_reps(), 0);
    }

    #[test]
    fn dead_band_frame_resets_both_streaks() {
        let mut machine = RepMachine::new(2);
        machine.observe(Some(RepPhase::Closed));
        machine.observe(None);
        machine.observe(Some(RepPhase::Closed));
        assert_eq!(machine.phase(), RepPhase::Open);
        let obs = machine.observe(Some(RepPhase::Closed));
        assert_eq!(obs.committed, Some(RepPhase::Closed));
    }

    #[test]
    fn full_cycle_counts_exactly_one_rep() {
        let mut machine = RepMachine::new(3);
        for _ in 0..5 {
            machine.observe(Some(RepPhase::Closed));
        }
        assert_eq!(machine.total_reps(), 0);
        let mut reps = 0;
        for _ in 0..5 {
            if machine.observe(Some(RepPhase::Open)).repetition {
                reps += 1;
            }
        }
        assert_eq!(reps, 1);
        assert_eq!(machine.total_reps(), 1);
    }

    #[test]
    fn open_commit_without_armed_rep_counts_nothing() {
        let mut machine = RepMachine::new(2);
        // Re-confirming Open from Open never arms or counts.
        for _ in 0..6 {
            let obs = machine.observe(Some(RepPhase::Open));
            assert!(!obs.repetition);
        }
        assert_eq!(machine.total_reps(), 0);
    }

    #[test]
    fn visibility_loss_preserves_committed_phase_and_armed_rep() {
        let mut machine = RepMachine::new(3);
        for _ in 0..3 {
            machine.observe(Some(RepPhase::Closed));
        }
        assert_eq!(machine.phase(), RepPhase::Closed);

        machine.observe(Some(RepPhase::Open));
        machine.observe(Some(RepPhase::Open));
        machine.visibility_lost();
        assert_eq!(machine.phase(), RepPhase::Closed);

        // The interrupted streak must restart from zero…
        machine.observe(Some(RepPhase::Open));
        machine.observe(Some(RepPhase::Open));
        assert_eq!(machine.phase(), RepPhase::Closed);
        // …but the rep armed before the loss still completes.
        let obs = machine.observe(Some(RepPhase::Open));
        assert!(obs.repetition);
        assert_eq!(machine.total_reps(), 1);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut machine = RepMachine::new(2);
        for _ in 0..2 {
            machine.observe(Some(RepPhase::Closed));
        }
        for _ in 0..2 {
            machine.observe(Some(RepPhase::Open));
        }
        assert_eq!(machine.total_reps(), 1);

        machine.reset();
        assert_eq!(machine.phase(), RepPhase::Open);
        assert_eq!(machine.total_reps(), 0);

        // Identical trajectory reproduces identical results.
        for _ in 0..2 {
            machine.observe(Some(RepPhase::Closed));
        }
        let mut reps = 0;
        for _ in 0..2 {
            if machine.observe(Some(RepPhase::Open)).repetition {
                reps += 1;
            }
        }
        assert_eq!(reps, 1);
    }
}
