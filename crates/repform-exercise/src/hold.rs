//! Hold accumulator for duration-based exercises.
//!
//! Tracks whether correct form is being continuously maintained and
//! accumulates held time from frame-timestamp deltas. Entry into "actively
//! holding" is gated by the same consecutive-frame confirmation used for
//! repetition commits; breaking form drops the hold immediately (no grace
//! window) while preserving the accumulated total: the clock pauses, it
//! does not restart.

use tracing::warn;

use repform_core::{FrameTimestamp, Resettable};

/// Frame gaps at or above this many seconds are treated as a tracking glitch
/// and contribute zero duration rather than corrupting the total.
pub const MAX_FRAME_GAP_SECONDS: f64 = 0.5;

/// What one frame did to the hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldStep {
    /// Not holding; confirmation streak may be building.
    Idle,
    /// Confirmation completed on this frame; the hold is now active.
    Started,
    /// Held duration advanced by `delta_seconds`.
    Tick {
        /// Seconds added to the accumulator this frame.
        delta_seconds: f64,
    },
    /// Holding, but this frame's timestamp delta was non-positive or over
    /// the sanity ceiling; zero duration contributed.
    InvalidGap,
    /// Form broke on this frame; the hold stopped, the total is preserved.
    Broken,
}

/// Confirmation-gated held-time accumulator.
#[derive(Debug, Clone)]
pub struct HoldTimer {
    required_frames: u32,
    confirm_streak: u32,
    holding: bool,
    total_seconds: f64,
    last_timestamp: Option<FrameTimestamp>,
}

impl HoldTimer {
    /// Creates a timer requiring `required_frames` consecutive correct-form
    /// frames before the hold becomes active.
    #[must_use]
    pub fn new(required_frames: u32) -> Self {
        Self {
            required_frames: required_frames.max(1),
            confirm_streak: 0,
            holding: false,
            total_seconds: 0.0,
            last_timestamp: None,
        }
    }

    /// Feed one frame's form verdict and timestamp.
    pub fn update(&mut self, form_ok: bool, timestamp: FrameTimestamp) -> HoldStep {
        if !form_ok {
            self.confirm_streak = 0;
            self.last_timestamp = None;
            if self.holding {
                self.holding = false;
                return HoldStep::Broken;
            }
            return HoldStep::Idle;
        }

        if !self.holding {
            self.confirm_streak += 1;
            if self.confirm_streak >= self.required_frames {
                self.holding = true;
                self.last_timestamp = Some(timestamp);
                return HoldStep::Started;
            }
            return HoldStep::Idle;
        }

        let delta = self
            .last_timestamp
            .map(|previous| timestamp.duration_since(previous));
        self.last_timestamp = Some(timestamp);

        match delta {
            Some(d) if d > 0.0 && d < MAX_FRAME_GAP_SECONDS => {
                self.total_seconds += d;
                HoldStep::Tick { delta_seconds: d }
            }
            Some(d) => {
                warn!(delta_seconds = d, "rejected frame gap while holding");
                HoldStep::InvalidGap
            }
            // No reference timestamp: cannot compute a delta this frame.
            None => HoldStep::InvalidGap,
        }
    }

    /// Required visibility was lost: the hold is suspended without emitting
    /// a form-break verdict. The confirmation streak and reference timestamp
    /// clear so no delta can span the gap; the total is preserved.
    pub fn suspend(&mut self) {
        self.confirm_streak = 0;
        self.holding = false;
        self.last_timestamp = None;
    }

    /// Returns `true` while the hold is active.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.holding
    }

    /// Total correctly-held seconds accumulated so far.
    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }
}

impl Resettable for HoldTimer {
    fn reset(&mut self) {
        self.confirm_streak = 0;
        self.holding = false;
        self.total_seconds = 0.0;
        self.last_timestamp = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(seconds: f64) -> FrameTimestamp {
        FrameTimestamp::from_seconds(seconds)
    }

    #[test]
    fn confirmation_gates_hold_entry() {
        let mut timer = HoldTimer::new(3);
        assert_eq!(timer.update(true, ts(0.0)), HoldStep::Idle);
        assert_eq!(timer.update(true, ts(0.1)), HoldStep::Idle);
        assert_eq!(timer.update(true, ts(0.2)), HoldStep::Started);
        assert!(timer.is_holding());
        assert_eq!(timer.total_seconds(), 0.0);
    }

    #[test]
    fn accumulates_deltas_while_holding() {
        let mut timer = HoldTimer::new(1);
        timer.update(true, ts(0.0));
        for i in 1..=10 {
            let step = timer.update(true, ts(i as f64 * 0.1));
            assert!(matches!(step, HoldStep::Tick { .. }));
        }
        assert!((timer.total_seconds() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn form_break_pauses_but_preserves_total() {
        let mut timer = HoldTimer::new(1);
        timer.update(true, ts(0.0));
        timer.update(true, ts(0.1));
        timer.update(true, ts(0.2));
        assert_eq!(timer.update(false, ts(0.3)), HoldStep::Broken);
        assert!(!timer.is_holding());
        assert!((timer.total_seconds() - 0.2).abs() < 1e-9);

        // Re-confirmation restarts the clock without a stale delta: the gap
        // frame after Started contributes its own small delta only.
        assert_eq!(timer.update(true, ts(0.4)), HoldStep::Started);
        let step = timer.update(true, ts(0.5));
        assert!(matches!(step, HoldStep::Tick { .. }));
        assert!((timer.total_seconds() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn broken_only_fires_when_actively_holding() {
        let mut timer = HoldTimer::new(3);
        timer.update(true, ts(0.0));
        assert_eq!(timer.update(false, ts(0.1)), HoldStep::Idle);
    }

    #[test]
    fn oversized_gap_contributes_zero() {
        let mut timer = HoldTimer::new(1);
        timer.update(true, ts(0.0));
        timer.update(true, ts(0.1));
        assert_eq!(timer.update(true, ts(0.7)), HoldStep::InvalidGap);
        assert!((timer.total_seconds() - 0.1).abs() < 1e-9);
        // The rejected frame still becomes the new reference point.
        let step = timer.update(true, ts(0.8));
        assert!(matches!(step, HoldStep::Tick { .. }));
        assert!((timer.total_seconds() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn non_monotonic_timestamp_contributes_zero() {
        let mut timer = HoldTimer::new(1);
        timer.update(true, ts(1.0));
        timer.update(true, ts(1.1));
        assert_eq!(timer.update(true, ts(0.9)), HoldStep::InvalidGap);
        assert_eq!(timer.update(true, ts(0.9)), HoldStep::InvalidGap);
        assert!((timer.total_seconds() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn suspend_pauses_without_break_verdict() {
        let mut timer = HoldTimer::new(1);
        timer.update(true, ts(0.0));
        timer.update(true, ts(0.1));
        timer.suspend();
        assert!(!timer.is_holding());
        assert!((timer.total_seconds() - 0.1).abs() < 1e-9);

        // Occlusion over: re-confirm, and no delta spans the gap.
        assert_eq!(timer.update(true, ts(5.0)), HoldStep::Started);
        timer.update(true, ts(5.1));
        assert!((timer.total_seconds() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_accumulator_and_reference_timestamp() {
        let mut timer = HoldTimer::new(1);
        timer.update(true, ts(0.0));
        timer.update(true, ts(0.1));
        timer.reset();
        assert_eq!(timer.total_seconds(), 0.0);
        assert!(!timer.is_holding());

        // The next frame must not compute a delta against the stale 0.1.
        assert_eq!(timer.update(true, ts(9.0)), HoldStep::Started);
        assert_eq!(timer.total_seconds(), 0.0);
    }
}
