//! # Repform Session
//!
//! Session orchestration for the repform exercise-tracking engine.
//!
//! This crate sits between a host application and the per-exercise
//! classifiers in `repform-exercise`:
//!
//! - [`SessionTracker`] owns the active exercise, forwards frames, and
//!   aggregates the rep count and held duration the UI displays.
//! - The **feedback delivery debounce** paces how often a non-empty
//!   [`FormFeedback`](repform_exercise::FormFeedback) is forwarded to
//!   subscribers, so persistent defects do not flood speech or UI channels.
//!   Clearing corrected feedback is never delayed.
//! - [`SharedSession`] wraps the tracker for hosts where the detection
//!   pipeline and UI readers live on different threads: frames apply under
//!   a write lock, readers take cheap [`SessionSnapshot`] copies.
//!
//! # Example
//!
//! ```rust
//! use repform_exercise::{ExerciseConfig, ExerciseKind};
//! use repform_session::{SessionConfig, SessionTracker};
//! use repform_core::{FrameTimestamp, PoseFrame};
//!
//! let mut session = SessionTracker::new(SessionConfig::default())?;
//! session.start(ExerciseKind::Squat, ExerciseConfig::default())?;
//!
//! let update = session.process_frame(&PoseFrame::default(), FrameTimestamp::from_seconds(0.0));
//! assert!(update.event.is_none());
//! assert_eq!(session.snapshot().rep_count, 0);
//! # Ok::<(), repform_core::CoreError>(())
//! ```

#![forbid(unsafe_code)]

pub mod session;
pub mod shared;

pub use session::{SessionConfig, SessionId, SessionSnapshot, SessionTracker, SessionUpdate};
pub use shared::SharedSession;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::session::{
        SessionConfig, SessionId, SessionSnapshot, SessionTracker, SessionUpdate,
    };
    pub use crate::shared::SharedSession;
}
