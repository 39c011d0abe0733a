//! Form-defect feedback types.
//!
//! Each exercise evaluates its defect rules in a fixed priority order and
//! stops at the first rule that fires, so at most one [`FormFeedback`] is
//! active per evaluation. Priority encodes most-actionable-first: a
//! dangerous joint alignment outranks a minor stance note. Rules only run
//! when the exercise's wider form landmark set passes the visibility gate.

use serde::{Deserialize, Serialize};

/// Machine-stable identifier for a detected technique defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCode {
    /// Squat: knees tracking inward relative to the feet.
    KneesCavingIn,
    /// Squat: torso leaning far past vertical.
    BackRounding,
    /// Squat: heels lifting off the floor.
    HeelsLifting,
    /// Push-up: knees resting on the ground (depth proxy).
    KneesOnGround,
    /// Push-up: hips raised above the body line.
    BodyPiking,
    /// Push-up: hips dropped below the body line.
    BodySagging,
    /// Push-up: elbows flaring wide of the torso.
    ElbowsFlaring,
    /// Jumping jack: legs spread but arms not overhead.
    ArmsNotOverhead,
    /// Jumping jack: arms overhead but feet not spread.
    StanceTooNarrow,
    /// Wall slide: wrists drifting away from the wall plane.
    WristsOffWall,
    /// Wall slide: elbows dropping below shoulder height mid-slide.
    ElbowsDropping,
    /// Plank: hips piked above the shoulder–ankle line.
    HipsTooHigh,
    /// Plank: hips sagging below the shoulder–ankle line.
    HipsSagging,
    /// Plank (forearm): elbows not stacked under the shoulders.
    ElbowsNotUnderShoulders,
    /// Plank (straight-arm): wrists not stacked under the shoulders.
    WristsNotUnderShoulders,
}

impl FeedbackCode {
    /// Human-readable corrective message for this defect.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::KneesCavingIn => "Push your knees out over your toes",
            Self::BackRounding => "Keep your chest up and back straight",
            Self::HeelsLifting => "Keep your heels planted on the floor",
            Self::KneesOnGround => "Lift your knees off the ground",
            Self::BodyPiking => "Lower your hips into one straight line",
            Self::BodySagging => "Raise your hips, keep your core tight",
            Self::ElbowsFlaring => "Tuck your elbows closer to your body",
            Self::ArmsNotOverhead => "Swing your arms all the way overhead",
            Self::StanceTooNarrow => "Jump your feet out wider",
            Self::WristsOffWall => "Keep your wrists against the wall",
            Self::ElbowsDropping => "Keep your elbows up at shoulder height",
            Self::HipsTooHigh => "Drop your hips level with your shoulders",
            Self::HipsSagging => "Lift your hips, squeeze your glutes",
            Self::ElbowsNotUnderShoulders => "Stack your elbows under your shoulders",
            Self::WristsNotUnderShoulders => "Stack your wrists under your shoulders",
        }
    }

    /// Stable string code for logs and wire formats.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::KneesCavingIn => "knees_caving_in",
            Self::BackRounding => "back_rounding",
            Self::HeelsLifting => "heels_lifting",
            Self::KneesOnGround => "knees_on_ground",
            Self::BodyPiking => "body_piking",
            Self::BodySagging => "body_sagging",
            Self::ElbowsFlaring => "elbows_flaring",
            Self::ArmsNotOverhead => "arms_not_overhead",
            Self::StanceTooNarrow => "stance_too_narrow",
            Self::WristsOffWall => "wrists_off_wall",
            Self::ElbowsDropping => "elbows_dropping",
            Self::HipsTooHigh => "hips_too_high",
            Self::HipsSagging => "hips_sagging",
            Self::ElbowsNotUnderShoulders => "elbows_not_under_shoulders",
            Self::WristsNotUnderShoulders => "wrists_not_under_shoulders",
        }
    }
}

/// A single active form-correction message.
///
/// The core retains no feedback history; delivery pacing is the session
/// orchestrator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFeedback {
    /// Which defect fired.
    pub code: FeedbackCode,
    /// Corrective message for the user.
    pub message: String,
}

impl FormFeedback {
    /// Creates feedback for a defect code with its standard message.
    #[must_use]
    pub fn new(code: FeedbackCode) -> Self {
        Self {
            code,
            message: code.message().to_owned(),
        }
    }
}
