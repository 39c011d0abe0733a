//! Core data types for the repform exercise-tracking engine.
//!
//! This module defines the fundamental data structures used throughout the
//! repform ecosystem for representing detected body landmarks, pose frames,
//! and frame timing.
//!
//! # Type Categories
//!
//! - **Landmark Types**: [`Landmark`], [`BodyPoint`], [`PoseFrame`]
//! - **Common Types**: [`Confidence`], [`FrameTimestamp`]

use ndarray::Array1;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::{DEFAULT_VISIBILITY_THRESHOLD, NUM_BODY_POINTS};

// =============================================================================
// Common Types
// =============================================================================

/// Confidence score in the range [0.0, 1.0].
///
/// Used as the per-landmark visibility score delivered by the external pose
/// estimator. A landmark with no reported score defaults to zero, which the
/// visibility gate treats as not visible.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Confidence(f32);

impl Confidence {
    /// Creates a new confidence value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range [0.0, 1.0].
    pub fn new(value: f32) -> CoreResult<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::validation(format!(
                "Confidence must be in [0.0, 1.0], got {value}"
            )));
        }
        Ok(Self(value))
    }

    /// Creates a confidence value without validation (for internal use).
    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn new_unchecked(value: f32) -> Self {
        debug_assert!((0.0..=1.0).contains(&value));
        Self(value)
    }

    /// Returns the raw confidence value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.0
    }

    /// Returns `true` if the confidence exceeds the default threshold.
    #[must_use]
    pub fn is_high(&self) -> bool {
        self.0 >= DEFAULT_VISIBILITY_THRESHOLD
    }

    /// Returns `true` if the confidence meets the given threshold.
    #[must_use]
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.0 >= threshold
    }

    /// Maximum confidence (1.0).
    pub const MAX: Self = Self(1.0);

    /// Minimum confidence (0.0).
    pub const MIN: Self = Self(0.0);
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

/// Monotonic frame timestamp in seconds.
///
/// The origin is arbitrary (whatever clock the detection pipeline uses);
/// only differences between timestamps are meaningful. The core never reads
/// a wall clock for frame timing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameTimestamp(f64);

impl FrameTimestamp {
    /// Creates a timestamp from seconds since an arbitrary origin.
    #[must_use]
    pub fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    /// Returns the timestamp in seconds.
    #[must_use]
    pub fn seconds(&self) -> f64 {
        self.0
    }

    /// Returns the signed duration since `earlier`, in seconds.
    ///
    /// Negative when the clock went backwards; callers decide how to treat
    /// non-monotonic input.
    #[must_use]
    pub fn duration_since(&self, earlier: Self) -> f64 {
        self.0 - earlier.0
    }
}

// =============================================================================
// Landmark Types
// =============================================================================

/// Body-point roles following the BlazePose 33-point topology.
///
/// The discriminant is the landmark index delivered by the pose estimator;
/// the index→role mapping is fixed for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum BodyPoint {
    /// Nose
    Nose = 0,
    /// Left eye (inner)
    LeftEyeInner = 1,
    /// Left eye
    LeftEye = 2,
    /// Left eye (outer)
    LeftEyeOuter = 3,
    /// Right eye (inner)
    RightEyeInner = 4,
    /// Right eye
    RightEye = 5,
    /// Right eye (outer)
    RightEyeOuter = 6,
    /// Left ear
    LeftEar = 7,
    /// Right ear
    RightEar = 8,
    /// Left mouth corner
    MouthLeft = 9,
    /// Right mouth corner
    MouthRight = 10,
    /// Left shoulder
    LeftShoulder = 11,
    /// Right shoulder
    RightShoulder = 12,
    /// Left elbow
    LeftElbow = 13,
    /// Right elbow
    RightElbow = 14,
    /// Left wrist
    LeftWrist = 15,
    /// Right wrist
    RightWrist = 16,
    /// Left pinky knuckle
    LeftPinky = 17,
    /// Right pinky knuckle
    RightPinky = 18,
    /// Left index knuckle
    LeftIndex = 19,
    /// Right index knuckle
    RightIndex = 20,
    /// Left thumb knuckle
    LeftThumb = 21,
    /// Right thumb knuckle
    RightThumb = 22,
    /// Left hip
    LeftHip = 23,
    /// Right hip
    RightHip = 24,
    /// Left knee
    LeftKnee = 25,
    /// Right knee
    RightKnee = 26,
    /// Left ankle
    LeftAnkle = 27,
    /// Right ankle
    RightAnkle = 28,
    /// Left heel
    LeftHeel = 29,
    /// Right heel
    RightHeel = 30,
    /// Left foot index (toe)
    LeftFootIndex = 31,
    /// Right foot index (toe)
    RightFootIndex = 32,
}

impl BodyPoint {
    /// Returns all body points in index order.
    #[must_use]
    pub fn all() -> &'static [Self; NUM_BODY_POINTS] {
        &[
            Self::Nose,
            Self::LeftEyeInner,
            Self::LeftEye,
            Self::LeftEyeOuter,
            Self::RightEyeInner,
            Self::RightEye,
            Self::RightEyeOuter,
            Self::LeftEar,
            Self::RightEar,
            Self::MouthLeft,
            Self::MouthRight,
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftPinky,
            Self::RightPinky,
            Self::LeftIndex,
            Self::RightIndex,
            Self::LeftThumb,
            Self::RightThumb,
            Self::LeftHip,
            Self::RightHip,
            Self::LeftKnee,
            Self::RightKnee,
            Self::LeftAnkle,
            Self::RightAnkle,
            Self::LeftHeel,
            Self::RightHeel,
            Self::LeftFootIndex,
            Self::RightFootIndex,
        ]
    }

    /// Returns the body-point name as a string.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }

    /// Returns `true` if this is a face landmark.
    #[must_use]
    pub fn is_face(&self) -> bool {
        (*self as u8) <= Self::MouthRight as u8
    }

    /// Returns `true` if this is an upper-body landmark (shoulders to hands).
    #[must_use]
    pub fn is_upper_body(&self) -> bool {
        let idx = *self as u8;
        idx >= Self::LeftShoulder as u8 && idx <= Self::RightThumb as u8
    }

    /// Returns `true` if this is a lower-body landmark (hips to toes).
    #[must_use]
    pub fn is_lower_body(&self) -> bool {
        (*self as u8) >= Self::LeftHip as u8
    }
}

impl TryFrom<u8> for BodyPoint {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BodyPoint::all()
            .get(value as usize)
            .copied()
            .ok_or_else(|| CoreError::validation(format!("Invalid body-point index: {value}")))
    }
}

/// A single detected body landmark in normalized image coordinates.
///
/// Coordinates are in [0, 1] with y increasing downward. The optional z is a
/// relative depth proxy (smaller = closer to the camera) and is only used by
/// checks that explicitly need depth. Immutable once delivered.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Landmark {
    /// X coordinate (normalized 0.0-1.0)
    pub x: f32,
    /// Y coordinate (normalized 0.0-1.0, increasing downward)
    pub y: f32,
    /// Relative depth, if the estimator provides one
    pub z: Option<f32>,
    /// Detection confidence / visibility score
    pub visibility: Confidence,
}

impl Landmark {
    /// Creates a new 2D landmark.
    #[must_use]
    pub fn new(x: f32, y: f32, visibility: Confidence) -> Self {
        Self {
            x,
            y,
            z: None,
            visibility,
        }
    }

    /// Creates a new landmark with a depth estimate.
    #[must_use]
    pub fn new_3d(x: f32, y: f32, z: f32, visibility: Confidence) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            visibility,
        }
    }

    /// Returns `true` if this landmark meets the given visibility threshold.
    #[must_use]
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility.exceeds(threshold)
    }

    /// Returns the 2D position as a tuple.
    #[must_use]
    pub fn position_2d(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Returns the 3D position as a tuple, if depth is available.
    #[must_use]
    pub fn position_3d(&self) -> Option<(f32, f32, f32)> {
        self.z.map(|z| (self.x, self.y, z))
    }
}

/// One frame of detected body landmarks, indexed by [`BodyPoint`].
///
/// A frame may hold fewer entries than the full role set; lookups past the
/// delivered range yield `None`, which every consumer treats as "not
/// visible" rather than an error.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Creates a frame from landmarks in [`BodyPoint`] index order.
    #[must_use]
    pub fn from_landmarks(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Gets a landmark by role; `None` when the frame has no entry for it.
    #[must_use]
    pub fn get(&self, point: BodyPoint) -> Option<&Landmark> {
        self.landmarks.get(point as usize)
    }

    /// Returns the number of delivered landmarks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Returns `true` if the frame holds no landmarks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Returns `true` if every listed role is present and meets `threshold`.
    ///
    /// Fails closed: a missing or low-confidence required role makes the
    /// whole predicate false.
    #[must_use]
    pub fn all_visible(&self, roles: &[BodyPoint], threshold: f32) -> bool {
        roles
            .iter()
            .all(|role| self.get(*role).is_some_and(|lm| lm.is_visible(threshold)))
    }

    /// Returns the number of landmarks meeting the given threshold.
    #[must_use]
    pub fn visible_count(&self, threshold: f32) -> usize {
        self.landmarks
            .iter()
            .filter(|lm| lm.is_visible(threshold))
            .count()
    }

    /// Converts the frame to a flat array `[x0, y0, vis0, x1, y1, vis1, ...]`
    /// over the full role set, zero-filled for missing entries.
    #[must_use]
    pub fn to_flat_array(&self) -> Array1<f32> {
        let mut arr = Array1::zeros(NUM_BODY_POINTS * 3);
        for (i, lm) in self.landmarks.iter().enumerate().take(NUM_BODY_POINTS) {
            arr[i * 3] = lm.x;
            arr[i * 3 + 1] = lm.y;
            arr[i * 3 + 2] = lm.visibility.value();
        }
        arr
    }
}
