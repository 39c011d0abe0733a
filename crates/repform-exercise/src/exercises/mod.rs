//! One classifier module per exercise family.
//!
//! Count-based trackers (squat, push-up, jumping jack, wall slide) classify
//! each frame into a candidate [`crate::RepPhase`] and feed it to their
//! [`crate::RepMachine`]; the plank feeds a per-frame form verdict to its
//! [`crate::HoldTimer`]. Every tracker declares its own required-landmark
//! sets: a narrow one gating repetition/hold classification and a wider one
//! gating form rules.

pub mod jumping_jack;
pub mod plank;
pub mod pushup;
pub mod squat;
pub mod wall_slide;

use repform_core::geometry::midpoint;
use repform_core::{BodyPoint, PoseFrame};

/// 2-D position of a landmark, if the frame delivered it.
pub(crate) fn point(frame: &PoseFrame, role: BodyPoint) -> Option<(f32, f32)> {
    frame.get(role).map(repform_core::Landmark::position_2d)
}

/// Midpoint of a left/right landmark pair.
pub(crate) fn pair_midpoint(
    frame: &PoseFrame,
    left: BodyPoint,
    right: BodyPoint,
) -> Option<(f32, f32)> {
    Some(midpoint(point(frame, left)?, point(frame, right)?))
}

#[cfg(test)]
pub(crate) mod testing {
    //! Synthetic-frame builders shared by the classifier unit tests.

    use repform_core::{BodyPoint, Confidence, Landmark, PoseFrame, NUM_BODY_POINTS};

    /// A frame with every landmark fully visible at (0.5, 0.5), overridden
    /// at the listed roles.
    pub(crate) fn frame_with(points: &[(BodyPoint, (f32, f32))]) -> PoseFrame {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, Confidence::MAX); NUM_BODY_POINTS];
        for (role, (x, y)) in points {
            landmarks[*role as usize] = Landmark::new(*x, *y, Confidence::MAX);
        }
        PoseFrame::from_landmarks(landmarks)
    }

    /// Sets one landmark's visibility on an existing frame.
    pub(crate) fn with_visibility(frame: &PoseFrame, role: BodyPoint, visibility: f32) -> PoseFrame {
        let mut landmarks: Vec<Landmark> = (0u8..NUM_BODY_POINTS as u8)
            .map(|i| *frame.get(BodyPoint::try_from(i).unwrap()).unwrap())
            .collect();
        landmarks[role as usize].visibility = Confidence::new(visibility).unwrap();
        PoseFrame::from_landmarks(landmarks)
    }

    /// Rotates the unit ray `vertex→anchor` by `angle_deg` and returns the
    /// point at `radius` along the rotated ray. Both angle formulas measure
    /// exactly `angle_deg` between `anchor`, `vertex`, and the result.
    pub(crate) fn point_at_angle(
        vertex: (f32, f32),
        anchor: (f32, f32),
        angle_deg: f32,
        radius: f32,
    ) -> (f32, f32) {
        let dx = anchor.0 - vertex.0;
        let dy = anchor.1 - vertex.1;
        let len = (dx * dx + dy * dy).sqrt();
        let (ux, uy) = (dx / len, dy / len);
        let rad = angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let dir = (ux * cos + uy * sin, -ux * sin + uy * cos);
        (vertex.0 + dir.0 * radius, vertex.1 + dir.1 * radius)
    }
}
