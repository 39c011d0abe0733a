//! Stateless geometry kernel over 2-D landmark positions.
//!
//! All functions operate on `(x, y)` tuples in normalized image coordinates
//! (y increasing downward) and are pure: no state, no I/O, bounded time.
//!
//! Two joint-angle formulations are exposed. [`joint_angle_deg`] uses the
//! dot-product/arccosine form; [`joint_angle_atan2_deg`] uses
//! `atan2(|cross|, dot)`. Both return unsigned degrees in [0, 180] but are
//! not bit-identical near 0° and 180°, and each exercise's thresholds are
//! tuned against one specific form, so the two are deliberately not unified.
//!
//! Degenerate inputs (a zero-length vector at the angle vertex) yield 0°
//! rather than an error: a single bad frame must never halt the stream.

/// Magnitude below which a vector is treated as zero-length.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Angle in degrees at `vertex` between the rays toward `a` and `c`,
/// via the dot-product/arccosine formula.
///
/// The cosine is clamped to [-1, 1] before `acos` so floating rounding at
/// collinear configurations cannot produce a domain error. Returns 0.0 when
/// either ray is degenerate.
#[must_use]
pub fn joint_angle_deg(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let v1 = (a.0 - vertex.0, a.1 - vertex.1);
    let v2 = (c.0 - vertex.0, c.1 - vertex.1);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < DEGENERATE_EPSILON || mag2 < DEGENERATE_EPSILON {
        return 0.0;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    let cos_angle = (dot / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}

/// Angle in degrees at `vertex` between the rays toward `a` and `c`,
/// via the two-argument-arctangent formula `atan2(|cross|, dot)`.
///
/// Unsigned result in [0, 180]. Returns 0.0 when either ray is degenerate.
#[must_use]
pub fn joint_angle_atan2_deg(a: (f32, f32), vertex: (f32, f32), c: (f32, f32)) -> f32 {
    let v1 = (a.0 - vertex.0, a.1 - vertex.1);
    let v2 = (c.0 - vertex.0, c.1 - vertex.1);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 < DEGENERATE_EPSILON || mag2 < DEGENERATE_EPSILON {
        return 0.0;
    }

    let cross = v1.0 * v2.1 - v1.1 * v2.0;
    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    cross.abs().atan2(dot).to_degrees()
}

/// Euclidean distance between two 2-D points.
#[must_use]
pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    dx.hypot(dy)
}

/// Euclidean distance between two 3-D points.
#[must_use]
pub fn distance_3d(a: (f32, f32, f32), b: (f32, f32, f32)) -> f32 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let dz = b.2 - a.2;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Midpoint of two 2-D points.
#[must_use]
pub fn midpoint(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

/// Vertical offset of `p` from the line through `a` and `b`, evaluated at
/// `p`'s x position.
///
/// Positive means `p` lies below the line in image space (larger y), which
/// for a shoulder→ankle body line reads as hips sagging; negative reads as
/// hips piking. Falls back to the offset from `a`'s height when the line is
/// near-vertical in x, and is insensitive to which way the subject faces.
#[must_use]
pub fn vertical_offset_from_line(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let run = b.0 - a.0;
    if run.abs() < DEGENERATE_EPSILON {
        return p.1 - a.1;
    }
    let t = (p.0 - a.0) / run;
    let line_y = a.1 + (b.1 - a.1) * t;
    p.1 - line_y
}
