//! Evaluating fitted segments into polylines.

use crate::{fit::CurveSegment, Point2};

/// Evaluate the cubic at `t`, in `[0, 1]`.
///
/// Bernstein form, so `t == 0.0` is exactly `p0` and `t == 1.0` is exactly `p1`.
#[must_use]
pub fn evaluate_cubic(segment: &CurveSegment, t: f32) -> Point2 {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;

    segment.p0 * (mt2 * mt)
        + segment.c1 * (3.0 * mt2 * t)
        + segment.c2 * (3.0 * mt * t2)
        + segment.p1 * (t2 * t)
}

/// Width at `t`, linearly interpolated between the segment's end widths.
#[must_use]
pub fn evaluate_width(segment: &CurveSegment, t: f32) -> f32 {
    segment.width_start + (segment.width_end - segment.width_start) * t
}

/// `count` evenly spaced parameters from `0.0` to `1.0` inclusive. `count` must be at least 2.
pub(super) fn parameters(count: usize) -> impl Iterator<Item = f32> + Clone {
    let denom = (count - 1) as f32;
    (0..count).map(move |idx| {
        // Hit the far end exactly rather than trusting the division.
        if idx + 1 == count {
            1.0
        } else {
            idx as f32 / denom
        }
    })
}

/// Sample every segment at `samples_per_segment` evenly spaced points, both ends included.
///
/// Shared endpoints of neighboring segments are emitted twice. Fewer than two samples per
/// segment is treated as two.
#[must_use]
pub fn tessellate(segments: &[CurveSegment], samples_per_segment: usize) -> Vec<Point2> {
    let samples_per_segment = samples_per_segment.max(2);
    let mut points = Vec::with_capacity(segments.len() * samples_per_segment);
    for segment in segments {
        points.extend(parameters(samples_per_segment).map(|t| evaluate_cubic(segment, t)));
    }
    points
}
