//! Triangle strip geometry for a fitted stroke.
//!
//! The strip is laid out so that a whole stroke, caps included, is drawn in a single
//! `TRIANGLE_STRIP` draw. Caps are fans of `(center, rim)` pairs, glued onto the body with
//! repeated vertices which only form zero-area triangles.

use super::curve::{evaluate_cubic, evaluate_width, parameters};
use crate::{fit::CurveSegment, Point2};

/// A lone segment shorter than this is drawn as a dot.
pub const DOT_EPSILON: f32 = 1e-3;
/// Centerline differences shorter than this have no reliable direction.
pub const TANGENT_EPSILON: f32 = 1e-4;

/// How wide the strip is along its length.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Default,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
)]
pub enum WidthPolicy {
    /// The stroke's base width everywhere. Pressure is ignored.
    #[default]
    Uniform,
    /// Follow the fitted segment widths, so pressure thins and thickens the stroke.
    Pressure,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StripSettings {
    /// Centerline points evaluated per fitted segment. At least 2.
    pub samples_per_segment: usize,
    /// Rim steps of each round end cap. At least 3.
    pub cap_segments: usize,
    /// Rim steps of the disc drawn for single-point strokes. At least 3.
    pub disc_segments: usize,
    pub width: WidthPolicy,
}
impl Default for StripSettings {
    fn default() -> Self {
        Self {
            samples_per_segment: 20,
            cap_segments: 16,
            disc_segments: 32,
            width: WidthPolicy::Uniform,
        }
    }
}
impl StripSettings {
    /// Raise every count to its minimum.
    #[must_use = "returns a new instance without modifying `self`"]
    pub fn sanitized(self) -> Self {
        Self {
            samples_per_segment: self.samples_per_segment.max(2),
            cap_segments: self.cap_segments.max(3),
            disc_segments: self.disc_segments.max(3),
            width: self.width,
        }
    }
    /// Number of vertices of a dot.
    #[must_use]
    pub fn dot_len(&self) -> usize {
        let this = self.sanitized();
        fan_len(this.disc_segments)
    }
    /// Number of vertices of a capped strip over `segments` fitted segments.
    #[must_use]
    pub fn body_len(&self, segments: usize) -> usize {
        let this = self.sanitized();
        let centers = segments * this.samples_per_segment;
        // Two fans, two bridge vertices into the body, three out of it.
        2 * fan_len(this.cap_segments) + 2 + 2 * centers + 3
    }
}

fn fan_len(rim_steps: usize) -> usize {
    (rim_steps + 1) * 2
}

/// Push a closed fan around `center` as `(center, rim)` pairs, starting and ending at angle 0.
fn push_fan(into: &mut Vec<Point2>, center: Point2, radius: f32, rim_steps: usize) {
    into.reserve(fan_len(rim_steps));
    for step in 0..=rim_steps {
        let angle = std::f32::consts::TAU * step as f32 / rim_steps as f32;
        let (sin, cos) = angle.sin_cos();
        into.push(center);
        into.push(center + Point2::new(cos, sin) * radius);
    }
}

/// `true` if these segments should be drawn as a dot rather than a capped line.
#[must_use]
pub fn is_dot(segments: &[CurveSegment]) -> bool {
    matches!(segments, [only] if only.chord_length() < DOT_EPSILON)
}

/// Build the triangle strip for a fitted stroke. See [`build_strip_into`].
#[must_use]
pub fn build_strip(
    segments: &[CurveSegment],
    base_width: f32,
    settings: &StripSettings,
) -> Vec<Point2> {
    let mut vertices = Vec::new();
    build_strip_into(segments, base_width, settings, &mut vertices);
    vertices
}

/// Append the triangle strip for a fitted stroke onto `into`.
///
/// * No segments: nothing.
/// * A single segment shorter than [`DOT_EPSILON`]: a filled disc.
/// * Otherwise: start cap, body, end cap, as one continuous strip.
pub fn build_strip_into(
    segments: &[CurveSegment],
    base_width: f32,
    settings: &StripSettings,
    into: &mut Vec<Point2>,
) {
    let settings = settings.sanitized();
    let uniform_half = base_width * 0.5;

    let Some(first) = segments.first() else {
        return;
    };
    if is_dot(segments) {
        let radius = match settings.width {
            WidthPolicy::Uniform => uniform_half,
            WidthPolicy::Pressure => first.width_start * 0.5,
        };
        push_fan(into, first.p0, radius, settings.disc_segments);
        return;
    }

    // Centerline, with the half-width at each point.
    let (centers, half_widths): (Vec<Point2>, Vec<f32>) = segments
        .iter()
        .flat_map(|segment| {
            parameters(settings.samples_per_segment).map(move |t| {
                let half = match settings.width {
                    WidthPolicy::Uniform => uniform_half,
                    WidthPolicy::Pressure => evaluate_width(segment, t) * 0.5,
                };
                (evaluate_cubic(segment, t), half)
            })
        })
        .unzip();

    let (&start, &end) = match (centers.first(), centers.last()) {
        (Some(start), Some(end)) if centers.len() >= 2 => (start, end),
        // Unreachable with sanitized settings, but a lone point is still a dot.
        _ => {
            push_fan(into, first.p0, uniform_half, settings.disc_segments);
            return;
        }
    };
    let last = centers.len() - 1;

    let normals: Vec<Point2> = (0..centers.len())
        .map(|idx| {
            let diff = if idx == 0 {
                centers[1] - centers[0]
            } else if idx == last {
                centers[last] - centers[last - 1]
            } else {
                centers[idx + 1] - centers[idx - 1]
            };
            let len = diff.mag();
            let tangent = if len > TANGENT_EPSILON {
                diff / len
            } else {
                // No direction to speak of, pick +X.
                Point2::new(1.0, 0.0)
            };
            // Rotate a quarter turn counterclockwise.
            Point2::new(-tangent.y, tangent.x)
        })
        .collect();

    into.reserve(settings.body_len(segments.len()));

    push_fan(into, start, half_widths[0], settings.cap_segments);

    let start_left = start - normals[0] * half_widths[0];
    into.push(start_left);
    into.push(start_left);

    for ((&center, &normal), &half) in centers.iter().zip(&normals).zip(&half_widths) {
        into.push(center - normal * half);
        into.push(center + normal * half);
    }

    let end_right = end + normals[last] * half_widths[last];
    into.push(end_right);
    into.push(end_right);
    into.push(end);

    push_fan(into, end, half_widths[last], settings.cap_segments);
}
