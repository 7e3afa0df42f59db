//! # Curve fitting
//!
//! Turns the sparse samples of a [`Stroke`] into a chain of cubic Bézier segments, one per
//! consecutive pair of samples. Tangents are estimated Catmull-Rom style from each sample's
//! neighbors, then converted into Bézier control points.

use crate::{stroke::Stroke, Point2};

pub const DEFAULT_TENSION: f32 = 0.5;

/// One cubic Bézier piece between two samples, with the stroke width at either end.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CurveSegment {
    pub p0: Point2,
    pub c1: Point2,
    pub c2: Point2,
    pub p1: Point2,
    pub width_start: f32,
    pub width_end: f32,
}
impl CurveSegment {
    /// A zero-length segment sitting on `point`.
    #[must_use]
    pub fn dot(point: Point2, width: f32) -> Self {
        Self {
            p0: point,
            c1: point,
            c2: point,
            p1: point,
            width_start: width,
            width_end: width,
        }
    }
    /// A segment whose control points lie on the chord, so it traces a straight line.
    #[must_use]
    pub fn line(p0: Point2, p1: Point2, width_start: f32, width_end: f32) -> Self {
        let chord = p1 - p0;
        Self {
            p0,
            c1: p0 + chord / 3.0,
            c2: p0 + chord * (2.0 / 3.0),
            p1,
            width_start,
            width_end,
        }
    }
    /// Distance between the endpoints.
    #[must_use]
    pub fn chord_length(&self) -> f32 {
        (self.p1 - self.p0).mag()
    }
}

/// [`fit`] with [`DEFAULT_TENSION`].
#[must_use]
pub fn fit_default(stroke: &Stroke) -> Vec<CurveSegment> {
    fit(stroke, DEFAULT_TENSION)
}

/// Fit the samples of `stroke` with cubic segments.
///
/// * No samples: no segments.
/// * One sample: a single [`CurveSegment::dot`].
/// * Two samples: a single [`CurveSegment::line`].
/// * Otherwise, `len - 1` segments. `tension` scales the estimated tangents, lower is tighter.
#[must_use]
pub fn fit(stroke: &Stroke, tension: f32) -> Vec<CurveSegment> {
    let samples = stroke.samples();
    let width_of = |idx: usize| samples[idx].pressure * stroke.base_width;

    match samples {
        [] => Vec::new(),
        [only] => vec![CurveSegment::dot(only.position, width_of(0))],
        [a, b] => vec![CurveSegment::line(
            a.position,
            b.position,
            width_of(0),
            width_of(1),
        )],
        _ => {
            let last = samples.len() - 1;
            // Neighbors are clamped at the ends, not wrapped.
            let tangent = |idx: usize| {
                let prev = samples[idx.saturating_sub(1)].position;
                let next = samples[(idx + 1).min(last)].position;
                (next - prev) * tension
            };

            samples
                .windows(2)
                .enumerate()
                .map(|(idx, pair)| {
                    let (p0, p1) = (pair[0].position, pair[1].position);
                    CurveSegment {
                        p0,
                        c1: p0 + tangent(idx) / 3.0,
                        c2: p1 - tangent(idx + 1) / 3.0,
                        p1,
                        width_start: width_of(idx),
                        width_end: width_of(idx + 1),
                    }
                })
                .collect()
        }
    }
}
