//! # Tessellator
//! The tessellator is the component responsible for converting strokes into renderable geometry.
//! This is done via the `StrokeTessellator` trait. Currently, this is implemented by fitting
//! cubic segments through the samples and expanding their centerline into a single capped
//! triangle strip, which a renderer can draw with one `TRIANGLE_STRIP` call per stroke.
pub mod curve;
pub mod strip;

pub use curve::{evaluate_cubic, evaluate_width, tessellate};
pub use strip::{build_strip, build_strip_into, StripSettings, WidthPolicy};

use crate::{fit, stroke::Stroke, Point2};

pub trait StrokeTessellator {
    /// Append the triangle strip vertices of this stroke onto `into`.
    fn tessellate(&self, stroke: &Stroke, into: &mut Vec<Point2>);
    /// Exact number of vertices [`Self::tessellate`] would append for this stroke.
    fn num_vertices_of(&self, stroke: &Stroke) -> usize;
    /// Exact number of vertices for all strokes.
    fn num_vertices_of_slice(&self, strokes: &[Stroke]) -> usize {
        strokes.iter().map(|s| self.num_vertices_of(s)).sum()
    }
}

/// Fit, sample, and widen into a capped strip.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct StripTessellator {
    /// Tangent scale handed to [`fit::fit`].
    pub tension: f32,
    pub settings: StripSettings,
}
impl Default for StripTessellator {
    fn default() -> Self {
        Self {
            tension: fit::DEFAULT_TENSION,
            settings: StripSettings::default(),
        }
    }
}
impl StrokeTessellator for StripTessellator {
    fn tessellate(&self, stroke: &Stroke, into: &mut Vec<Point2>) {
        let segments = fit::fit(stroke, self.tension);
        build_strip_into(&segments, stroke.base_width, &self.settings, into);
    }
    fn num_vertices_of(&self, stroke: &Stroke) -> usize {
        // Mirrors the shape of `fit`, without doing the fitting.
        match stroke.samples() {
            [] => 0,
            [_] => self.settings.dot_len(),
            [a, b] if (b.position - a.position).mag() < strip::DOT_EPSILON => {
                self.settings.dot_len()
            }
            samples => self.settings.body_len(samples.len() - 1),
        }
    }
}
