//! # Strokes
//!
//! A stroke is one pen-down to pen-up gesture: an ordered list of samples, plus the color and
//! width it was drawn with.

use crate::{color::Color, Point2};

/// A single timestamped pointer observation, in world space.
///
/// Layout matches the sample record of the document format, field for field.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct StrokeSample {
    pub position: Point2,
    /// Normalized pressure, `[0, 1]`.
    pub pressure: f32,
    /// Signed normalized tilt, `[-1, 1]`. Positive X is to the right.
    pub tilt_x: f32,
    /// Signed normalized tilt, `[-1, 1]`. Positive Y is towards the user.
    pub tilt_y: f32,
    /// Seconds from an arbitrary start moment. Non-decreasing within a stroke.
    pub timestamp: f32,
}
impl StrokeSample {
    /// A sample at `position` with full pressure, no tilt, at time zero.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            pressure: 1.0,
            tilt_x: 0.0,
            tilt_y: 0.0,
            timestamp: 0.0,
        }
    }
    #[must_use = "returns a new sample and does not modify `self`"]
    pub fn with_pressure(self, pressure: f32) -> Self {
        Self { pressure, ..self }
    }
    #[must_use = "returns a new sample and does not modify `self`"]
    pub fn with_tilt(self, tilt_x: f32, tilt_y: f32) -> Self {
        Self {
            tilt_x,
            tilt_y,
            ..self
        }
    }
    #[must_use = "returns a new sample and does not modify `self`"]
    pub fn with_timestamp(self, timestamp: f32) -> Self {
        Self { timestamp, ..self }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Stroke {
    /// Insertion order is temporal order.
    samples: Vec<StrokeSample>,
    pub color: Color,
    /// Width in world units at full pressure. Always `> 0` for strokes made through a canvas.
    pub base_width: f32,
}
impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::default(), Self::DEFAULT_WIDTH)
    }
}
impl Stroke {
    pub const DEFAULT_WIDTH: f32 = 2.0;
    /// Create an empty stroke. Empty strokes are only ever in-progress.
    #[must_use]
    pub fn new(color: Color, base_width: f32) -> Self {
        Self {
            samples: Vec::new(),
            color,
            base_width,
        }
    }
    /// Create a stroke from already-collected samples.
    #[must_use]
    pub fn from_samples(color: Color, base_width: f32, samples: Vec<StrokeSample>) -> Self {
        Self {
            samples,
            color,
            base_width,
        }
    }
    pub fn push(&mut self, sample: StrokeSample) {
        self.samples.push(sample);
    }
    #[must_use]
    pub fn samples(&self) -> &[StrokeSample] {
        &self.samples
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    /// Shift every sample position by `delta`.
    pub fn translate(&mut self, delta: Point2) {
        for sample in &mut self.samples {
            sample.position += delta;
        }
    }
}
