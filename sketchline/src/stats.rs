use sketchline_core::{Point2, Stroke, StrokeSink};

/// A stand-in renderer which only tallies what it would have uploaded.
#[derive(Clone, Copy, Default, Debug)]
pub struct StatsSink {
    pub strips: usize,
    pub vertices: usize,
    /// Longest single strip.
    pub largest: usize,
}
impl StatsSink {
    #[must_use]
    pub fn vertex_bytes(&self) -> usize {
        self.vertices * std::mem::size_of::<Point2>()
    }
}
impl StrokeSink for StatsSink {
    fn draw_strip(&mut self, _: &Stroke, vertices: &[Point2]) {
        self.strips += 1;
        self.vertices += vertices.len();
        self.largest = self.largest.max(vertices.len());
    }
}
impl std::fmt::Display for StatsSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} strips, {} vertices ({}), largest {}",
            self.strips,
            self.vertices,
            human_bytes::human_bytes(self.vertex_bytes() as f64),
            self.largest,
        )
    }
}
