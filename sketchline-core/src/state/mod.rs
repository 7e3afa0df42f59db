//! # Canvas state
//!
//! The canvas owns every committed stroke, the stroke currently being drawn, the lasso selection,
//! and the undo history of the committed strokes. It is a plain value - hosts construct one per
//! open document and pass it wherever it's needed. Hosts which must touch it from several threads
//! should put the whole thing behind one lock.

pub mod selection;

pub use selection::Selection;

use crate::{
    color::Color,
    history::HistoryManager,
    stroke::{Stroke, StrokeSample},
    tess::StrokeTessellator,
    Point2,
};

/// The external renderer, as far as the canvas is concerned.
pub trait StrokeSink {
    /// Draw `vertices` as one triangle strip, filled with `stroke.color`.
    fn draw_strip(&mut self, stroke: &Stroke, vertices: &[Point2]);
}
impl<Sink: StrokeSink> StrokeSink for &mut Sink {
    fn draw_strip(&mut self, stroke: &Stroke, vertices: &[Point2]) {
        (**self).draw_strip(stroke, vertices);
    }
}

#[derive(Clone, Debug, Default)]
pub struct CanvasState {
    /// In z-order, first is bottom-most.
    strokes: Vec<Stroke>,
    /// Never a member of `strokes`.
    current: Option<Stroke>,
    /// Indices into `strokes`. Cleared on every structural change of `strokes`.
    selection: Selection,
    history: HistoryManager,
}
// Stroke lifecycle
impl CanvasState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// A canvas which remembers at most `capacity` history snapshots.
    #[must_use]
    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            history: HistoryManager::with_capacity(capacity),
            ..Self::default()
        }
    }
    /// Start a new stroke, dropping any unfinished one.
    pub fn begin_stroke(&mut self, color: Color, width: f32) {
        let width = if width.is_finite() && width > 0.0 {
            width
        } else {
            log::warn!("Invalid stroke width {width}, using {}", Stroke::DEFAULT_WIDTH);
            Stroke::DEFAULT_WIDTH
        };
        if self.current.as_ref().is_some_and(|stroke| !stroke.is_empty()) {
            log::debug!("Discarding unfinished stroke");
        }
        self.current = Some(Stroke::new(color, width));
    }
    /// Append to the current stroke. Does nothing when not drawing.
    pub fn add_point(&mut self, sample: StrokeSample) {
        if let Some(current) = self.current.as_mut() {
            current.push(sample);
        }
    }
    /// Commit the current stroke, if it has any samples. Drawing stops either way.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.current.take() else {
            return;
        };
        if stroke.is_empty() {
            return;
        }
        self.strokes.push(stroke);
        self.record();
    }
    /// Remove every stroke. This is itself an undoable edit.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
        self.selection.clear();
        self.record();
    }
    fn record(&mut self) {
        self.history.seed_empty();
        self.history.snapshot(&self.strokes);
    }
}
// Queries
impl CanvasState {
    #[must_use]
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }
    #[must_use]
    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }
    #[must_use]
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }
    #[must_use]
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }
}
// History
impl CanvasState {
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
    /// Returns `true` if the strokes changed.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        let snapshot = snapshot.to_vec();
        self.adopt(snapshot);
        true
    }
    /// Returns `true` if the strokes changed.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        let snapshot = snapshot.to_vec();
        self.adopt(snapshot);
        true
    }
    fn adopt(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
        self.selection.clear();
    }
    /// Replace every stroke with `strokes` and start history afresh from there.
    ///
    /// Any unfinished stroke and the selection are dropped, as are strokes with no samples.
    pub fn replace_strokes(&mut self, mut strokes: Vec<Stroke>) {
        let before = strokes.len();
        strokes.retain(|stroke| !stroke.is_empty());
        if strokes.len() != before {
            log::warn!("Dropped {} empty strokes", before - strokes.len());
        }
        self.history.reset_to(&strokes);
        self.strokes = strokes;
        self.current = None;
        self.selection.clear();
    }
}
// Persistence
impl CanvasState {
    /// Replace the whole canvas with the strokes read from `reader`.
    ///
    /// On error the canvas is left exactly as it was.
    pub fn load_from(&mut self, reader: impl std::io::Read) -> Result<(), crate::io::ReadError> {
        let strokes = crate::io::read_from(reader)?;
        log::info!("Loaded {} strokes", strokes.len());
        self.replace_strokes(strokes);
        Ok(())
    }
    /// Write the committed strokes into `writer`. The stroke being drawn is not included.
    pub fn save_into(&self, writer: impl std::io::Write) -> Result<(), crate::io::WriteError> {
        crate::io::write_into(&self.strokes, writer)
    }
}
// Selection
impl CanvasState {
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }
    /// Replace the selection with the strokes touched by `polygon`. Returns how many were selected.
    pub fn select_in_polygon(&mut self, polygon: &[Point2]) -> usize {
        self.selection = selection::select_strokes_in_polygon(&self.strokes, polygon);
        let count = self.selection.len();
        log::debug!("Lasso selected {count} of {} strokes", self.strokes.len());
        count
    }
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }
    /// Translate the selected strokes. Not recorded in history by itself.
    pub fn move_selected(&mut self, delta: Point2) {
        selection::move_selected_strokes(&mut self.strokes, &self.selection, delta);
    }
}
// Rendering
impl CanvasState {
    /// Tessellate every committed stroke bottom to top, then the stroke being drawn, handing
    /// each to `sink` as its own strip.
    pub fn render<Tess, Sink>(&self, tessellator: &Tess, mut sink: Sink)
    where
        Tess: StrokeTessellator + ?Sized,
        Sink: StrokeSink,
    {
        let mut vertices = Vec::new();
        let in_progress = self.current.iter().filter(|stroke| !stroke.is_empty());
        for stroke in self.strokes.iter().chain(in_progress) {
            vertices.clear();
            tessellator.tessellate(stroke, &mut vertices);
            sink.draw_strip(stroke, &vertices);
        }
    }
}
