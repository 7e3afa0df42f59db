//! # Selection
//!
//! Lasso selection of whole strokes. A stroke is picked up if *any* of its samples falls inside the
//! lasso, so a loop drawn around part of a long stroke is enough to grab it.
//!
//! Lassos and strokes must be in the same (world) space.

use crate::{stroke::Stroke, Point2};

/// A set of indices into a stroke list.
///
/// Only meaningful for the list it was made from - any structural change to that list
/// invalidates it.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Selection(bitvec::vec::BitVec);
impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert(&mut self, index: usize) {
        if index >= self.0.len() {
            self.0.resize(index + 1, false);
        }
        self.0.set(index, true);
    }
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.get(index).is_some_and(|bit| *bit)
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.count_ones()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.not_any()
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }
    /// Selected indices, ascending.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter_ones()
    }
}
impl FromIterator<usize> for Selection {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut selection = Self::new();
        for index in iter {
            selection.insert(index);
        }
        selection
    }
}

/// Even-odd ray cast. The polygon is implicitly closed, and needs at least three vertices to
/// contain anything.
#[must_use]
pub fn point_in_polygon(point: Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    // Walk edges (prev, cur), starting with the closing edge.
    let mut prev = polygon[polygon.len() - 1];
    for &cur in polygon {
        // Does this edge straddle the horizontal through `point`...
        if (cur.y > point.y) != (prev.y > point.y) {
            // ...and cross it to the right of `point`?
            // Straddling guarantees `prev.y != cur.y`.
            let crossing_x = (prev.x - cur.x) * (point.y - cur.y) / (prev.y - cur.y) + cur.x;
            if point.x < crossing_x {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

/// Select every stroke with at least one sample inside `polygon`.
#[must_use]
pub fn select_strokes_in_polygon(strokes: &[Stroke], polygon: &[Point2]) -> Selection {
    if polygon.len() < 3 {
        return Selection::new();
    }
    strokes
        .iter()
        .enumerate()
        .filter(|(_, stroke)| {
            stroke
                .samples()
                .iter()
                .any(|sample| point_in_polygon(sample.position, polygon))
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Shift every sample of every selected stroke by `delta`. Indices past the end are ignored.
pub fn move_selected_strokes(strokes: &mut [Stroke], selection: &Selection, delta: Point2) {
    for idx in selection.iter() {
        if let Some(stroke) = strokes.get_mut(idx) {
            stroke.translate(delta);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{color::Color, stroke::StrokeSample};

    fn triangle() -> [Point2; 3] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ]
    }
    fn stroke_through(points: &[(f32, f32)]) -> Stroke {
        Stroke::from_samples(
            Color::BLACK,
            1.0,
            points
                .iter()
                .map(|&(x, y)| StrokeSample::new(Point2::new(x, y)))
                .collect(),
        )
    }

    #[test]
    fn triangle_containment() {
        let tri = triangle();
        assert!(point_in_polygon(Point2::new(2.0, 2.0), &tri));
        assert!(!point_in_polygon(Point2::new(8.0, 8.0), &tri));
        assert!(!point_in_polygon(Point2::new(-1.0, 1.0), &tri));
        assert!(!point_in_polygon(Point2::new(2.0, -1.0), &tri));
    }
    #[test]
    fn concave() {
        // A "U", opening upwards.
        let u = [
            Point2::new(0.0, 0.0),
            Point2::new(9.0, 0.0),
            Point2::new(9.0, 9.0),
            Point2::new(6.0, 9.0),
            Point2::new(6.0, 3.0),
            Point2::new(3.0, 3.0),
            Point2::new(3.0, 9.0),
            Point2::new(0.0, 9.0),
        ];
        assert!(point_in_polygon(Point2::new(1.0, 6.0), &u));
        assert!(point_in_polygon(Point2::new(7.5, 6.0), &u));
        assert!(point_in_polygon(Point2::new(4.5, 1.5), &u));
        // The notch.
        assert!(!point_in_polygon(Point2::new(4.5, 6.0), &u));
    }
    #[test]
    fn degenerate_polygons_contain_nothing() {
        let origin = Point2::new(0.0, 0.0);
        assert!(!point_in_polygon(origin, &[]));
        assert!(!point_in_polygon(origin, &[origin]));
        assert!(!point_in_polygon(
            origin,
            &[Point2::new(-1.0, -1.0), Point2::new(1.0, 1.0)]
        ));
    }
    #[test]
    fn any_sample_selects() {
        let strokes = [
            // Entirely inside.
            stroke_through(&[(1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]),
            // Entirely outside.
            stroke_through(&[(20.0, 20.0), (30.0, 20.0)]),
            // One sample inside, the rest out.
            stroke_through(&[(-5.0, 1.0), (1.0, 1.0), (50.0, 1.0)]),
            // Empty strokes are never selected.
            stroke_through(&[]),
        ];
        let selection = select_strokes_in_polygon(&strokes, &triangle());
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(selection.len(), 2);
        assert!(selection.contains(2));
        assert!(!selection.contains(1));
        assert!(!selection.contains(100));
    }
    #[test]
    fn move_only_selected() {
        let mut strokes = vec![
            stroke_through(&[(1.0, 1.0), (2.0, 2.0)]),
            stroke_through(&[(5.0, 5.0)]),
            stroke_through(&[(0.5, 0.25), (3.0, 4.0), (-1.0, -1.0)]),
        ];
        let original = strokes.clone();
        let selection: Selection = [0, 2, 40].into_iter().collect();
        let delta = Point2::new(1.5, -2.0);
        move_selected_strokes(&mut strokes, &selection, delta);

        assert_eq!(strokes[1], original[1]);
        for idx in [0, 2] {
            for (moved, was) in strokes[idx].samples().iter().zip(original[idx].samples()) {
                assert_eq!(moved.position, was.position + delta);
            }
        }
    }
    #[test]
    fn empty_selection_moves_nothing() {
        let mut strokes = vec![stroke_through(&[(1.0, 1.0)])];
        let original = strokes.clone();
        move_selected_strokes(&mut strokes, &Selection::new(), Point2::new(3.0, 3.0));
        assert_eq!(strokes, original);
    }
    #[test]
    fn selection_set() {
        let mut selection = Selection::new();
        assert!(selection.is_empty());
        selection.insert(5);
        selection.insert(1);
        selection.insert(5);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![1, 5]);
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.len(), 0);
    }
}
