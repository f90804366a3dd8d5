//! Live seed points with bounds clamping and a cyclic selection cursor.
use crate::types::{Bounds, Point};

/// Ordered seeds of one session. Every stored point lies inside the pixel grid.
///
/// Order is the insertion order of the initial detection and only matters for
/// [`SeedSet::select_next`]. An empty set is valid; it simply has no selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedSet {
    bounds: Bounds,
    points: Vec<Point>,
    selected: Option<usize>,
}

impl SeedSet {
    /// Clamp `points` into `bounds`; the first seed (if any) starts selected.
    pub fn new(points: impl IntoIterator<Item = Point>, bounds: Bounds) -> Self {
        let points: Vec<Point> = points.into_iter().map(|p| bounds.clamp(p)).collect();
        let selected = (!points.is_empty()).then_some(0);
        Self {
            bounds,
            points,
            selected,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Index of the selected seed, `None` for an empty set.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_point(&self) -> Option<Point> {
        self.selected.and_then(|i| self.get(i))
    }

    /// Select `index`; returns `false` (and keeps the selection) when out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.points.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Advance the selection by one, wrapping from the last seed to the first.
    pub fn select_next(&mut self) -> Option<usize> {
        let n = self.points.len();
        self.selected = match self.selected {
            _ if n == 0 => None,
            Some(i) => Some((i + 1) % n),
            None => Some(0),
        };
        self.selected
    }

    /// Translate seed `index` by `(dx, dy)` and clamp it back into bounds.
    /// Returns `false` when `index` is out of range.
    pub fn move_seed(&mut self, index: usize, dx: f32, dy: f32) -> bool {
        let bounds = self.bounds;
        match self.points.get_mut(index) {
            Some(p) => {
                *p = bounds.clamp(Point::new(p.x + dx, p.y + dy));
                true
            }
            None => false,
        }
    }

    /// [`move_seed`](Self::move_seed) applied to the current selection.
    pub fn move_selected(&mut self, dx: f32, dy: f32) -> bool {
        match self.selected {
            Some(i) => self.move_seed(i, dx, dy),
            None => false,
        }
    }

    /// Replace every seed, clamping on entry. The count must stay the same so
    /// the selection remains meaningful; extra or missing points are ignored.
    pub fn replace_points(&mut self, points: &[Point]) {
        let bounds = self.bounds;
        for (dst, src) in self.points.iter_mut().zip(points) {
            *dst = bounds.clamp(*src);
        }
    }
}
