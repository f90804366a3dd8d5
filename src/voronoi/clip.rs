//! Convex ring clipping against the perpendicular bisector of two sites.
//!
//! Rings are stored as parallel vertex / source arrays: `src[k]` describes the
//! edge `pts[k] → pts[k+1]` (cyclic). Clipping keeps the half-plane closer to
//! `site` and tags the newly created edge with the neighbour it came from.

use super::EdgeSource;

/// Tolerance on the signed bisector value (px²). Points on the bisector are
/// kept by both sides so neighbouring cells share their boundary exactly.
const SIDE_EPS: f64 = 1e-9;
/// Vertices closer than this (px) are merged.
const MERGE_EPS: f64 = 1e-9;

#[derive(Clone, Debug, Default)]
pub(crate) struct Ring {
    pub pts: Vec<[f64; 2]>,
    pub src: Vec<EdgeSource>,
}

impl Ring {
    /// Axis-aligned rectangle `[0, w] × [0, h]`, wound so that interior points
    /// have a positive cross product against every edge (y pointing down).
    pub fn rect(w: f64, h: f64) -> Self {
        Self {
            pts: vec![[0.0, 0.0], [w, 0.0], [w, h], [0.0, h]],
            src: vec![EdgeSource::Border; 4],
        }
    }

    pub fn len(&self) -> usize {
        self.pts.len()
    }

    pub fn is_degenerate(&self) -> bool {
        self.pts.len() < 3
    }

    /// Largest distance from `c` to any vertex.
    pub fn radius_from(&self, c: [f64; 2]) -> f64 {
        self.pts
            .iter()
            .map(|p| ((p[0] - c[0]).powi(2) + (p[1] - c[1]).powi(2)).sqrt())
            .fold(0.0, f64::max)
    }

    fn push(&mut self, p: [f64; 2], src: EdgeSource) {
        if let Some(last) = self.pts.last() {
            if near(*last, p) {
                // The edge last→p is degenerate; the surviving edge starts at p.
                if let Some(s) = self.src.last_mut() {
                    *s = src;
                }
                return;
            }
        }
        self.pts.push(p);
        self.src.push(src);
    }

    fn close(&mut self) {
        while self.pts.len() > 1 {
            let first = self.pts[0];
            let last = self.pts[self.pts.len() - 1];
            if !near(first, last) {
                break;
            }
            self.pts.pop();
            self.src.pop();
        }
    }
}

/// Keep the part of `ring` that is at least as close to `site` as to `other`.
pub(crate) fn clip_by_bisector(ring: &Ring, site: [f64; 2], other: [f64; 2], tag: EdgeSource) -> Ring {
    let n = ring.len();
    let mut out = Ring {
        pts: Vec::with_capacity(n + 1),
        src: Vec::with_capacity(n + 1),
    };
    if n == 0 {
        return out;
    }

    let mid = [(site[0] + other[0]) * 0.5, (site[1] + other[1]) * 0.5];
    let dir = [other[0] - site[0], other[1] - site[1]];
    let side = |p: [f64; 2]| (p[0] - mid[0]) * dir[0] + (p[1] - mid[1]) * dir[1];

    for k in 0..n {
        let a = ring.pts[k];
        let b = ring.pts[(k + 1) % n];
        let sa = side(a);
        let sb = side(b);
        let a_in = sa <= SIDE_EPS;
        let b_in = sb <= SIDE_EPS;

        match (a_in, b_in) {
            (true, true) => out.push(a, ring.src[k]),
            (true, false) => {
                out.push(a, ring.src[k]);
                out.push(intersect(a, b, sa, sb), tag);
            }
            (false, true) => out.push(intersect(a, b, sa, sb), ring.src[k]),
            (false, false) => {}
        }
    }

    out.close();
    out
}

fn intersect(a: [f64; 2], b: [f64; 2], sa: f64, sb: f64) -> [f64; 2] {
    let denom = sa - sb;
    let t = if denom.abs() < f64::EPSILON {
        0.5
    } else {
        (sa / denom).clamp(0.0, 1.0)
    };
    [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t]
}

#[inline]
fn near(a: [f64; 2], b: [f64; 2]) -> bool {
    (a[0] - b[0]).abs() <= MERGE_EPS && (a[1] - b[1]).abs() <= MERGE_EPS
}

#[cfg(test)]
mod tests {
    use super::{clip_by_bisector, Ring};
    use crate::voronoi::EdgeSource;

    #[test]
    fn vertical_bisector_halves_the_rectangle() {
        let rect = Ring::rect(10.0, 10.0);
        let left = clip_by_bisector(&rect, [2.0, 5.0], [8.0, 5.0], EdgeSource::Seed(1));

        assert_eq!(left.len(), 4);
        assert!(left.pts.iter().all(|p| p[0] <= 5.0 + 1e-12));
        let on_bisector = left
            .src
            .iter()
            .filter(|s| **s == EdgeSource::Seed(1))
            .count();
        assert_eq!(on_bisector, 1);
    }

    #[test]
    fn far_bisector_leaves_ring_untouched() {
        let rect = Ring::rect(4.0, 4.0);
        let out = clip_by_bisector(&rect, [1.0, 1.0], [100.0, 1.0], EdgeSource::Seed(7));
        assert_eq!(out.pts, rect.pts);
        assert!(out.src.iter().all(|s| *s == EdgeSource::Border));
    }

    #[test]
    fn bisector_through_a_corner_does_not_duplicate_vertices() {
        // Bisector of (0,0) and (4,4) is x + y = 4, passing through (4,0) and (0,4).
        let rect = Ring::rect(4.0, 4.0);
        let out = clip_by_bisector(&rect, [0.0, 0.0], [4.0, 4.0], EdgeSource::Seed(1));
        assert_eq!(out.len(), 3);
        assert_eq!(out.src.iter().filter(|s| **s == EdgeSource::Seed(1)).count(), 1);
    }
}
