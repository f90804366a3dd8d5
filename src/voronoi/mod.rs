//! Voronoi tessellation of seed points clipped to the image rectangle.
//!
//! Each cell is built independently by half-plane intersection: start from the
//! bounds rectangle and clip it by the perpendicular bisector between its seed
//! and every other seed, nearest first. The result is a convex ring per seed;
//! cells tile the rectangle and neighbouring cells share their bisector
//! segments.
//!
//! Every ring edge remembers where it came from ([`EdgeSource`]). Only
//! seed-to-seed edges are cell boundaries for the edge field; edges on the
//! image border are not.
//!
//! Degenerate inputs
//! - No seeds: empty tessellation.
//! - Coincident seeds: the lower index keeps the cell, later duplicates get an
//!   empty ring (zero area).
//!
//! Cost is `O(n · k)` clip operations per cell where `k` is the number of
//! seeds closer than twice the current cell radius; candidates are visited by
//! increasing distance so the scan stops early.

mod clip;

use crate::types::{Bounds, Point};
use clip::{clip_by_bisector, Ring};
use log::debug;

/// Squared distance (px²) below which two seeds are treated as the same site.
const COINCIDENT_EPS2: f64 = 1e-12;
/// Tolerance (px) used by [`Cell::contains`].
const CONTAINS_EPS: f64 = 1e-4;

/// Origin of a cell edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeSource {
    /// Lies on the image rectangle.
    Border,
    /// Lies on the bisector with the seed at this index.
    Seed(usize),
}

/// Convex Voronoi cell of one seed.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Index of the generating seed.
    pub seed: usize,
    /// Ring vertices; empty for a cell that lost a tie against a duplicate.
    pub vertices: Vec<Point>,
    /// `sources[k]` describes the edge `vertices[k] → vertices[k + 1]`.
    pub sources: Vec<EdgeSource>,
}

/// One shared boundary segment between two cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryEdge {
    pub a: Point,
    pub b: Point,
    /// Lower seed index of the two cells.
    pub left: usize,
    /// Higher seed index of the two cells.
    pub right: usize,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Polygon area in px² (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0f64;
        for k in 0..n {
            let p = self.vertices[k];
            let q = self.vertices[(k + 1) % n];
            acc += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        }
        0.5 * acc.abs()
    }

    /// Iterate `(a, b, source)` for every ring edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point, EdgeSource)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |k| (self.vertices[k], self.vertices[(k + 1) % n], self.sources[k]))
    }

    /// Inclusive point-in-polygon test with a small tolerance.
    pub fn contains(&self, p: &Point) -> bool {
        if self.is_empty() {
            return false;
        }
        self.edges().all(|(a, b, _)| {
            let ex = b.x as f64 - a.x as f64;
            let ey = b.y as f64 - a.y as f64;
            let len = (ex * ex + ey * ey).sqrt();
            if len == 0.0 {
                return true;
            }
            let cross = ex * (p.y as f64 - a.y as f64) - ey * (p.x as f64 - a.x as f64);
            cross / len >= -CONTAINS_EPS
        })
    }
}

/// Voronoi partition of the bounds rectangle, one cell per seed in seed order.
#[derive(Clone, Debug, PartialEq)]
pub struct Tessellation {
    bounds: Bounds,
    cells: Vec<Cell>,
}

impl Tessellation {
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Seeds whose cells share a boundary segment with cell `i`, ascending.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        let Some(cell) = self.cells.get(i) else {
            return Vec::new();
        };
        let mut out: Vec<usize> = cell
            .sources
            .iter()
            .filter_map(|s| match s {
                EdgeSource::Seed(j) => Some(*j),
                EdgeSource::Border => None,
            })
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Every seed-to-seed boundary segment, reported once (from the lower index).
    pub fn interior_edges(&self) -> Vec<BoundaryEdge> {
        let mut out = Vec::new();
        for cell in &self.cells {
            for (a, b, source) in cell.edges() {
                if let EdgeSource::Seed(j) = source {
                    if cell.seed < j {
                        out.push(BoundaryEdge {
                            a,
                            b,
                            left: cell.seed,
                            right: j,
                        });
                    }
                }
            }
        }
        out
    }

    /// Sum of all cell areas; equals the bounds area for a valid tiling.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(Cell::area).sum()
    }
}

/// Build the clipped Voronoi tessellation of `seeds` over `bounds`.
///
/// Seeds are used as given; callers keep them inside the rectangle (the seed
/// set clamps on entry).
pub fn build_tessellation(seeds: &[Point], bounds: Bounds) -> Tessellation {
    let sites: Vec<[f64; 2]> = seeds.iter().map(|p| [p.x as f64, p.y as f64]).collect();
    let rect = Ring::rect(bounds.width() as f64, bounds.height() as f64);

    let cells: Vec<Cell> = (0..sites.len())
        .map(|i| {
            let ring = build_ring(i, &sites, &rect);
            Cell {
                seed: i,
                vertices: ring
                    .pts
                    .iter()
                    .map(|p| Point::new(p[0] as f32, p[1] as f32))
                    .collect(),
                sources: ring.src,
            }
        })
        .collect();

    let empty = cells.iter().filter(|c| c.is_empty()).count();
    if empty > 0 {
        debug!(
            "build_tessellation: {} of {} cells are empty (coincident seeds)",
            empty,
            cells.len()
        );
    }

    Tessellation { bounds, cells }
}

fn build_ring(i: usize, sites: &[[f64; 2]], rect: &Ring) -> Ring {
    let site = sites[i];
    let mut order: Vec<(f64, usize)> = sites
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .map(|(j, s)| ((s[0] - site[0]).powi(2) + (s[1] - site[1]).powi(2), j))
        .collect();
    // Ties are resolved by index so the construction is deterministic.
    order.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut ring = rect.clone();
    for (d2, j) in order {
        if d2 <= COINCIDENT_EPS2 {
            if j < i {
                return Ring::default();
            }
            continue;
        }
        // A bisector farther than the ring's radius cannot cut the ring, and
        // neither can any later (farther) candidate.
        let reach = 2.0 * ring.radius_from(site);
        if d2.sqrt() > reach {
            break;
        }
        ring = clip_by_bisector(&ring, site, sites[j], EdgeSource::Seed(j));
        if ring.is_degenerate() {
            return Ring::default();
        }
    }
    ring
}
