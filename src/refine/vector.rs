//! Packing seeds into the flat parameter vector seen by the minimizer.
use crate::types::{Bounds, Point};
use nalgebra::DVector;

/// Flatten seeds as `[x0, y0, x1, y1, …]`.
pub fn to_vector(seeds: &[Point]) -> DVector<f64> {
    DVector::from_iterator(
        seeds.len() * 2,
        seeds.iter().flat_map(|p| [p.x as f64, p.y as f64]),
    )
}

/// Inverse of [`to_vector`]. Every point is clamped into `bounds`; the
/// minimizer's output is never trusted to stay inside the image. A trailing
/// odd coordinate is ignored.
pub fn from_vector(v: &DVector<f64>, bounds: Bounds) -> Vec<Point> {
    v.as_slice()
        .chunks_exact(2)
        .map(|xy| bounds.clamp(Point::new(xy[0] as f32, xy[1] as f32)))
        .collect()
}
