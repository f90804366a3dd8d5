use cell_refine::edges::generate_edge_field;
use cell_refine::image::{ImageF32, RgbImageU8};
use cell_refine::types::{Bounds, Point};
use cell_refine::voronoi::build_tessellation;

/// 64-bit linear congruential generator; the same seed yields the same sequence.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1))
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / (1u64 << 24) as f32
    }

    pub fn points(&mut self, n: usize, bounds: Bounds) -> Vec<Point> {
        (0..n)
            .map(|_| {
                Point::new(
                    self.next_f32() * bounds.max_x(),
                    self.next_f32() * bounds.max_y(),
                )
            })
            .collect()
    }
}

/// Regular grid of seeds, `cols × rows`, centered in their tiles.
pub fn grid_seeds(bounds: Bounds, cols: usize, rows: usize) -> Vec<Point> {
    let tw = bounds.width() as f32 / cols as f32;
    let th = bounds.height() as f32 / rows as f32;
    let mut out = Vec::with_capacity(cols * rows);
    for r in 0..rows {
        for c in 0..cols {
            out.push(Point::new((c as f32 + 0.5) * tw, (r as f32 + 0.5) * th));
        }
    }
    out
}

/// Synthetic membrane stain: bright ridges along the true cell boundaries of
/// `truth` on a dim background.
pub fn membrane_field(bounds: Bounds, truth: &[Point], ridge_width: usize) -> ImageF32 {
    let tess = build_tessellation(truth, bounds);
    let edge = generate_edge_field(&tess, ridge_width);
    let mut field = edge.into_field();
    for v in &mut field.data {
        *v = 20.0 + 200.0 * *v;
    }
    field
}

/// Same stain stored in the red channel of an RGB buffer.
pub fn membrane_rgb(bounds: Bounds, truth: &[Point], ridge_width: usize) -> RgbImageU8 {
    let field = membrane_field(bounds, truth, ridge_width);
    let mut rgb = RgbImageU8::new(bounds.width(), bounds.height());
    for y in 0..field.h {
        for x in 0..field.w {
            let r = field.get(x, y).round().clamp(0.0, 255.0) as u8;
            rgb.set(x, y, [r, 30, 0]);
        }
    }
    rgb
}
