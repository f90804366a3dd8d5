//! 1-pixel boundary rasterization.
//!
//! Boundary segments are drawn with 8-connected Bresenham lines between
//! endpoints rounded to the nearest pixel. Endpoints on the far image border
//! (`x == width`, `y == height`) are clamped onto the last pixel row/column.
use crate::image::GrayImageU8;
use crate::types::Point;
use crate::voronoi::Tessellation;

/// Foreground value written into masks.
pub const FOREGROUND: u8 = 255;

/// Draw every seed-to-seed boundary of `tess` into `mask` (which must match the
/// tessellation bounds). Returns the number of segments drawn.
pub fn rasterize_boundaries(tess: &Tessellation, mask: &mut GrayImageU8) -> usize {
    debug_assert_eq!(mask.width(), tess.bounds().width());
    debug_assert_eq!(mask.height(), tess.bounds().height());
    let edges = tess.interior_edges();
    for e in &edges {
        draw_line(mask, e.a, e.b);
    }
    edges.len()
}

/// Draw a 1-pixel 8-connected line from `a` to `b`, clipped to the mask.
pub fn draw_line(mask: &mut GrayImageU8, a: Point, b: Point) {
    let w = mask.width();
    let h = mask.height();
    if w == 0 || h == 0 {
        return;
    }
    let (mut x0, mut y0) = (to_pixel(a.x, w), to_pixel(a.y, h));
    let (x1, y1) = (to_pixel(b.x, w), to_pixel(b.y, h));

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        mask.set(x0 as usize, y0 as usize, FOREGROUND);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[inline]
fn to_pixel(v: f32, len: usize) -> i64 {
    let max = len as i64 - 1;
    if !v.is_finite() {
        return 0;
    }
    ((v + 0.5).floor() as i64).clamp(0, max)
}
