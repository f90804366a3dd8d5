//! Binary dilation with a square structuring element.
//!
//! A pixel is set in the output when any pixel of the `(2r+1)×(2r+1)` window
//! centred on it is nonzero in the input; outputs are `0` or `255`. The square
//! element is separable, so the filter runs as a horizontal pass followed by a
//! vertical pass, each using running counts (O(W·H) independent of `r`).
//! Pixels outside the image never contribute.
//!
//! With the `parallel` feature both passes split work by rows on rayon; the
//! output does not depend on the split.
use super::raster::FOREGROUND;
use crate::image::GrayImageU8;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Reusable buffers for [`dilate_square_into`].
#[derive(Clone, Debug, Default)]
pub struct DilateScratch {
    row_pass: Vec<u8>,
    col_prefix: Vec<u32>,
}

/// Dilate `src` with a square element of half-size `radius`.
pub fn dilate_square(src: &GrayImageU8, radius: usize) -> GrayImageU8 {
    let mut dst = GrayImageU8::zeros(src.width(), src.height());
    let mut scratch = DilateScratch::default();
    dilate_square_into(src, radius, &mut scratch, &mut dst);
    dst
}

/// Allocation-free variant of [`dilate_square`]; `dst` must match `src` in size.
pub fn dilate_square_into(
    src: &GrayImageU8,
    radius: usize,
    scratch: &mut DilateScratch,
    dst: &mut GrayImageU8,
) {
    let w = src.width();
    let h = src.height();
    assert_eq!((dst.width(), dst.height()), (w, h), "dilate destination size");
    if w == 0 || h == 0 {
        return;
    }

    if radius == 0 {
        for (o, &v) in dst.data_mut().iter_mut().zip(src.data()) {
            *o = if v != 0 { FOREGROUND } else { 0 };
        }
        return;
    }

    scratch.row_pass.clear();
    scratch.row_pass.resize(w * h, 0);
    horizontal_pass(src.data(), &mut scratch.row_pass, w, radius);

    // Column prefix counts: entry (y+1, x) counts set pixels in rows 0..=y.
    scratch.col_prefix.clear();
    scratch.col_prefix.resize((h + 1) * w, 0);
    for y in 0..h {
        let (done, rest) = scratch.col_prefix.split_at_mut((y + 1) * w);
        let prev = &done[y * w..];
        let cur = &mut rest[..w];
        let row = &scratch.row_pass[y * w..(y + 1) * w];
        for x in 0..w {
            cur[x] = prev[x] + u32::from(row[x] != 0);
        }
    }

    let prefix = &scratch.col_prefix;
    let vertical_row = |y: usize, out: &mut [u8]| {
        let lo = y.saturating_sub(radius);
        let hi = (y + radius).min(h - 1) + 1;
        let top = &prefix[lo * w..(lo + 1) * w];
        let bottom = &prefix[hi * w..(hi + 1) * w];
        for x in 0..w {
            out[x] = if bottom[x] > top[x] { FOREGROUND } else { 0 };
        }
    };

    #[cfg(feature = "parallel")]
    dst.data_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out)| vertical_row(y, out));
    #[cfg(not(feature = "parallel"))]
    dst.data_mut()
        .chunks_mut(w)
        .enumerate()
        .for_each(|(y, out)| vertical_row(y, out));
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], w: usize, radius: usize) {
    let dilate_row = |(src_row, out): (&[u8], &mut [u8])| {
        // Count of set pixels inside the window [x - r, x + r].
        let mut count = src_row[..(radius + 1).min(w)]
            .iter()
            .filter(|&&v| v != 0)
            .count();
        for x in 0..w {
            out[x] = if count > 0 { FOREGROUND } else { 0 };
            let enter = x + radius + 1;
            if enter < w && src_row[enter] != 0 {
                count += 1;
            }
            if x >= radius && src_row[x - radius] != 0 {
                count -= 1;
            }
        }
    };

    #[cfg(feature = "parallel")]
    src.par_chunks(w).zip(dst.par_chunks_mut(w)).for_each(dilate_row);
    #[cfg(not(feature = "parallel"))]
    src.chunks(w).zip(dst.chunks_mut(w)).for_each(dilate_row);
}
