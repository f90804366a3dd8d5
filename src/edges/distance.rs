//! City-block (L1) distance transform of a binary mask.
//!
//! Two raster passes (forward: left/up, backward: right/down) give the exact
//! L1 distance from each foreground pixel to the nearest background pixel
//! inside the image. Pixels outside the image are infinitely far, so a band
//! that runs into the border keeps its full profile there. Background pixels
//! are 0.
//!
//! A mask without any background pixel has no finite distance; in that case
//! the outside of the image is treated as background instead, which measures
//! the distance to the border.
use crate::image::{GrayImageU8, ImageF32};

/// Distance assigned to pixels outside the image when the mask has background.
const FAR: u32 = u32::MAX / 2;

/// Compute the L1 distance transform of `mask` (nonzero = foreground).
pub fn l1_distance_transform(mask: &GrayImageU8) -> ImageF32 {
    let mut scratch = Vec::new();
    let mut out = ImageF32::new(mask.width(), mask.height());
    l1_distance_transform_into(mask, &mut scratch, &mut out);
    out
}

/// Allocation-free variant; `out` must match the mask size.
pub fn l1_distance_transform_into(mask: &GrayImageU8, dist: &mut Vec<u32>, out: &mut ImageF32) {
    let w = mask.width();
    let h = mask.height();
    assert_eq!((out.w, out.h), (w, h), "distance output size");
    dist.clear();
    dist.resize(w * h, 0);
    if w == 0 || h == 0 {
        return;
    }
    let src = mask.data();
    let outside = if src.iter().any(|&v| v == 0) { FAR } else { 0 };

    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            if src[i] == 0 {
                dist[i] = 0;
                continue;
            }
            let left = if x > 0 { dist[i - 1] } else { outside };
            let up = if y > 0 { dist[i - w] } else { outside };
            dist[i] = (left.min(up) + 1).min(FAR);
        }
    }

    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let i = y * w + x;
            if dist[i] == 0 {
                continue;
            }
            let right = if x + 1 < w { dist[i + 1] } else { outside };
            let down = if y + 1 < h { dist[i + w] } else { outside };
            dist[i] = dist[i].min(right.min(down) + 1);
        }
    }

    for (o, &d) in out.data.iter_mut().zip(dist.iter()) {
        *o = d as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::l1_distance_transform;
    use crate::image::GrayImageU8;

    #[test]
    fn solid_band_peaks_in_the_middle() {
        // Vertical band of width 5 (x = 2..=6) in a 9×5 image.
        let mut mask = GrayImageU8::zeros(9, 5);
        for y in 0..5 {
            for x in 2..=6 {
                mask.set(x, y, 255);
            }
        }
        let d = l1_distance_transform(&mask);
        let row: Vec<f32> = (0..9).map(|x| d.get(x, 2)).collect();
        assert_eq!(row, vec![0.0, 0.0, 1.0, 2.0, 3.0, 2.0, 1.0, 0.0, 0.0]);
        // The image border is not background: the profile is the same on every row.
        for y in [0, 1, 4] {
            assert_eq!(d.get(4, y), 3.0, "row {y}");
            assert_eq!(d.get(2, y), 1.0, "row {y}");
        }
    }

    #[test]
    fn blob_touching_the_corner_measures_only_to_inner_background() {
        // Foreground 3×3 block in the top-left corner of a 6×6 mask.
        let mut mask = GrayImageU8::zeros(6, 6);
        for y in 0..3 {
            for x in 0..3 {
                mask.set(x, y, 255);
            }
        }
        let d = l1_distance_transform(&mask);
        assert_eq!(d.get(0, 0), 3.0);
        assert_eq!(d.get(2, 0), 1.0);
        assert_eq!(d.get(1, 1), 2.0);
        assert_eq!(d.get(0, 2), 1.0);
        assert_eq!(d.get(4, 4), 0.0);
    }

    #[test]
    fn full_mask_falls_back_to_distance_from_the_border() {
        let mask = GrayImageU8::new(5, 5, vec![255; 25]);
        let d = l1_distance_transform(&mask);
        assert_eq!(d.get(2, 2), 3.0);
        assert_eq!(d.get(0, 0), 1.0);
        assert_eq!(d.get(1, 3), 2.0);
    }

    #[test]
    fn empty_mask_is_all_zero() {
        let d = l1_distance_transform(&GrayImageU8::zeros(4, 4));
        assert!(d.data.iter().all(|&v| v == 0.0));
    }
}
