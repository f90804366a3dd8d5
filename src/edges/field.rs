//! Edge-likelihood field generated from tessellation boundaries.
//!
//! Pipeline per call:
//! 1. rasterize seed-to-seed boundaries into a binary mask,
//! 2. dilate with a `(2w+1)×(2w+1)` square (`w` = edge gradient width),
//! 3. L1 distance transform of the thickened mask (the image border is not
//!    background, so bands keep their profile up to the border),
//! 4. normalize to `[0, 1]` by the peak distance.
//!
//! The normalization is a min–max with the minimum pinned at the background
//! value 0. Whenever any background pixel exists this is exactly min–max; when
//! the band covers the whole image the distance is taken to the border
//! instead, so the support is kept intact and grows monotonically with `w`.
use super::distance::l1_distance_transform_into;
use super::morph::{dilate_square_into, DilateScratch};
use super::raster::rasterize_boundaries;
use crate::image::{GrayImageU8, ImageF32};
use crate::voronoi::Tessellation;
use log::debug;

/// Normalized boundary field plus the raw peak distance it was scaled by.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeField {
    field: ImageF32,
    peak_distance: f32,
}

impl EdgeField {
    pub fn field(&self) -> &ImageF32 {
        &self.field
    }

    pub fn into_field(self) -> ImageF32 {
        self.field
    }

    /// Largest L1 distance before normalization (0 when there are no boundaries).
    pub fn peak_distance(&self) -> f32 {
        self.peak_distance
    }

    /// Number of pixels with a nonzero field value.
    pub fn support(&self) -> usize {
        self.field.count_nonzero()
    }

    /// Byte min–max normalization of the field, for display only.
    pub fn display(&self) -> GrayImageU8 {
        let (lo, hi) = self
            .field
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let data = if hi > lo {
            let scale = 255.0 / (hi - lo);
            self.field
                .data
                .iter()
                .map(|&v| ((v - lo) * scale).round().clamp(0.0, 255.0) as u8)
                .collect()
        } else {
            vec![0; self.field.data.len()]
        };
        GrayImageU8::new(self.field.w, self.field.h, data)
    }
}

/// Edge-field generator with buffers reused across calls.
///
/// The optimizer evaluates the field many times for the same image size, so
/// masks and distance scratch are kept between calls and only resized when
/// the tessellation bounds change. The returned field is allocated per call.
#[derive(Clone, Debug, Default)]
pub struct EdgeFieldGenerator {
    mask: Option<GrayImageU8>,
    thick: Option<GrayImageU8>,
    dilate: DilateScratch,
    dist: Vec<u32>,
}

impl EdgeFieldGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boundary mask rasterized by the last [`generate`](Self::generate) call.
    pub fn boundary_mask(&self) -> Option<&GrayImageU8> {
        self.mask.as_ref()
    }

    /// Build the normalized edge field of `tess` for edge gradient width `width`.
    pub fn generate(&mut self, tess: &Tessellation, width: usize) -> EdgeField {
        let bounds = tess.bounds();
        let (w, h) = (bounds.width(), bounds.height());

        let mask = reset_buffer(&mut self.mask, w, h);
        let segments = rasterize_boundaries(tess, mask);

        let thick = reset_buffer(&mut self.thick, w, h);
        dilate_square_into(mask, width, &mut self.dilate, thick);

        let mut field = ImageF32::new(w, h);
        l1_distance_transform_into(thick, &mut self.dist, &mut field);

        let peak = field.max_value();
        if peak > 0.0 {
            for v in &mut field.data {
                *v /= peak;
            }
        }

        debug!(
            "EdgeFieldGenerator::generate width={} segments={} band_px={} peak={}",
            width,
            segments,
            thick.count_nonzero(),
            peak
        );

        EdgeField {
            field,
            peak_distance: peak,
        }
    }
}

fn reset_buffer(slot: &mut Option<GrayImageU8>, w: usize, h: usize) -> &mut GrayImageU8 {
    let reusable = matches!(slot, Some(buf) if buf.width() == w && buf.height() == h);
    if !reusable {
        *slot = Some(GrayImageU8::zeros(w, h));
    }
    let buf = slot.get_or_insert_with(|| GrayImageU8::zeros(w, h));
    if reusable {
        buf.data_mut().fill(0);
    }
    buf
}

/// One-shot convenience wrapper around [`EdgeFieldGenerator::generate`].
pub fn generate_edge_field(tess: &Tessellation, width: usize) -> EdgeField {
    EdgeFieldGenerator::new().generate(tess, width)
}
