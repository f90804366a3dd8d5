//! Alignment score between an edge field and the observed intensity field.
//!
//! The score is the discrete inner product `Σ edge(x, y) · scoring(x, y)`,
//! accumulated in `f64` in row-major order. It is not normalized by the pixel
//! count, so scores are only comparable between fields of the same size.
//! Accumulation is sequential on purpose: repeated calls on the same inputs
//! return bit-identical values.
use crate::error::RefineError;
use crate::image::{ImageF32, ImageU8, ImageView};
use crate::types::Bounds;

/// Immutable intensity field that edge fields are scored against.
#[derive(Clone, Debug)]
pub struct ScoringField {
    bounds: Bounds,
    field: ImageF32,
}

impl ScoringField {
    pub fn new(field: ImageF32) -> Result<Self, RefineError> {
        let bounds = Bounds::new(field.w, field.h)?;
        Ok(Self { bounds, field })
    }

    /// Widen one 8-bit channel to the float scoring field.
    pub fn from_u8(channel: &ImageU8<'_>) -> Result<Self, RefineError> {
        Self::new(channel.to_f32())
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn field(&self) -> &ImageF32 {
        &self.field
    }
}

/// Inner product of two equally sized fields.
///
/// # Panics
/// Panics when the dimensions differ; both fields must be built on the same
/// image grid. Use [`try_score`] for a checked variant.
pub fn score(edge: &ImageF32, scoring: &ImageF32) -> f64 {
    match try_score(edge, scoring) {
        Ok(v) => v,
        Err(err) => panic!("score: {err}"),
    }
}

/// Checked variant of [`score`].
pub fn try_score(edge: &ImageF32, scoring: &ImageF32) -> Result<f64, RefineError> {
    if (edge.w, edge.h) != (scoring.w, scoring.h) {
        return Err(RefineError::DimensionMismatch {
            expected: (scoring.w, scoring.h),
            actual: (edge.w, edge.h),
        });
    }
    let mut acc = 0.0f64;
    for (e_row, s_row) in edge.rows().zip(scoring.rows()) {
        for (&e, &s) in e_row.iter().zip(s_row) {
            acc += e as f64 * s as f64;
        }
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::{score, try_score, ScoringField};
    use crate::error::RefineError;
    use crate::image::{ImageF32, ImageU8};

    #[test]
    fn inner_product_over_all_pixels() {
        let edge = ImageF32::from_vec(2, 2, vec![0.0, 0.5, 1.0, 0.25]).expect("2x2");
        let scoring = ImageF32::from_vec(2, 2, vec![9.0, 2.0, 3.0, 4.0]).expect("2x2");
        assert_eq!(score(&edge, &scoring), 0.0 * 9.0 + 0.5 * 2.0 + 1.0 * 3.0 + 0.25 * 4.0);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let edge = ImageF32::from_fn(37, 23, |x, y| ((x * 7 + y * 13) % 11) as f32 / 11.0);
        let scoring = ImageF32::from_fn(37, 23, |x, y| ((x * 3 + y * 5) % 256) as f32);
        let a = score(&edge, &scoring);
        let b = score(&edge, &scoring);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn mismatched_dimensions_are_rejected() {
        let edge = ImageF32::new(3, 2);
        let scoring = ImageF32::new(2, 3);
        assert_eq!(
            try_score(&edge, &scoring),
            Err(RefineError::DimensionMismatch {
                expected: (2, 3),
                actual: (3, 2)
            })
        );
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn score_panics_on_mismatch() {
        score(&ImageF32::new(4, 4), &ImageF32::new(4, 5));
    }

    #[test]
    fn scoring_field_requires_positive_size() {
        assert!(ScoringField::new(ImageF32::new(0, 4)).is_err());
        let data = [1u8, 2, 3, 4, 5, 6];
        let view = ImageU8 {
            w: 3,
            h: 2,
            stride: 3,
            data: &data,
        };
        let sf = ScoringField::from_u8(&view).expect("valid field");
        assert_eq!(sf.bounds().width(), 3);
        assert_eq!(sf.field().get(2, 1), 6.0);
    }
}
