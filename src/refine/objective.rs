//! Scalar objective evaluated by the minimizer.
//!
//! `evaluate(v)` rebuilds everything from scratch: unpack (with clamping) →
//! tessellate → edge field at the current width → score, and returns the
//! negated score because minimizers minimize.
//!
//! Limitation: out-of-bounds probes are clamped onto the image border rather
//! than penalized, so the objective is flat beyond the border and the search
//! gets no signal pulling a seed back inside.
use super::vector::from_vector;
use crate::edges::EdgeFieldGenerator;
use crate::score::{score, ScoringField};
use crate::types::{Bounds, Point};
use crate::voronoi::build_tessellation;
use nalgebra::DVector;

pub struct Objective<'a> {
    scoring: &'a ScoringField,
    bounds: Bounds,
    width: usize,
    generator: EdgeFieldGenerator,
    evaluations: usize,
}

impl<'a> Objective<'a> {
    pub fn new(scoring: &'a ScoringField, width: usize) -> Self {
        Self {
            scoring,
            bounds: scoring.bounds(),
            width,
            generator: EdgeFieldGenerator::new(),
            evaluations: 0,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Edge gradient width used for every evaluation of this objective.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of edge fields built so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Negated alignment score of the seeds packed in `v`. Never fails: any
    /// coordinate (including NaN) is clamped into bounds first.
    pub fn evaluate(&mut self, v: &DVector<f64>) -> f64 {
        let points = from_vector(v, self.bounds);
        -self.score_points(&points)
    }

    /// Alignment score (not negated) of in-bounds `points`.
    pub fn score_points(&mut self, points: &[Point]) -> f64 {
        self.evaluations += 1;
        let tess = build_tessellation(points, self.bounds);
        let edge = self.generator.generate(&tess, self.width);
        score(edge.field(), self.scoring.field())
    }
}

#[cfg(test)]
mod tests {
    use super::Objective;
    use crate::image::ImageF32;
    use crate::refine::to_vector;
    use crate::score::ScoringField;
    use crate::types::Point;
    use nalgebra::DVector;

    fn ridge_field() -> ScoringField {
        // Bright column at x = 12 in a 24×16 image.
        let f = ImageF32::from_fn(24, 16, |x, _| if x == 12 { 100.0 } else { 1.0 });
        ScoringField::new(f).expect("valid field")
    }

    #[test]
    fn aligned_boundary_scores_better() {
        let sf = ridge_field();
        let mut obj = Objective::new(&sf, 0);
        let aligned = obj.evaluate(&to_vector(&[Point::new(6.0, 8.0), Point::new(18.0, 8.0)]));
        let offset = obj.evaluate(&to_vector(&[Point::new(2.0, 8.0), Point::new(14.0, 8.0)]));
        assert!(aligned < offset, "aligned={aligned} offset={offset}");
        assert_eq!(obj.evaluations(), 2);
    }

    #[test]
    fn out_of_bounds_probe_is_clamped_not_rejected() {
        let sf = ridge_field();
        let mut obj = Objective::new(&sf, 1);
        let wild = DVector::from_vec(vec![-50.0, 1e9, f64::NAN, 8.0]);
        let v = obj.evaluate(&wild);
        assert!(v.is_finite());
        let clamped = obj.evaluate(&to_vector(&[Point::new(0.0, 15.0), Point::new(0.0, 8.0)]));
        assert_eq!(v, clamped);
    }

    #[test]
    fn empty_seed_vector_scores_zero() {
        let sf = ridge_field();
        let mut obj = Objective::new(&sf, 3);
        assert_eq!(obj.evaluate(&DVector::zeros(0)), 0.0);
    }
}
