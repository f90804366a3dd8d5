//! Refinement driver: one minimizer run over the whole seed set.
use super::minimizer::Minimizer;
use super::objective::Objective;
use super::options::RefineOptions;
use super::vector::{from_vector, to_vector};
use crate::diagnostics::RefinementReport;
use crate::error::RefineError;
use crate::score::ScoringField;
use crate::seeds::SeedSet;
use log::{info, warn};
use std::time::Instant;

/// Runs a [`Minimizer`] over seed positions to maximize the alignment score.
#[derive(Clone, Debug, Default)]
pub struct Refiner {
    options: RefineOptions,
}

impl Refiner {
    pub fn new(options: RefineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RefineOptions {
        &self.options
    }

    /// Refine `seeds` in place.
    ///
    /// The seed set is borrowed mutably for the whole run, so nothing else can
    /// edit it between objective evaluations. The minimizer's answer is
    /// clamped back into bounds and applied only when it does not lower the
    /// score.
    pub fn refine(
        &self,
        seeds: &mut SeedSet,
        scoring: &ScoringField,
        edge_gradient_width: usize,
        minimizer: &mut dyn Minimizer,
    ) -> Result<RefinementReport, RefineError> {
        let bounds = scoring.bounds();
        if seeds.bounds() != bounds {
            return Err(RefineError::DimensionMismatch {
                expected: (bounds.width(), bounds.height()),
                actual: (seeds.bounds().width(), seeds.bounds().height()),
            });
        }

        let t0 = Instant::now();
        let before = seeds.points().to_vec();
        let mut objective = Objective::new(scoring, edge_gradient_width);
        let initial_score = objective.score_points(&before);

        let termination = self.options.termination();
        let outcome = {
            let mut f = |v: &nalgebra::DVector<f64>| objective.evaluate(v);
            minimizer.minimize(&mut f, to_vector(&before), &termination)
        };

        let refined = from_vector(&outcome.x, bounds);
        let candidate_score = objective.score_points(&refined);
        let applied = refined.len() == before.len() && candidate_score >= initial_score;
        if applied {
            seeds.replace_points(&refined);
        } else {
            warn!(
                "Refiner::refine minimizer result rejected (score {:.3} < initial {:.3})",
                candidate_score, initial_score
            );
        }

        let max_displacement = before
            .iter()
            .zip(seeds.points())
            .map(|(a, b)| a.distance_squared(b).sqrt())
            .fold(0.0f32, f32::max);
        let final_score = if applied { candidate_score } else { initial_score };
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

        info!(
            "Refiner::refine seeds={} width={} score {:.3} -> {:.3} evals={} iters={} converged={} max_move={:.2}px in {:.1} ms",
            before.len(),
            edge_gradient_width,
            initial_score,
            final_score,
            outcome.evaluations,
            outcome.iterations,
            outcome.converged,
            max_displacement,
            elapsed_ms
        );

        Ok(RefinementReport {
            seed_count: before.len(),
            edge_gradient_width,
            initial_score,
            final_score,
            iterations: outcome.iterations,
            evaluations: outcome.evaluations,
            converged: outcome.converged,
            applied,
            max_displacement,
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Refiner;
    use crate::image::ImageF32;
    use crate::refine::{Minimizer, Minimum, RefineOptions, Termination};
    use crate::score::ScoringField;
    use crate::seeds::SeedSet;
    use crate::types::{Bounds, Point};
    use nalgebra::DVector;

    /// Returns a fixed vector regardless of the objective.
    struct Fixed(Vec<f64>);

    impl Minimizer for Fixed {
        fn minimize(
            &mut self,
            objective: &mut dyn FnMut(&DVector<f64>) -> f64,
            _initial: DVector<f64>,
            _termination: &Termination,
        ) -> Minimum {
            let x = DVector::from_vec(self.0.clone());
            let value = objective(&x);
            Minimum {
                x,
                value,
                iterations: 1,
                evaluations: 1,
                converged: true,
            }
        }
    }

    fn ridge() -> ScoringField {
        let f = ImageF32::from_fn(32, 12, |x, _| if x == 16 { 50.0 } else { 0.0 });
        ScoringField::new(f).expect("valid field")
    }

    #[test]
    fn worse_answers_are_not_applied() {
        let sf = ridge();
        let mut seeds = SeedSet::new([Point::new(10.0, 6.0), Point::new(22.0, 6.0)], sf.bounds());
        let mut bad = Fixed(vec![2.0, 6.0, 8.0, 6.0]);
        let report = Refiner::default()
            .refine(&mut seeds, &sf, 0, &mut bad)
            .expect("same bounds");
        assert!(!report.applied);
        assert_eq!(seeds.points(), &[Point::new(10.0, 6.0), Point::new(22.0, 6.0)]);
        assert_eq!(report.final_score, report.initial_score);
        assert_eq!(report.max_displacement, 0.0);
    }

    #[test]
    fn out_of_bounds_answers_are_clamped_before_applying() {
        let sf = ridge();
        let mut seeds = SeedSet::new([Point::new(4.0, 6.0), Point::new(20.0, 6.0)], sf.bounds());
        // Second seed pushed far right: clamped to x = 31, boundary at 17.5.
        let mut wild = Fixed(vec![4.0, 6.0, 400.0, 6.0]);
        let report = Refiner::default()
            .refine(&mut seeds, &sf, 2, &mut wild)
            .expect("same bounds");
        assert!(report.applied);
        assert_eq!(seeds.get(1), Some(Point::new(31.0, 6.0)));
        assert!(report.final_score >= report.initial_score);
    }

    #[test]
    fn compass_search_moves_boundary_onto_the_ridge() {
        let _ = env_logger::builder().is_test(true).try_init();
        let sf = ridge();
        let mut seeds = SeedSet::new([Point::new(6.0, 6.0), Point::new(20.0, 6.0)], sf.bounds());
        let options = RefineOptions::default();
        let mut search = options.compass();
        let report = Refiner::new(options)
            .refine(&mut seeds, &sf, 1, &mut search)
            .expect("same bounds");
        assert!(report.applied);
        assert!(report.final_score > report.initial_score);
        let a = seeds.get(0).expect("seed 0");
        let b = seeds.get(1).expect("seed 1");
        let boundary_x = 0.5 * (a.x + b.x);
        assert!((boundary_x - 16.0).abs() <= 1.0, "boundary at {boundary_x}");
    }

    #[test]
    fn mismatched_bounds_are_rejected() {
        let sf = ridge();
        let other = Bounds::new(8, 8).expect("valid bounds");
        let mut seeds = SeedSet::new([Point::new(1.0, 1.0)], other);
        let mut search = RefineOptions::default().compass();
        assert!(Refiner::default()
            .refine(&mut seeds, &sf, 0, &mut search)
            .is_err());
    }
}
