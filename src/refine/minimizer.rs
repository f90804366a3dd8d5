//! Derivative-free minimizer abstraction.
//!
//! The refinement driver only needs "vector in, scalar out, better vector
//! back". Any search (Nelder–Mead, coordinate descent, CMA-ES, …) can stand
//! behind [`Minimizer`]; [`CompassSearch`] is the built-in default.
use log::debug;
use nalgebra::DVector;

/// Stopping criteria forwarded from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Termination {
    /// Maximum number of iterations.
    pub max_iters: usize,
    /// Maximum number of objective evaluations.
    pub max_evals: usize,
    /// Convergence tolerance in parameter units.
    pub tolerance: f64,
}

/// Result of a minimization run.
#[derive(Clone, Debug, PartialEq)]
pub struct Minimum {
    pub x: DVector<f64>,
    pub value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    /// `true` when the tolerance was reached before any budget ran out.
    pub converged: bool,
}

/// Black-box minimizer over `R^n`, `n = initial.len()`.
pub trait Minimizer {
    fn minimize(
        &mut self,
        objective: &mut dyn FnMut(&DVector<f64>) -> f64,
        initial: DVector<f64>,
        termination: &Termination,
    ) -> Minimum;
}

/// Compass (coordinate pattern) search.
///
/// Each iteration probes `x ± step·e_i` for every coordinate and moves to the
/// first improving probe. A sweep with no improvement shrinks the step by
/// `contraction`; the search converges once the step drops below the
/// tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct CompassSearch {
    initial_step: f64,
    contraction: f64,
}

impl CompassSearch {
    /// `contraction` is clamped into `[0.05, 0.95]` so the step always shrinks.
    pub fn new(initial_step: f64, contraction: f64) -> Self {
        let initial_step = if initial_step.is_finite() && initial_step > 0.0 {
            initial_step
        } else {
            1.0
        };
        let contraction = if contraction.is_finite() {
            contraction.clamp(0.05, 0.95)
        } else {
            0.5
        };
        Self {
            initial_step,
            contraction,
        }
    }
}

impl Default for CompassSearch {
    fn default() -> Self {
        Self::new(4.0, 0.5)
    }
}

impl Minimizer for CompassSearch {
    fn minimize(
        &mut self,
        objective: &mut dyn FnMut(&DVector<f64>) -> f64,
        initial: DVector<f64>,
        termination: &Termination,
    ) -> Minimum {
        let mut x = initial;
        let mut fx = objective(&x);
        let mut evaluations = 1usize;
        let mut iterations = 0usize;
        let mut step = self.initial_step;
        let mut converged = x.is_empty();

        'search: while !converged && iterations < termination.max_iters {
            if step < termination.tolerance {
                converged = true;
                break;
            }
            iterations += 1;

            let mut improved = false;
            for i in 0..x.len() {
                for dir in [1.0, -1.0] {
                    if evaluations >= termination.max_evals {
                        break 'search;
                    }
                    let mut candidate = x.clone();
                    candidate[i] += dir * step;
                    let fc = objective(&candidate);
                    evaluations += 1;
                    if fc < fx {
                        x = candidate;
                        fx = fc;
                        improved = true;
                        break;
                    }
                }
            }

            if !improved {
                step *= self.contraction;
            }
        }
        if !converged && step < termination.tolerance {
            converged = true;
        }

        debug!(
            "CompassSearch::minimize dims={} iterations={} evaluations={} value={:.6} step={:.4} converged={}",
            x.len(),
            iterations,
            evaluations,
            fx,
            step,
            converged
        );

        Minimum {
            x,
            value: fx,
            iterations,
            evaluations,
            converged,
        }
    }
}
