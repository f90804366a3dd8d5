//! Options for a refinement run.
//!
//! Termination limits are handed to the minimizer untouched; step-size policy
//! is only read by the built-in [`CompassSearch`](super::CompassSearch).

use super::minimizer::{CompassSearch, Termination};
use serde::{Deserialize, Serialize};

/// Parameters controlling seed refinement.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefineOptions {
    /// Maximum number of minimizer iterations (sweeps over all coordinates).
    pub max_iters: usize,
    /// Maximum number of objective evaluations.
    pub max_evals: usize,
    /// Step size (px) below which the search is considered converged.
    pub tolerance: f64,
    /// Initial probe step (px) of the compass search.
    pub initial_step: f64,
    /// Factor applied to the step after a sweep without improvement, in (0, 1).
    pub contraction: f64,
}

impl Default for RefineOptions {
    fn default() -> Self {
        Self {
            max_iters: 200,
            max_evals: 20_000,
            tolerance: 0.25,
            initial_step: 4.0,
            contraction: 0.5,
        }
    }
}

impl RefineOptions {
    pub fn termination(&self) -> Termination {
        Termination {
            max_iters: self.max_iters,
            max_evals: self.max_evals,
            tolerance: self.tolerance,
        }
    }

    /// Compass search configured from these options.
    pub fn compass(&self) -> CompassSearch {
        CompassSearch::new(self.initial_step, self.contraction)
    }
}
