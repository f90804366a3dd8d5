use serde::{Deserialize, Serialize};

/// Summary of one refinement run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementReport {
    pub seed_count: usize,
    pub edge_gradient_width: usize,
    pub initial_score: f64,
    pub final_score: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub converged: bool,
    /// `false` when the minimizer's answer scored worse and the seeds were kept.
    pub applied: bool,
    /// Largest seed displacement (px) caused by the run.
    pub max_displacement: f32,
    pub elapsed_ms: f64,
}

impl RefinementReport {
    pub fn improvement(&self) -> f64 {
        self.final_score - self.initial_score
    }
}

