use super::refine::RefinementReport;
use super::timing::TimingBreakdown;
use crate::types::Point;
use serde::{Deserialize, Serialize};

/// State after one full recompute (tessellation → edge field → score).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeReport {
    pub width: usize,
    pub height: usize,
    pub seed_count: usize,
    pub edge_gradient_width: usize,
    pub cells: usize,
    pub boundary_segments: usize,
    pub edge_support_px: usize,
    pub score: f64,
    pub timings: TimingBreakdown,
}

/// Everything the demo tool writes out at the end of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReport {
    pub initial_seeds: Vec<Point>,
    pub seeds: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<usize>,
    pub last_recompute: RecomputeReport,
    pub refinements: Vec<RefinementReport>,
    pub commands_applied: usize,
}
