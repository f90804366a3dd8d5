//! Serializable reports produced by the session and the refinement driver.
//!
//! - [`RecomputeReport`]: one tessellation → edge field → score pass with
//!   per-stage timings.
//! - [`RefinementReport`]: one minimizer run (scores, budget use, outcome).
//! - [`SessionReport`]: the demo tool's final JSON dump.

pub mod refine;
pub mod session;
pub mod timing;

pub use refine::RefinementReport;
pub use session::{RecomputeReport, SessionReport};
pub use timing::{StageTiming, TimingBreakdown};
