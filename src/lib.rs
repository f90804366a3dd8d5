//! Voronoi boundary scoring and seed refinement.
//!
//! Seeds (e.g. detected cell centers) induce a Voronoi tessellation of the
//! image. Its seed-to-seed boundaries are rendered as a smooth edge field and
//! scored against an observed intensity field (e.g. a membrane stain); seed
//! positions are then refined to maximize that score.
//!
//! Pipeline: [`SeedSet`] → [`Tessellation`] → [`EdgeField`] → score →
//! [`Refiner`] → updated [`SeedSet`].

// Engine
pub mod edges;
pub mod error;
pub mod refine;
pub mod score;
pub mod seeds;
pub mod types;
pub mod voronoi;

// Session façade and tooling
pub mod config;
pub mod diagnostics;
pub mod image;
pub mod session;

// --- High-level re-exports -------------------------------------------------

pub use crate::edges::{EdgeField, EdgeFieldGenerator};
pub use crate::error::RefineError;
pub use crate::refine::{CompassSearch, Minimizer, RefineOptions, Refiner};
pub use crate::score::{score, try_score, ScoringField};
pub use crate::seeds::SeedSet;
pub use crate::session::{Command, Session, SessionParams};
pub use crate::types::{Bounds, Point};
pub use crate::voronoi::{build_tessellation, Tessellation};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use cell_refine::prelude::*;
///
/// let field = ImageF32::from_fn(64, 48, |x, _| if x == 32 { 100.0 } else { 0.0 });
/// let scoring = ScoringField::new(field).expect("non-empty field");
/// let mut session = Session::new(
///     scoring,
///     vec![Point::new(16.0, 24.0), Point::new(44.0, 24.0)],
///     SessionParams::default(),
/// );
/// let mut search = RefineOptions::default().compass();
/// let before = session.score();
/// session.apply(&Command::Refine, &mut search);
/// assert!(session.score() >= before);
/// ```
pub mod prelude {
    pub use crate::image::ImageF32;
    pub use crate::{
        Bounds, Command, Point, RefineOptions, Refiner, ScoringField, SeedSet, Session,
        SessionParams,
    };
}
