//! Seed refinement against the scoring field.
//!
//! The refinement driver bridges the seed set and a black-box minimizer:
//!
//! - [`to_vector`] / [`from_vector`] pack seeds as `[x0, y0, x1, y1, …]` and
//!   unpack them with clamping.
//! - [`Objective`] maps a parameter vector to the negated alignment score
//!   (tessellation → edge field → score, rebuilt on every call).
//! - [`Minimizer`] is the seam to the optimizer; [`CompassSearch`] is the
//!   default implementation.
//! - [`Refiner`] runs one minimization and writes the result back.
//!
//! Termination limits and step policy come from [`RefineOptions`] and are
//! forwarded to the minimizer, not interpreted here.

mod minimizer;
mod objective;
mod options;
mod refiner;
mod vector;

pub use minimizer::{CompassSearch, Minimizer, Minimum, Termination};
pub use objective::Objective;
pub use options::RefineOptions;
pub use refiner::Refiner;
pub use vector::{from_vector, to_vector};
