//! Edge-field generation: from tessellation boundaries to a smooth ridge map.
//!
//! Building blocks, each usable on its own:
//!
//! - [`raster`]: 1-pixel Bresenham rasterization of seed-to-seed boundaries.
//! - [`morph`]: separable binary dilation with a square structuring element.
//! - [`distance`]: exact L1 distance transform (the image border is not
//!   background).
//! - [`field`]: the composed pipeline with reusable buffers and the
//!   `[0, 1]` normalization used for scoring.
//!
//! Design goals
//! - Deterministic output regardless of the `parallel` feature.
//! - Scratch buffers are reused once the generator has seen the image size;
//!   only the returned field is allocated per call.

pub mod distance;
pub mod field;
pub mod morph;
pub mod raster;

pub use distance::l1_distance_transform;
pub use field::{generate_edge_field, EdgeField, EdgeFieldGenerator};
pub use morph::{dilate_square, DilateScratch};
pub use raster::{draw_line, rasterize_boundaries};
