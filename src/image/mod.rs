//! Pixel buffers shared by the engine and the tooling layer.
//!
//! - [`ImageF32`]: owned row-major float grid (edge field, scoring field).
//! - [`ImageU8`]: borrowed 8-bit view over external data.
//! - [`io::GrayImageU8`] / [`io::RgbImageU8`]: owned byte buffers for masks,
//!   display fields and the RGB composite.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::io::{GrayImageU8, RgbImageU8};
pub use self::traits::{ImageView, Rows};
pub use self::u8::ImageU8;
