use crate::error::RefineError;
use serde::{Deserialize, Serialize};

/// Image-space coordinate. Integer values refer to pixel positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance_squared(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Image rectangle `[0, width] × [0, height]` shared by every field of a session.
///
/// Seeds live on the pixel grid, so [`Bounds::clamp`] maps into
/// `[0, width-1] × [0, height-1]` while tessellation cells cover the full
/// rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    width: usize,
    height: usize,
}

impl Bounds {
    pub fn new(width: usize, height: usize) -> Result<Self, RefineError> {
        if width == 0 || height == 0 {
            return Err(RefineError::EmptyBounds { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Clamp `p` onto the pixel grid. Idempotent; identity for in-bounds points.
    /// NaN coordinates collapse to the lower bound.
    pub fn clamp(&self, p: Point) -> Point {
        Point {
            x: clamp_coord(p.x, self.width),
            y: clamp_coord(p.y, self.height),
        }
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.max_x() && p.y <= self.max_y()
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        (self.width - 1) as f32
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        (self.height - 1) as f32
    }
}

fn clamp_coord(v: f32, len: usize) -> f32 {
    let hi = (len - 1) as f32;
    if v.is_nan() {
        return 0.0;
    }
    v.max(0.0).min(hi)
}
