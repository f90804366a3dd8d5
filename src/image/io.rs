//! Owned 8-bit buffers plus I/O helpers for images and JSON.
//!
//! - `load_channel_u8` / `load_channel_f32`: read a PNG/JPEG/TIFF and keep
//!   one RGB channel.
//! - `save_grayscale_u8`: write single-channel PNGs (masks, display field).
//! - `save_rgb8`: write the RGB composite shown to the user.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF32, ImageU8};
use image::{DynamicImage, ImageBuffer, Luma, Rgb, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
///
/// Doubles as the binary boundary mask (`0` background, `255` foreground)
/// and as the byte-normalized display field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        let stride = width;
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Zero-filled buffer.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self::new(width, height, vec![0; width * height])
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.stride + x] = v;
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Number of nonzero pixels.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

/// Owned interleaved RGB buffer used for the display composite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImageU8 {
    pub w: usize,
    pub h: usize,
    /// Interleaved `[r, g, b]` triples in row-major order.
    pub data: Vec<u8>,
}

impl RgbImageU8 {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h * 3],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.w + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = (y * self.w + x) * 3;
        self.data[i..i + 3].copy_from_slice(&px);
    }
}

/// Load an image from disk and keep channel `channel` (0 = red, 1 = green,
/// 2 = blue) as an 8-bit single-channel buffer. Grayscale inputs yield the
/// same values for every channel.
pub fn load_channel_u8(path: &Path, channel: usize) -> Result<GrayImageU8, String> {
    if channel > 2 {
        return Err(format!("Channel index {channel} out of range (0..=2)"));
    }
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|px| px.0[channel]).collect();
    Ok(GrayImageU8::new(width, height, data))
}

/// [`load_channel_u8`] widened to the float grid used as scoring field.
pub fn load_channel_f32(path: &Path, channel: usize) -> Result<ImageF32, String> {
    Ok(load_channel_u8(path, channel)?.as_view().to_f32())
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_grayscale_u8(buffer: &GrayImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let data = buffer.data.clone();
    let image: ImageBuffer<Luma<u8>, Vec<u8>> =
        ImageBuffer::from_raw(buffer.width as u32, buffer.height as u32, data)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    DynamicImage::ImageLuma8(image)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save an RGB composite to disk; the format follows the file extension.
pub fn save_rgb8(buffer: &RgbImageU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        RgbImage::from_raw(buffer.w as u32, buffer.h as u32, buffer.data.clone())
            .ok_or_else(|| "Failed to create RGB image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
