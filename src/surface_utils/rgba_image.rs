//! Owned straight-alpha RGBA images.

use std::io::Write;

use rgb::FromSlice;

use super::Pixel;
use crate::error::RenderingError;

/// A rendered image: `width * height` RGBA8 pixels, row-major, no row padding.
///
/// Images returned by this crate's render functions hold straight
/// (non-premultiplied) alpha, which is what image file formats expect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Computes `width * height * 4`, rejecting zero dimensions and overflow.
pub(crate) fn checked_buffer_len(width: u32, height: u32) -> Result<usize, RenderingError> {
    if width == 0 || height == 0 {
        return Err(RenderingError::InvalidSize(format!(
            "{}x{} has a zero dimension",
            width, height
        )));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| RenderingError::InvalidSize(format!("{}x{} is too big", width, height)))
}

impl RgbaImage {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Result<RgbaImage, RenderingError> {
        let len = checked_buffer_len(width, height)?;

        Ok(RgbaImage {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Wraps existing RGBA data; `None` if its length is not `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<RgbaImage> {
        match checked_buffer_len(width, height) {
            Ok(len) if len == data.len() => Some(RgbaImage {
                width,
                height,
                data,
            }),
            _ => None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn pixels(&self) -> &[Pixel] {
        self.data.as_rgba()
    }

    /// Returns the pixel at `(x, y)`, or `None` if it is outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = y as usize * self.width as usize + x as usize;
        self.pixels().get(index).copied()
    }

    /// Encodes the image as an 8-bit RGBA PNG.
    pub fn write_png<W: Write>(&self, w: W) -> Result<(), png::EncodingError> {
        let mut encoder = png::Encoder::new(w, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.data)?;
        writer.finish()
    }
}
