//! Utilities for working with RGBA pixel buffers.

use rayon::prelude::*;
use rgb::FromSlice;

mod rgba_image;

pub(crate) use self::rgba_image::checked_buffer_len;
pub use self::rgba_image::RgbaImage;

/// A pixel consisting of R, G, B and A values.
pub type Pixel = rgb::RGBA8;

pub trait PixelOps {
    fn premultiply(self) -> Self;
    fn unpremultiply(self) -> Self;
    fn diff(&self, other: &Self) -> Self;
}

/// Applies `f` to the color channels, leaving alpha alone.
#[inline]
fn map_color_channels<F: Fn(u8) -> u8>(pixel: Pixel, f: F) -> Pixel {
    Pixel {
        r: f(pixel.r),
        g: f(pixel.g),
        b: f(pixel.b),
        a: pixel.a,
    }
}

impl PixelOps for Pixel {
    /// Returns an unpremultiplied value of this pixel.
    ///
    /// Fully transparent and fully opaque pixels are returned unchanged; for
    /// the rest each color channel becomes `round(c * 255 / a)`, clamped to 255.
    #[inline]
    fn unpremultiply(self) -> Self {
        let a = u32::from(self.a);

        if a == 0 || a == 255 {
            self
        } else {
            map_color_channels(self, |x| ((u32::from(x) * 255 + a / 2) / a).min(255) as u8)
        }
    }

    /// Returns a premultiplied value of this pixel.
    #[inline]
    fn premultiply(self) -> Self {
        let a = u32::from(self.a);
        map_color_channels(self, |x| ((u32::from(x) * a + 127) / 255) as u8)
    }

    #[inline]
    fn diff(&self, other: &Pixel) -> Pixel {
        Pixel {
            r: self.r.abs_diff(other.r),
            g: self.g.abs_diff(other.g),
            b: self.b.abs_diff(other.b),
            a: self.a.abs_diff(other.a),
        }
    }
}

/// Converts a buffer of premultiplied RGBA pixels to straight alpha, in place.
///
/// `width` is the number of pixels per row; rows are processed in parallel.
/// A trailing partial row, if any, is converted as well.
pub fn unpremultiply_in_place(data: &mut [u8], width: usize) {
    let row_len = width.max(1) * 4;

    data.par_chunks_mut(row_len).for_each(|row| {
        for pixel in row.as_rgba_mut() {
            *pixel = pixel.unpremultiply();
        }
    });
}
