//! Sizes and rectangles in user-space units.

/// Width and height of a document, in pixels at the configured DPI.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub fn new(width: f32, height: f32) -> Size {
        Size { width, height }
    }

    /// Whether both dimensions are strictly positive.  NaN is not.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Whole pixels needed to hold this size, rounding up so that partially
    /// covered pixels are kept.
    ///
    /// `None` if the size is not positive or does not fit in a `u32`.
    pub fn to_pixels(&self) -> Option<(u32, u32)> {
        if !self.is_positive() {
            return None;
        }

        let width = cast::u32(self.width.ceil()).ok()?;
        let height = cast::u32(self.height.ceil()).ok()?;

        Some((width, height))
    }
}

/// An axis-aligned rectangle given by its top-left corner and its size.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn x1(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn y1(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x && other.y >= self.y && other.x1() <= self.x1() && other.y1() <= self.y1()
    }
}
