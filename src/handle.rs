//! Parsed SVG documents and rendering.

use std::fmt;
use std::path::Path;

use crate::engine::{self, EngineTree};
use crate::error::{LoadingError, RenderingError};
use crate::options::Options;
use crate::rect::{Rect, Size};
use crate::surface_utils::{checked_buffer_len, unpremultiply_in_place, RgbaImage};
use crate::transform::Transform;

/// A parsed SVG document, ready to be rendered any number of times.
///
/// The document is immutable once parsed: its size and bounding boxes are
/// computed at parse time, and rendering never modifies it.  A `RenderTree` can
/// be shared between threads and rendered from all of them at once.
///
/// Every render call produces straight-alpha RGBA, so the result can be written
/// to an image file as-is.
///
/// # Example
///
/// ```
/// use svgrender::{Options, RenderTree, Transform};
///
/// let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
///   <rect width="4" height="4" fill="red"/>
/// </svg>"#;
///
/// let tree = RenderTree::from_data(svg, &Options::new())?;
/// let image = tree.render(&Transform::identity(), 4, 4)?;
///
/// assert_eq!(image.pixel(0, 0), Some(svgrender::Pixel::new(255, 0, 0, 255)));
/// # Ok::<(), svgrender::Error>(())
/// ```
pub struct RenderTree {
    tree: Option<EngineTree>,
}

/// Element ids may be written with or without a leading `#`.
fn normalize_id(id: &str) -> &str {
    id.strip_prefix('#').unwrap_or(id)
}

impl RenderTree {
    /// Parses an SVG document from memory.
    ///
    /// The data may be gzip-compressed (SVGZ).
    ///
    /// Returns [`LoadingError::EmptyInput`] for zero bytes, without calling the
    /// engine.
    pub fn from_data(data: &[u8], options: &Options) -> Result<RenderTree, LoadingError> {
        if data.is_empty() {
            return Err(LoadingError::EmptyInput);
        }

        let engine_options = options.engine()?;

        match engine::parse_from_bytes(data, engine_options) {
            Ok(tree) => Ok(RenderTree::new(tree)),
            Err(status) => Err(LoadingError::from_status(status)),
        }
    }

    /// Parses an SVG or SVGZ file.
    ///
    /// Returns [`LoadingError::FileOpenFailed`] if the file cannot be read.
    pub fn from_path<P: AsRef<Path>>(path: P, options: &Options) -> Result<RenderTree, LoadingError> {
        let path = path.as_ref();
        let engine_options = options.engine()?;

        match engine::parse_from_path(path, engine_options) {
            Ok(tree) => Ok(RenderTree::new(tree)),
            Err(status) => Err(LoadingError::from_status(status)),
        }
    }

    fn new(tree: EngineTree) -> RenderTree {
        let size = tree.natural_size();
        svg_log!("parsed document of {}x{}", size.width, size.height);

        RenderTree { tree: Some(tree) }
    }

    /// Releases the engine-side document.  Calling this more than once does nothing.
    ///
    /// After release, the tree reports itself as empty and rendering fails with
    /// [`RenderingError::Released`].
    pub fn release(&mut self) {
        self.tree = None;
    }

    pub fn is_released(&self) -> bool {
        self.tree.is_none()
    }

    fn engine(&self) -> Result<&EngineTree, RenderingError> {
        self.tree.as_ref().ok_or(RenderingError::Released)
    }

    /// Whether the document has no renderable elements.
    ///
    /// A document can be empty and still have a valid size, for example
    /// `<svg width="100" height="100"/>`.
    pub fn is_empty(&self) -> bool {
        self.tree.as_ref().map(EngineTree::is_empty).unwrap_or(true)
    }

    /// The document's size in pixels, as given by its `width`/`height` or `viewBox`.
    pub fn image_size(&self) -> Size {
        self.tree
            .as_ref()
            .map(EngineTree::natural_size)
            .unwrap_or_default()
    }

    /// Bounding box of everything that is painted, including strokes, filter
    /// regions, and markers.  `None` for an empty document.
    pub fn image_bbox(&self) -> Option<Rect> {
        self.tree.as_ref().and_then(EngineTree::image_bbox)
    }

    /// Bounding box of the geometry only, without strokes or filter regions.
    /// `None` if the geometry has no area.
    pub fn object_bbox(&self) -> Option<Rect> {
        self.tree.as_ref().and_then(EngineTree::object_bbox)
    }

    /// Bounding box of a single element, as drawn by [`RenderTree::render_node`].
    ///
    /// For a shape that is not inside a group this is its fill box: the stroke is
    /// not included, so `render_node` into a box of this size clips half of it.
    /// Filter regions of groups are included.
    ///
    /// `None` if there is no such element or if it has no visible extent.
    pub fn node_bbox(&self, id: &str) -> Option<Rect> {
        self.tree
            .as_ref()
            .and_then(|t| t.node_bbox(normalize_id(id)))
    }

    /// Whether an element with the given `id` exists.
    pub fn has_element_with_id(&self, id: &str) -> bool {
        self.tree
            .as_ref()
            .map(|t| t.has_node(normalize_id(id)))
            .unwrap_or(false)
    }

    /// Renders the whole document into a new image.
    pub fn render(
        &self,
        transform: &Transform,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, RenderingError> {
        let mut image = RgbaImage::new(width, height)?;
        self.render_into(transform, width, height, image.data_mut())?;
        Ok(image)
    }

    /// Renders the whole document into `buffer`, which must hold exactly
    /// `width * height * 4` bytes.  Previous contents are discarded.
    pub fn render_into(
        &self,
        transform: &Transform,
        width: u32,
        height: u32,
        buffer: &mut [u8],
    ) -> Result<(), RenderingError> {
        let tree = self.engine()?;
        check_target(width, height, buffer)?;

        buffer.fill(0);

        if !tree.render(transform, width, height, buffer) {
            return Err(RenderingError::InvalidSize(format!(
                "engine could not render into {}x{}",
                width, height
            )));
        }

        unpremultiply_in_place(buffer, width as usize);
        Ok(())
    }

    /// Renders a single element, and its descendants, into a new image.
    ///
    /// The element's bounding box is moved to the origin before `transform` is
    /// applied.
    pub fn render_node(
        &self,
        id: &str,
        transform: &Transform,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage, RenderingError> {
        let mut image = RgbaImage::new(width, height)?;
        self.render_node_into(id, transform, width, height, image.data_mut())?;
        Ok(image)
    }

    /// Renders a single element into `buffer`, which must hold exactly
    /// `width * height * 4` bytes.
    ///
    /// Returns [`RenderingError::IdNotFound`] if there is no element with that `id`,
    /// and [`RenderingError::NoRenderableContent`] if the element has nothing to
    /// draw.  The contents of `buffer` are unspecified after a failure.
    pub fn render_node_into(
        &self,
        id: &str,
        transform: &Transform,
        width: u32,
        height: u32,
        buffer: &mut [u8],
    ) -> Result<(), RenderingError> {
        let tree = self.engine()?;
        check_target(width, height, buffer)?;

        let id = normalize_id(id);
        if !tree.has_node(id) {
            return Err(RenderingError::IdNotFound);
        }

        buffer.fill(0);

        if !tree.render_node(id, transform, width, height, buffer) {
            return Err(RenderingError::NoRenderableContent);
        }

        unpremultiply_in_place(buffer, width as usize);
        Ok(())
    }
}

fn check_target(width: u32, height: u32, buffer: &[u8]) -> Result<(), RenderingError> {
    let expected = checked_buffer_len(width, height)?;

    if buffer.len() != expected {
        return Err(RenderingError::BufferSize {
            expected,
            actual: buffer.len(),
        });
    }

    Ok(())
}

impl fmt::Debug for RenderTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_released() {
            return f.write_str("RenderTree(released)");
        }

        f.debug_struct("RenderTree")
            .field("size", &self.image_size())
            .field("empty", &self.is_empty())
            .finish()
    }
}

impl Drop for RenderTree {
    fn drop(&mut self) {
        self.release();
    }
}
