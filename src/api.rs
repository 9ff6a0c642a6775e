//! One-shot functions that parse and render a document in a single call.
//!
//! Each of these creates fresh [`Options`] with the system fonts loaded, which is
//! convenient but not cheap.  Programs that render many documents should create
//! their own `Options` once and use [`RenderTree`] directly.

use crate::error::{Error, RenderingError};
use crate::handle::RenderTree;
use crate::options::Options;
use crate::rect::Size;
use crate::surface_utils::RgbaImage;
use crate::transform::Transform;

fn load_non_empty(data: &[u8]) -> Result<RenderTree, Error> {
    let mut options = Options::new();
    options.load_system_fonts();

    let tree = RenderTree::from_data(data, &options)?;

    if tree.is_empty() {
        return Err(Error::Rendering(RenderingError::NoRenderableContent));
    }

    Ok(tree)
}

fn pixel_size(size: Size) -> Result<(u32, u32), RenderingError> {
    size.to_pixels().ok_or_else(|| {
        RenderingError::InvalidSize(format!(
            "document size {}x{} cannot be rendered",
            size.width, size.height
        ))
    })
}

/// Renders a document at its natural size.
///
/// Returns [`RenderingError::NoRenderableContent`] if the document has nothing
/// to draw.
///
/// ```
/// let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
///   <rect width="10" height="10"/>
/// </svg>"#;
///
/// let image = svgrender::render(svg)?;
/// assert_eq!((image.width(), image.height()), (10, 10));
/// # Ok::<(), svgrender::Error>(())
/// ```
pub fn render(data: &[u8]) -> Result<RgbaImage, Error> {
    let tree = load_non_empty(data)?;
    let (width, height) = pixel_size(tree.image_size())?;

    Ok(tree.render(&Transform::identity(), width, height)?)
}

/// Renders a document into an image of the given size, without scaling.
///
/// The document is drawn at its natural size in the top-left corner; content
/// that falls outside the image is clipped.
pub fn render_with_size(data: &[u8], width: u32, height: u32) -> Result<RgbaImage, Error> {
    let tree = load_non_empty(data)?;

    Ok(tree.render(&Transform::identity(), width, height)?)
}

/// Renders a document scaled to fit an image of the given size.
///
/// The aspect ratio is preserved, and the document is centered; see
/// [`Transform::fit_to`].  The uncovered parts of the image are transparent.
pub fn render_scaled_to_size(data: &[u8], width: u32, height: u32) -> Result<RgbaImage, Error> {
    let tree = load_non_empty(data)?;
    let transform = Transform::fit_to(
        tree.image_size(),
        Size::new(width as f32, height as f32),
    )?;

    Ok(tree.render(&transform, width, height)?)
}
