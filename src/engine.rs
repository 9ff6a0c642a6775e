//! The boundary to the rendering engine.
//!
//! Everything that touches `usvg`, `resvg` or `tiny_skia` types lives in this module.
//! The interface is deliberately narrow and shaped like the engine's C API: options
//! are mutated through one setter per preference, parsing reports a raw status
//! code, and rendering writes premultiplied RGBA into a caller-provided buffer.

use std::path::Path;
use std::sync::Arc;

use resvg::tiny_skia;
use resvg::usvg;

use crate::rect::{Rect, Size};
use crate::transform::Transform;

/// Raw status code returned by the parse functions.
pub type Status = i32;

pub const STATUS_OK: Status = 0;
pub const STATUS_NOT_AN_UTF8_STR: Status = 1;
pub const STATUS_FILE_OPEN_FAILED: Status = 2;
pub const STATUS_MALFORMED_GZIP: Status = 3;
pub const STATUS_ELEMENTS_LIMIT_REACHED: Status = 4;
pub const STATUS_INVALID_SIZE: Status = 5;
pub const STATUS_PARSING_FAILED: Status = 6;

pub const SHAPE_RENDERING_OPTIMIZE_SPEED: i32 = 0;
pub const SHAPE_RENDERING_CRISP_EDGES: i32 = 1;
pub const SHAPE_RENDERING_GEOMETRIC_PRECISION: i32 = 2;

pub const TEXT_RENDERING_OPTIMIZE_SPEED: i32 = 0;
pub const TEXT_RENDERING_OPTIMIZE_LEGIBILITY: i32 = 1;
pub const TEXT_RENDERING_GEOMETRIC_PRECISION: i32 = 2;

pub const IMAGE_RENDERING_OPTIMIZE_QUALITY: i32 = 0;
pub const IMAGE_RENDERING_OPTIMIZE_SPEED: i32 = 1;

/// Engine-side configuration object.
pub struct EngineOptions {
    inner: usvg::Options<'static>,
}

impl EngineOptions {
    pub fn create() -> EngineOptions {
        EngineOptions {
            inner: usvg::Options::default(),
        }
    }

    pub fn set_resources_dir(&mut self, path: Option<&Path>) {
        self.inner.resources_dir = path.map(Path::to_path_buf);
    }

    pub fn set_dpi(&mut self, dpi: f32) {
        self.inner.dpi = dpi;
    }

    pub fn set_stylesheet(&mut self, css: Option<&str>) {
        self.inner.style_sheet = css.map(String::from);
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.inner.font_family = family.to_string();
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.inner.font_size = size;
    }

    pub fn set_serif_family(&mut self, family: &str) {
        self.fontdb_mut().set_serif_family(family);
    }

    pub fn set_sans_serif_family(&mut self, family: &str) {
        self.fontdb_mut().set_sans_serif_family(family);
    }

    pub fn set_cursive_family(&mut self, family: &str) {
        self.fontdb_mut().set_cursive_family(family);
    }

    pub fn set_fantasy_family(&mut self, family: &str) {
        self.fontdb_mut().set_fantasy_family(family);
    }

    pub fn set_monospace_family(&mut self, family: &str) {
        self.fontdb_mut().set_monospace_family(family);
    }

    pub fn set_languages(&mut self, languages: &[&str]) {
        self.inner.languages = languages.iter().map(|s| s.to_string()).collect();
    }

    /// Unknown raw values leave the preference unchanged.
    pub fn set_shape_rendering_mode(&mut self, raw: i32) {
        self.inner.shape_rendering = match raw {
            SHAPE_RENDERING_OPTIMIZE_SPEED => usvg::ShapeRendering::OptimizeSpeed,
            SHAPE_RENDERING_CRISP_EDGES => usvg::ShapeRendering::CrispEdges,
            SHAPE_RENDERING_GEOMETRIC_PRECISION => usvg::ShapeRendering::GeometricPrecision,
            _ => return,
        };
    }

    pub fn set_text_rendering_mode(&mut self, raw: i32) {
        self.inner.text_rendering = match raw {
            TEXT_RENDERING_OPTIMIZE_SPEED => usvg::TextRendering::OptimizeSpeed,
            TEXT_RENDERING_OPTIMIZE_LEGIBILITY => usvg::TextRendering::OptimizeLegibility,
            TEXT_RENDERING_GEOMETRIC_PRECISION => usvg::TextRendering::GeometricPrecision,
            _ => return,
        };
    }

    pub fn set_image_rendering_mode(&mut self, raw: i32) {
        self.inner.image_rendering = match raw {
            IMAGE_RENDERING_OPTIMIZE_QUALITY => usvg::ImageRendering::OptimizeQuality,
            IMAGE_RENDERING_OPTIMIZE_SPEED => usvg::ImageRendering::OptimizeSpeed,
            _ => return,
        };
    }

    pub fn load_font_file(&mut self, path: &Path) -> Status {
        match self.fontdb_mut().load_font_file(path) {
            Ok(()) => STATUS_OK,
            Err(e) => {
                svg_log!("could not load font file {}: {}", path.display(), e);
                STATUS_FILE_OPEN_FAILED
            }
        }
    }

    pub fn load_font_data(&mut self, data: &[u8]) {
        self.fontdb_mut().load_font_data(data.to_vec());
    }

    pub fn load_system_fonts(&mut self) {
        self.fontdb_mut().load_system_fonts();
    }

    pub fn font_count(&self) -> usize {
        self.inner.fontdb.len()
    }

    fn fontdb_mut(&mut self) -> &mut usvg::fontdb::Database {
        Arc::make_mut(&mut self.inner.fontdb)
    }
}

/// Engine-side parsed document.
pub struct EngineTree {
    tree: usvg::Tree,
}

fn status_from_usvg_error(e: &usvg::Error) -> Status {
    #[allow(unreachable_patterns)]
    match *e {
        usvg::Error::NotAnUtf8Str => STATUS_NOT_AN_UTF8_STR,
        usvg::Error::MalformedGZip => STATUS_MALFORMED_GZIP,
        usvg::Error::ElementsLimitReached => STATUS_ELEMENTS_LIMIT_REACHED,
        usvg::Error::InvalidSize => STATUS_INVALID_SIZE,
        usvg::Error::ParsingFailed(_) => STATUS_PARSING_FAILED,
        _ => STATUS_PARSING_FAILED,
    }
}

/// Parses an SVG or SVGZ document from memory.
pub fn parse_from_bytes(data: &[u8], options: &EngineOptions) -> Result<EngineTree, Status> {
    usvg::Tree::from_data(data, &options.inner)
        .map(|tree| EngineTree { tree })
        .map_err(|e| {
            svg_log!("engine could not parse document: {}", e);
            status_from_usvg_error(&e)
        })
}

/// Reads a file and parses it with [`parse_from_bytes`].
pub fn parse_from_path(path: &Path, options: &EngineOptions) -> Result<EngineTree, Status> {
    let data = std::fs::read(path).map_err(|e| {
        svg_log!("could not read {}: {}", path.display(), e);
        STATUS_FILE_OPEN_FAILED
    })?;

    parse_from_bytes(&data, options)
}

fn to_engine_transform(t: &Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(t.a, t.b, t.c, t.d, t.e, t.f)
}

impl EngineTree {
    pub fn is_empty(&self) -> bool {
        !self.tree.root().has_children()
    }

    pub fn natural_size(&self) -> Size {
        let size = self.tree.size();
        Size::new(size.width(), size.height())
    }

    /// Bounding box of the content without strokes, filters, or clip regions.
    pub fn object_bbox(&self) -> Option<Rect> {
        self.tree
            .root()
            .abs_bounding_box()
            .to_non_zero_rect()
            .map(|r| Rect::new(r.x(), r.y(), r.width(), r.height()))
    }

    /// Bounding box of everything that gets painted, filter regions included.
    pub fn image_bbox(&self) -> Option<Rect> {
        let root = self.tree.root();

        if root.has_children() || !root.filters().is_empty() {
            let r = root.abs_layer_bounding_box();
            Some(Rect::new(r.x(), r.y(), r.width(), r.height()))
        } else {
            None
        }
    }

    /// Area that [`EngineTree::render_node`] draws for an element, in document coordinates.
    pub fn node_bbox(&self, id: &str) -> Option<Rect> {
        self.tree
            .node_by_id(id)?
            .abs_layer_bounding_box()
            .map(|r| Rect::new(r.x(), r.y(), r.width(), r.height()))
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.tree.node_by_id(id).is_some()
    }

    /// Renders the whole document into a premultiplied RGBA buffer.
    ///
    /// Returns `false` if `data` does not match the dimensions.
    pub fn render(&self, transform: &Transform, width: u32, height: u32, data: &mut [u8]) -> bool {
        match tiny_skia::PixmapMut::from_bytes(data, width, height) {
            Some(mut pixmap) => {
                resvg::render(&self.tree, to_engine_transform(transform), &mut pixmap);
                true
            }

            None => false,
        }
    }

    /// Renders a single element and its descendants.
    ///
    /// Returns `false` if there is no such element, if it has no visible extent, or if
    /// `data` does not match the dimensions.
    pub fn render_node(
        &self,
        id: &str,
        transform: &Transform,
        width: u32,
        height: u32,
        data: &mut [u8],
    ) -> bool {
        let node = match self.tree.node_by_id(id) {
            Some(node) => node,
            None => return false,
        };

        match tiny_skia::PixmapMut::from_bytes(data, width, height) {
            Some(mut pixmap) => {
                resvg::render_node(node, to_engine_transform(transform), &mut pixmap).is_some()
            }

            None => false,
        }
    }
}
