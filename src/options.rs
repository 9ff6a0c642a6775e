//! Parsing preferences: DPI, fonts, rendering quality and resources.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::engine::{self, EngineOptions};
use crate::error::LoadingError;

/// Quality hint for rendering shapes, as in the SVG `shape-rendering` property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ShapeRendering {
    OptimizeSpeed,
    CrispEdges,
    #[default]
    GeometricPrecision,
}

/// Quality hint for rendering text, as in the SVG `text-rendering` property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum TextRendering {
    OptimizeSpeed,
    #[default]
    OptimizeLegibility,
    GeometricPrecision,
}

/// Quality hint for scaling raster images, as in the SVG `image-rendering` property.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ImageRendering {
    #[default]
    OptimizeQuality,
    OptimizeSpeed,
}

/// Defines `as_raw`/`from_raw` against the engine's integer constants, plus
/// `FromStr` and `Display` using the CSS keyword spellings.
macro_rules! rendering_mode {
    ($name:ident, $($variant:ident => $raw:path, $keyword:literal;)+) => {
        impl $name {
            /// The engine's integer constant for this mode.
            pub fn as_raw(self) -> i32 {
                match self {
                    $($name::$variant => $raw,)+
                }
            }

            /// Inverse of [`Self::as_raw`]; `None` for values the engine does not define.
            pub fn from_raw(raw: i32) -> Option<$name> {
                match raw {
                    $(r if r == $raw => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<$name, String> {
                match s {
                    $($keyword => Ok($name::$variant),)+
                    _ => Err(format!(
                        "invalid value {:?}, expected one of: {}",
                        s,
                        [$($keyword),+].join(", ")
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let keyword = match *self {
                    $($name::$variant => $keyword,)+
                };

                f.write_str(keyword)
            }
        }
    };
}

rendering_mode!(ShapeRendering,
    OptimizeSpeed => engine::SHAPE_RENDERING_OPTIMIZE_SPEED, "optimizeSpeed";
    CrispEdges => engine::SHAPE_RENDERING_CRISP_EDGES, "crispEdges";
    GeometricPrecision => engine::SHAPE_RENDERING_GEOMETRIC_PRECISION, "geometricPrecision";
);

rendering_mode!(TextRendering,
    OptimizeSpeed => engine::TEXT_RENDERING_OPTIMIZE_SPEED, "optimizeSpeed";
    OptimizeLegibility => engine::TEXT_RENDERING_OPTIMIZE_LEGIBILITY, "optimizeLegibility";
    GeometricPrecision => engine::TEXT_RENDERING_GEOMETRIC_PRECISION, "geometricPrecision";
);

rendering_mode!(ImageRendering,
    OptimizeQuality => engine::IMAGE_RENDERING_OPTIMIZE_QUALITY, "optimizeQuality";
    OptimizeSpeed => engine::IMAGE_RENDERING_OPTIMIZE_SPEED, "optimizeSpeed";
);

/// Preferences used while parsing an SVG document into a [`crate::RenderTree`].
///
/// Create one with [`Options::new`], configure it with the setters, and pass it
/// to [`crate::RenderTree::from_data`] or [`crate::RenderTree::from_path`].
/// Changing the options afterwards does not affect documents that were already
/// parsed.
///
/// # Fonts
///
/// A new `Options` has an empty font database, so text is not rendered until
/// fonts are loaded with [`Options::load_system_fonts`], [`Options::load_font_file`]
/// or [`Options::load_font_data`].  When several loaded faces match a requested
/// family, weight and style equally well, the one that was loaded first wins.
///
/// # Release
///
/// The engine-side object is released when the `Options` is dropped, or earlier
/// with [`Options::release`].  After release, setters do nothing and parsing fails
/// with [`LoadingError::Released`].
pub struct Options {
    engine: Option<EngineOptions>,
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}

impl Options {
    /// Creates options with the engine defaults: 96 DPI, "Times New Roman" at 12
    /// pixels, and no fonts loaded.
    pub fn new() -> Options {
        Options {
            engine: Some(EngineOptions::create()),
        }
    }

    /// Releases the engine-side object.  Calling this more than once does nothing.
    pub fn release(&mut self) {
        if self.engine.take().is_some() {
            svg_log!("options released");
        }
    }

    pub fn is_released(&self) -> bool {
        self.engine.is_none()
    }

    pub(crate) fn engine(&self) -> Result<&EngineOptions, LoadingError> {
        self.engine.as_ref().ok_or(LoadingError::Released)
    }

    fn with_engine<F: FnOnce(&mut EngineOptions)>(&mut self, f: F) {
        if let Some(ref mut engine) = self.engine {
            f(engine);
        }
    }

    /// Sets the directory used to resolve relative references to external files.
    ///
    /// An empty path clears the preference, so that relative references are not
    /// resolved at all.
    pub fn set_resources_dir<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        let path = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        };

        self.with_engine(|e| e.set_resources_dir(path));
    }

    /// Sets the resolution used to convert physical units like `mm` or `in` to pixels.
    pub fn set_dpi(&mut self, dpi: f32) {
        self.with_engine(|e| e.set_dpi(dpi));
    }

    /// Sets a CSS stylesheet that is applied to the document as a user stylesheet.
    ///
    /// An empty string clears the preference.
    pub fn set_stylesheet(&mut self, css: &str) {
        let css = if css.is_empty() { None } else { Some(css) };

        self.with_engine(|e| e.set_stylesheet(css));
    }

    /// Sets the font family used for text that does not specify one.
    pub fn set_font_family(&mut self, family: &str) {
        self.with_engine(|e| e.set_font_family(family));
    }

    /// Sets the font size used for text that does not specify one.
    pub fn set_font_size(&mut self, size: f32) {
        self.with_engine(|e| e.set_font_size(size));
    }

    /// Sets the family that the generic `serif` name resolves to.
    pub fn set_serif_family(&mut self, family: &str) {
        self.with_engine(|e| e.set_serif_family(family));
    }

    /// Sets the family that the generic `sans-serif` name resolves to.
    pub fn set_sans_serif_family(&mut self, family: &str) {
        self.with_engine(|e| e.set_sans_serif_family(family));
    }

    /// Sets the family that the generic `cursive` name resolves to.
    pub fn set_cursive_family(&mut self, family: &str) {
        self.with_engine(|e| e.set_cursive_family(family));
    }

    /// Sets the family that the generic `fantasy` name resolves to.
    pub fn set_fantasy_family(&mut self, family: &str) {
        self.with_engine(|e| e.set_fantasy_family(family));
    }

    /// Sets the family that the generic `monospace` name resolves to.
    pub fn set_monospace_family(&mut self, family: &str) {
        self.with_engine(|e| e.set_monospace_family(family));
    }

    /// Sets the languages, most preferred first, that `systemLanguage` attributes are
    /// matched against.  The engine's default is `["en"]`.
    pub fn set_languages(&mut self, languages: &[&str]) {
        self.with_engine(|e| e.set_languages(languages));
    }

    pub fn set_shape_rendering_mode(&mut self, mode: ShapeRendering) {
        self.with_engine(|e| e.set_shape_rendering_mode(mode.as_raw()));
    }

    pub fn set_text_rendering_mode(&mut self, mode: TextRendering) {
        self.with_engine(|e| e.set_text_rendering_mode(mode.as_raw()));
    }

    pub fn set_image_rendering_mode(&mut self, mode: ImageRendering) {
        self.with_engine(|e| e.set_image_rendering_mode(mode.as_raw()));
    }

    /// Adds the faces in a font file (TrueType, OpenType, or a collection) to the
    /// font database.
    ///
    /// Returns [`LoadingError::FileOpenFailed`] if the file cannot be read.
    pub fn load_font_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadingError> {
        let engine = self.engine.as_mut().ok_or(LoadingError::Released)?;

        LoadingError::check_status(engine.load_font_file(path.as_ref()))
    }

    /// Adds the faces in an in-memory font to the font database.
    ///
    /// Empty data is ignored.  Data that is not a font is skipped by the engine with
    /// a warning.
    pub fn load_font_data(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        self.with_engine(|e| e.load_font_data(data));
    }

    /// Adds all the fonts installed on the system to the font database.
    ///
    /// This can take a noticeable amount of time on systems with many fonts.
    pub fn load_system_fonts(&mut self) {
        self.with_engine(|e| e.load_system_fonts());
    }

    /// Number of font faces currently in the font database.
    pub fn font_count(&self) -> usize {
        self.engine.as_ref().map(|e| e.font_count()).unwrap_or(0)
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("released", &self.is_released())
            .field("font_count", &self.font_count())
            .finish()
    }
}

impl Drop for Options {
    fn drop(&mut self) {
        self.release();
    }
}
