//! Load SVG documents and render them to straight-alpha RGBA images.
//!
//! This crate is a thin layer over the [resvg] rendering engine.  Parsing, CSS,
//! text layout and rasterization all happen in the engine; this crate manages the
//! engine objects, reports failures as typed errors, and converts the engine's
//! premultiplied output into the straight alpha that image files expect.
//!
//! SVGZ files, which are just an SVG stream compressed with the GZIP algorithm,
//! are accepted wherever SVG data is.
//!
//! # Basic usage
//!
//! * Create an [`Options`] and load some fonts into it.
//! * Parse a document into a [`RenderTree`].
//! * Render the tree with a [`Transform`] into an [`RgbaImage`], as many times as you want.
//!
//! For quick jobs, [`render`], [`render_with_size`] and [`render_scaled_to_size`]
//! do all of the above in a single call.
//!
//! # Example
//!
//! ```
//! use svgrender::{Options, RenderTree, Size, Transform};
//!
//! let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
//!   <rect x="0" y="0" width="10" height="10" fill="green"/>
//! </svg>"#;
//!
//! let mut options = Options::new();
//! options.set_dpi(96.0);
//!
//! let tree = RenderTree::from_data(svg, &options)?;
//! assert_eq!(tree.image_size(), Size::new(10.0, 10.0));
//!
//! // Twice as big, letterboxed into a wide image
//! let transform = Transform::fit_to(tree.image_size(), Size::new(40.0, 20.0))?;
//! let image = tree.render(&transform, 40, 20)?;
//!
//! assert_eq!(image.width(), 40);
//! assert_eq!(image.pixel(0, 0).map(|p| p.a), Some(0));
//! # Ok::<(), svgrender::Error>(())
//! ```
//!
//! # Logging
//!
//! The engine reports problems in documents, such as unsupported elements, through
//! the [`log`](https://docs.rs/log) crate.  Call [`init_log`] to see them on
//! standard error, or install any other logger.  Setting the `SVGRENDER_LOG`
//! environment variable makes this crate print its own diagnostics as well.
//!
//! [resvg]: https://github.com/linebender/resvg

#![warn(unused)]

pub use crate::api::{render, render_scaled_to_size, render_with_size};
pub use crate::error::{Error, LoadingError, RenderingError};
pub use crate::handle::RenderTree;
pub use crate::log::init_log;
pub use crate::options::{ImageRendering, Options, ShapeRendering, TextRendering};
pub use crate::rect::{Rect, Size};
pub use crate::surface_utils::{Pixel, RgbaImage};
pub use crate::transform::Transform;

#[macro_use]
pub mod log;

mod api;
mod engine;
mod error;
mod handle;
mod options;
mod rect;
pub mod surface_utils; // pub for benchmarking
mod transform;
