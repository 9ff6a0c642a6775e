//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use svgrender::{LoadingError, Options, RenderTree};

pub fn load_svg(input: &'static [u8]) -> Result<RenderTree, LoadingError> {
    RenderTree::from_data(input, &Options::new())
}

/// Writes `data` to a file called `name` inside a fresh temporary directory.
///
/// The directory is deleted when the returned guard is dropped.
pub fn write_fixture(name: &str, data: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, data).unwrap();
    (dir, path)
}

/// A 100x50 document: an opaque blue square on the left and a stroked
/// circle with id "dot" on the right.
pub const SQUARE_AND_DOT: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50">
  <rect id="square" x="0" y="0" width="50" height="50" fill="#0000ff"/>
  <circle id="dot" cx="75" cy="25" r="10" fill="#00ff00" stroke="#000000" stroke-width="4"/>
</svg>"##;

/// An opaque 50x50 square that covers the whole document.
pub const FULL_SQUARE: &[u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="50" height="50">
  <rect x="0" y="0" width="50" height="50" fill="#ff0000"/>
</svg>"##;

pub const EMPTY: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"/>"#;
