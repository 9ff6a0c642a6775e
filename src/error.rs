//! Error types.

use std::error;
use std::fmt;

use crate::engine::{
    Status, STATUS_ELEMENTS_LIMIT_REACHED, STATUS_FILE_OPEN_FAILED, STATUS_INVALID_SIZE,
    STATUS_MALFORMED_GZIP, STATUS_NOT_AN_UTF8_STR, STATUS_OK, STATUS_PARSING_FAILED,
};

/// Errors that can happen while loading an SVG document or configuring fonts.
///
/// Most variants correspond one-to-one to a status code from the rendering engine.
/// Codes that this crate does not know about are kept verbatim in
/// [`LoadingError::Unknown`].
///
/// Note that SVG is very lenient with respect to document structure; most problems in a
/// document do not lead to a `LoadingError`.  Call [`crate::init_log`] to see the
/// engine's warnings about those.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingError {
    /// The data is not valid UTF-8 text.
    NotUtf8,

    /// A file could not be opened for reading.
    FileOpenFailed,

    /// Gzip-compressed (`.svgz`) data could not be decompressed.
    MalformedGzip,

    /// The document has more elements than the engine is willing to load.
    ElementsLimitReached,

    /// The document's declared size is zero, negative, or otherwise unusable.
    InvalidSize,

    /// The document is not well-formed SVG.
    ParsingFailed,

    /// Zero bytes were supplied; the engine was not called.
    EmptyInput,

    /// The [`crate::Options`] were released before being used.
    Released,

    /// A status code from the engine that has no corresponding variant.
    Unknown(i32),
}

impl LoadingError {
    /// Translates a non-OK engine status code.
    ///
    /// This is the only place where engine codes are interpreted; an OK status
    /// in an error path is not expected and is reported as `Unknown(0)`.
    pub(crate) fn from_status(status: Status) -> LoadingError {
        match status {
            STATUS_NOT_AN_UTF8_STR => LoadingError::NotUtf8,
            STATUS_FILE_OPEN_FAILED => LoadingError::FileOpenFailed,
            STATUS_MALFORMED_GZIP => LoadingError::MalformedGzip,
            STATUS_ELEMENTS_LIMIT_REACHED => LoadingError::ElementsLimitReached,
            STATUS_INVALID_SIZE => LoadingError::InvalidSize,
            STATUS_PARSING_FAILED => LoadingError::ParsingFailed,
            other => LoadingError::Unknown(other),
        }
    }

    /// Converts an engine status code into a `Result`.
    pub(crate) fn check_status(status: Status) -> Result<(), LoadingError> {
        if status == STATUS_OK {
            Ok(())
        } else {
            Err(LoadingError::from_status(status))
        }
    }

    /// Returns the engine status code behind this error, if it came from the engine.
    ///
    /// Errors detected by this crate itself, like [`LoadingError::EmptyInput`],
    /// return `None`.
    pub fn engine_status(&self) -> Option<i32> {
        match *self {
            LoadingError::NotUtf8 => Some(STATUS_NOT_AN_UTF8_STR),
            LoadingError::FileOpenFailed => Some(STATUS_FILE_OPEN_FAILED),
            LoadingError::MalformedGzip => Some(STATUS_MALFORMED_GZIP),
            LoadingError::ElementsLimitReached => Some(STATUS_ELEMENTS_LIMIT_REACHED),
            LoadingError::InvalidSize => Some(STATUS_INVALID_SIZE),
            LoadingError::ParsingFailed => Some(STATUS_PARSING_FAILED),
            LoadingError::Unknown(code) => Some(code),
            LoadingError::EmptyInput | LoadingError::Released => None,
        }
    }
}

impl error::Error for LoadingError {}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LoadingError::NotUtf8 => write!(f, "not a UTF-8 string"),
            LoadingError::FileOpenFailed => write!(f, "failed to open file"),
            LoadingError::MalformedGzip => write!(f, "malformed gzip"),
            LoadingError::ElementsLimitReached => write!(f, "elements limit reached"),
            LoadingError::InvalidSize => write!(f, "invalid size"),
            LoadingError::ParsingFailed => write!(f, "parsing failed"),
            LoadingError::EmptyInput => write!(f, "empty data"),
            LoadingError::Released => write!(f, "options were already released"),
            LoadingError::Unknown(code) => write!(f, "unknown engine error: {}", code),
        }
    }
}

/// Errors that can happen while rendering an SVG document.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderingError {
    /// A requested or natural size is zero, negative, or too big to allocate.
    InvalidSize(String),

    /// The document has no visible elements.
    NoRenderableContent,

    /// Tried to reference an SVG element that does not exist.
    IdNotFound,

    /// The caller's buffer does not hold exactly `width * height * 4` bytes.
    BufferSize { expected: usize, actual: usize },

    /// The [`crate::RenderTree`] was released before being rendered.
    Released,
}

impl error::Error for RenderingError {}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RenderingError::InvalidSize(ref s) => write!(f, "invalid size: {}", s),
            RenderingError::NoRenderableContent => {
                write!(f, "SVG contains no renderable elements")
            }
            RenderingError::IdNotFound => write!(f, "element id not found"),
            RenderingError::BufferSize { expected, actual } => write!(
                f,
                "buffer has {} bytes but {} are needed",
                actual, expected
            ),
            RenderingError::Released => write!(f, "render tree was already released"),
        }
    }
}

/// Error returned by the one-shot functions [`crate::render`] and friends,
/// which both load and render a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The document could not be loaded.
    Loading(LoadingError),

    /// The document was loaded, but could not be rendered.
    Rendering(RenderingError),
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Loading(ref e) => Some(e),
            Error::Rendering(ref e) => Some(e),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Loading(ref e) => e.fmt(f),
            Error::Rendering(ref e) => e.fmt(f),
        }
    }
}

impl From<LoadingError> for Error {
    fn from(e: LoadingError) -> Error {
        Error::Loading(e)
    }
}

impl From<RenderingError> for Error {
    fn from(e: RenderingError) -> Error {
        Error::Rendering(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_status_codes_map_to_variants() {
        let table = [
            (1, LoadingError::NotUtf8),
            (2, LoadingError::FileOpenFailed),
            (3, LoadingError::MalformedGzip),
            (4, LoadingError::ElementsLimitReached),
            (5, LoadingError::InvalidSize),
            (6, LoadingError::ParsingFailed),
        ];

        for (code, expected) in table {
            let err = LoadingError::from_status(code);
            assert_eq!(err, expected);
            assert_eq!(err.engine_status(), Some(code));
        }
    }

    #[test]
    fn unknown_status_code_is_preserved() {
        let err = LoadingError::from_status(42);
        assert_eq!(err, LoadingError::Unknown(42));
        assert_eq!(err.engine_status(), Some(42));
        assert_eq!(err.to_string(), "unknown engine error: 42");

        assert_eq!(LoadingError::from_status(-7), LoadingError::Unknown(-7));
    }

    #[test]
    fn ok_status_is_not_an_error() {
        assert_eq!(LoadingError::check_status(STATUS_OK), Ok(()));
        assert_eq!(
            LoadingError::check_status(STATUS_MALFORMED_GZIP),
            Err(LoadingError::MalformedGzip)
        );
    }

    #[test]
    fn local_errors_have_no_engine_status() {
        assert_eq!(LoadingError::EmptyInput.engine_status(), None);
        assert_eq!(LoadingError::Released.engine_status(), None);
    }

    #[test]
    fn umbrella_error_keeps_the_kind() {
        let e: Error = RenderingError::IdNotFound.into();
        assert!(matches!(e, Error::Rendering(RenderingError::IdNotFound)));
        assert_eq!(e.to_string(), "element id not found");

        let e: Error = LoadingError::EmptyInput.into();
        assert!(matches!(e, Error::Loading(LoadingError::EmptyInput)));
    }
}
