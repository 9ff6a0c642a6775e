pub mod png;

/// Predicates to check that some output ([u8]) is of a certain file type
pub mod file {
    use super::png::PngPredicate;

    pub fn is_png() -> PngPredicate {
        PngPredicate::new()
    }
}
