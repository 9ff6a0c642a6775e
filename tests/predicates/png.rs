use png::Decoder;
use predicates::prelude::*;
use predicates::reflection::{Case, PredicateReflection, Product};
use std::fmt;

/// Checks that a byte buffer decodes as a PNG file, optionally of a given size.
#[derive(Debug)]
pub struct PngPredicate {
    size: Option<(u32, u32)>,
}

impl PngPredicate {
    pub fn new() -> PngPredicate {
        PngPredicate { size: None }
    }

    pub fn with_size(self, width: u32, height: u32) -> PngPredicate {
        PngPredicate {
            size: Some((width, height)),
        }
    }

    fn decode_size(data: &[u8]) -> Result<(u32, u32), png::DecodingError> {
        let reader = Decoder::new(data).read_info()?;
        let info = reader.info();
        Ok((info.width, info.height))
    }

    fn size_matches(&self, actual: (u32, u32)) -> bool {
        self.size.map_or(true, |expected| expected == actual)
    }
}

impl Predicate<[u8]> for PngPredicate {
    fn eval(&self, data: &[u8]) -> bool {
        match Self::decode_size(data) {
            Ok(actual) => self.size_matches(actual),
            Err(_) => false,
        }
    }

    fn find_case<'a>(&'a self, expected: bool, data: &[u8]) -> Option<Case<'a>> {
        let (actual, product) = match Self::decode_size(data) {
            Ok((w, h)) => (
                self.size_matches((w, h)),
                Product::new("Size", format!("{w} x {h}")),
            ),
            Err(e) => (false, Product::new("Error", e)),
        };

        if actual == expected {
            Some(Case::new(Some(self), actual).add_product(product))
        } else {
            None
        }
    }
}

impl PredicateReflection for PngPredicate {}

impl fmt::Display for PngPredicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.size {
            Some((w, h)) => write!(f, "is a PNG with size {w} x {h}"),
            None => write!(f, "is a PNG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOT_A_PNG: &[u8] = b"GIF89a";

    fn tiny_png() -> Vec<u8> {
        let mut data = Vec::new();
        svgrender::RgbaImage::new(3, 2)
            .unwrap()
            .write_png(&mut data)
            .unwrap();
        data
    }

    #[test]
    fn cases_are_found_only_for_the_expected_outcome() {
        let png = tiny_png();

        let any = PngPredicate::new();
        assert!(any.find_case(true, &png).is_some());
        assert!(any.find_case(false, &png).is_none());

        assert!(any.find_case(false, NOT_A_PNG).is_some());
        assert!(any.find_case(true, NOT_A_PNG).is_none());

        let wrong_size = PngPredicate::new().with_size(4, 4);
        assert!(wrong_size.find_case(false, &png).is_some());
        assert!(wrong_size.find_case(true, &png).is_none());
    }
}
