//! 2D affine transforms.

use crate::error::RenderingError;
use crate::rect::Size;

/// A 2D transformation matrix, applied to the document before rasterization.
///
/// The fields map a point `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    /// Scale in X.
    pub a: f32,
    /// Shear in Y.
    pub b: f32,
    /// Shear in X.
    pub c: f32,
    /// Scale in Y.
    pub d: f32,
    /// Translation in X.
    pub e: f32,
    /// Translation in Y.
    pub f: f32,
}

impl Default for Transform {
    #[inline]
    fn default() -> Transform {
        Transform::identity()
    }
}

impl Transform {
    #[inline]
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Transform {
        Transform { a, b, c, d, e, f }
    }

    #[inline]
    pub fn identity() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    #[inline]
    pub fn from_scale(sx: f32, sy: f32) -> Transform {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    #[inline]
    pub fn from_translate(tx: f32, ty: f32) -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Returns the transform that applies `t1` first and then `t2`.
    pub fn multiply(t1: &Transform, t2: &Transform) -> Transform {
        #[allow(clippy::suspicious_operation_groupings)]
        Transform {
            a: t1.a * t2.a + t1.b * t2.c,
            b: t1.a * t2.b + t1.b * t2.d,
            c: t1.c * t2.a + t1.d * t2.c,
            d: t1.c * t2.b + t1.d * t2.d,
            e: t1.e * t2.a + t1.f * t2.c + t2.e,
            f: t1.e * t2.b + t1.f * t2.d + t2.f,
        }
    }

    /// Composes `other` before `self`, so that points go through `other` first.
    #[inline]
    pub fn pre_concat(&self, other: &Transform) -> Transform {
        Transform::multiply(other, self)
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Computes a uniform scale that fits `natural` inside `target`, centered.
    ///
    /// The scale factor is the smaller of the two axis ratios, so the whole
    /// document stays visible and its aspect ratio is preserved; the leftover
    /// space on the other axis is split evenly on both sides.
    ///
    /// Returns [`RenderingError::InvalidSize`] if either size has a dimension that
    /// is not strictly positive.
    ///
    /// ```
    /// use svgrender::{Size, Transform};
    ///
    /// let t = Transform::fit_to(Size::new(50.0, 50.0), Size::new(200.0, 100.0)).unwrap();
    /// assert_eq!(t, Transform::new(2.0, 0.0, 0.0, 2.0, 50.0, 0.0));
    /// ```
    pub fn fit_to(natural: Size, target: Size) -> Result<Transform, RenderingError> {
        if !natural.is_positive() {
            return Err(RenderingError::InvalidSize(format!(
                "natural size {}x{} is not positive",
                natural.width, natural.height
            )));
        }

        if !target.is_positive() {
            return Err(RenderingError::InvalidSize(format!(
                "target size {}x{} is not positive",
                target.width, target.height
            )));
        }

        let (w0, h0) = (f64::from(natural.width), f64::from(natural.height));
        let (w, h) = (f64::from(target.width), f64::from(target.height));

        let scale = (w / w0).min(h / h0);
        let tx = (w - w0 * scale) / 2.0;
        let ty = (h - h0 * scale) / 2.0;

        Ok(Transform::new(
            scale as f32,
            0.0,
            0.0,
            scale as f32,
            tx as f32,
            ty as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn identity_is_default() {
        assert_eq!(Transform::default(), Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0));
        assert!(Transform::default().is_identity());
        assert!(!Transform::from_scale(2.0, 2.0).is_identity());
    }

    #[test]
    fn multiply_with_identity() {
        let t = Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let i = Transform::identity();

        assert_eq!(Transform::multiply(&i, &t), t);
        assert_eq!(Transform::multiply(&t, &i), t);
    }

    #[test]
    fn pre_concat_applies_argument_first() {
        let scale = Transform::from_scale(2.0, 3.0);
        let translate = Transform::from_translate(10.0, 20.0);

        // translate, then scale
        let t = scale.pre_concat(&translate);
        assert_eq!(t.transform_point(1.0, 1.0), (22.0, 63.0));

        // scale, then translate
        let t = translate.pre_concat(&scale);
        assert_eq!(t.transform_point(1.0, 1.0), (12.0, 23.0));
    }

    #[test]
    fn fits_square_into_wide_target() {
        let t = Transform::fit_to(Size::new(50.0, 50.0), Size::new(200.0, 100.0)).unwrap();
        assert_eq!(t, Transform::new(2.0, 0.0, 0.0, 2.0, 50.0, 0.0));
    }

    #[test]
    fn fits_wide_into_square_target() {
        let t = Transform::fit_to(Size::new(100.0, 50.0), Size::new(100.0, 100.0)).unwrap();
        assert_eq!(t, Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 25.0));
    }

    #[test]
    fn same_size_is_identity() {
        let t = Transform::fit_to(Size::new(30.0, 40.0), Size::new(30.0, 40.0)).unwrap();
        assert!(t.is_identity());
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let good = Size::new(10.0, 10.0);

        for bad in [
            Size::new(0.0, 10.0),
            Size::new(10.0, 0.0),
            Size::new(-5.0, 10.0),
            Size::new(f32::NAN, 10.0),
        ] {
            assert!(matches!(
                Transform::fit_to(bad, good),
                Err(RenderingError::InvalidSize(_))
            ));
            assert!(matches!(
                Transform::fit_to(good, bad),
                Err(RenderingError::InvalidSize(_))
            ));
        }
    }

    proptest! {
        #[test]
        fn fitted_content_is_centered_and_touches_one_side(
            w0 in 1.0f32..2000.0,
            h0 in 1.0f32..2000.0,
            w in 1.0f32..2000.0,
            h in 1.0f32..2000.0,
        ) {
            let t = Transform::fit_to(Size::new(w0, h0), Size::new(w, h)).unwrap();

            prop_assert_eq!(t.a, t.d);
            prop_assert_eq!(t.b, 0.0);
            prop_assert_eq!(t.c, 0.0);

            let fitted_w = f64::from(w0) * f64::from(t.a);
            let fitted_h = f64::from(h0) * f64::from(t.d);
            let eps = 1e-3 * f64::from(w.max(h));

            prop_assert!(fitted_w <= f64::from(w) + eps);
            prop_assert!(fitted_h <= f64::from(h) + eps);
            prop_assert!(
                approx_eq!(f64, fitted_w, f64::from(w), epsilon = eps)
                    || approx_eq!(f64, fitted_h, f64::from(h), epsilon = eps)
            );

            prop_assert!(t.e >= -1e-3 && t.f >= -1e-3);
            prop_assert!(approx_eq!(f64, 2.0 * f64::from(t.e) + fitted_w, f64::from(w), epsilon = eps));
            prop_assert!(approx_eq!(f64, 2.0 * f64::from(t.f) + fitted_h, f64::from(h), epsilon = eps));
        }
    }
}
