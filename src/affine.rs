//! Affine transforms.

use std::ops::{Mul, MulAssign};

use crate::{Point, Vec2};

/// A 2D affine transform.
///
/// The coefficients are in the same order as `CGAffineTransform` and the SVG
/// `matrix()` function: `[a, b, c, d, e, f]`, mapping a point `(x, y)` to
/// `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// Construct an affine transform from coefficients.
    #[inline]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// An affine transform representing uniform scaling.
    #[inline]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, s, 0.0, 0.0])
    }

    /// An affine transform representing rotation.
    ///
    /// The convention for rotation is that a positive angle rotates a
    /// positive X direction into positive Y. Thus, in a Y-down coordinate
    /// system (as is common for graphics), it is a clockwise rotation, and
    /// in Y-up (traditional for math), it is anti-clockwise.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        let s = th.sin();
        let c = th.cos();
        Affine([c, s, -s, c, 0.0, 0.0])
    }

    /// An affine transform representing translation.
    #[inline]
    pub fn translate<V: Into<Vec2>>(v: V) -> Affine {
        let v = v.into();
        Affine([1.0, 0.0, 0.0, 1.0, v.x, v.y])
    }

    /// Get the coefficients of the transform.
    #[inline]
    pub const fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// The translation vector, if this transform is a pure translation.
    ///
    /// Returns `Some` exactly when the linear part of the transform is the
    /// identity, i.e. there is no scale, rotation or skew component. The
    /// identity transform counts as a translation by zero.
    ///
    /// A pure translation commutes with arc-length measurement, which lets
    /// cached derived data be shifted in place instead of recomputed; see
    /// [`PathCache::translate`](crate::PathCache::translate).
    #[inline]
    pub fn translation_only(self) -> Option<Vec2> {
        let [a, b, c, d, e, f] = self.0;
        if (a, b, c, d) == (1.0, 0.0, 0.0, 1.0) {
            Some(Vec2::new(e, f))
        } else {
            None
        }
    }
}

impl Default for Affine {
    #[inline]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        Point::new(
            self.0[0] * other.x + self.0[2] * other.y + self.0[4],
            self.0[1] * other.x + self.0[3] * other.y + self.0[5],
        )
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        Affine([
            self.0[0] * other.0[0] + self.0[2] * other.0[1],
            self.0[1] * other.0[0] + self.0[3] * other.0[1],
            self.0[0] * other.0[2] + self.0[2] * other.0[3],
            self.0[1] * other.0[2] + self.0[3] * other.0[3],
            self.0[0] * other.0[4] + self.0[2] * other.0[5] + self.0[4],
            self.0[1] * other.0[4] + self.0[3] * other.0[5] + self.0[5],
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, Point, Vec2};
    use std::f64::consts::PI;

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{:?} != {:?}", p0, p1);
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(PI / 2.0) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
    }

    #[test]
    fn affine_mul() {
        let a1 = Affine::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let a2 = Affine::new([0.1, 1.2, 2.3, 3.4, 4.5, 5.6]);

        let px = Point::new(1.0, 0.0);
        let py = Point::new(0.0, 1.0);
        assert_near(a1 * (a2 * px), (a1 * a2) * px);
        assert_near(a1 * (a2 * py), (a1 * a2) * py);
    }

    #[test]
    fn translation_only() {
        assert_eq!(
            Affine::translate((3.0, -4.0)).translation_only(),
            Some(Vec2::new(3.0, -4.0))
        );
        assert_eq!(Affine::IDENTITY.translation_only(), Some(Vec2::ZERO));
        assert_eq!(Affine::scale(2.0).translation_only(), None);
        assert_eq!(Affine::rotate(0.5).translation_only(), None);
        // A full turn is numerically close to the identity but not exact,
        // so it is not treated as a translation.
        assert_eq!(Affine::rotate(2.0 * PI).translation_only(), None);
    }
}
