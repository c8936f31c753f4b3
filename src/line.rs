//! Lines.

use std::ops::Mul;

use crate::{Affine, ParamCurve, ParamCurveArclen, ParamCurveDeriv, Point};

/// A single line.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// The line's start point.
    pub p0: Point,
    /// The line's end point.
    pub p1: Point,
}

impl Line {
    /// Create a new line.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P) -> Line {
        Line {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The midpoint of the line.
    #[inline]
    pub fn midpoint(&self) -> Point {
        self.p0.midpoint(self.p1)
    }

    /// Is this line finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.p0.is_finite() && self.p1.is_finite()
    }
}

impl ParamCurve for Line {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        self.p0.lerp(self.p1, t)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p1
    }
}

impl ParamCurveDeriv for Line {
    type DerivResult = ConstPoint;

    #[inline]
    fn deriv(&self) -> ConstPoint {
        ConstPoint((self.p1 - self.p0).to_point())
    }
}

impl ParamCurveArclen for Line {
    /// The length of a line is closed form; the step count is ignored.
    #[inline]
    fn arclen(&self, _steps: usize) -> f64 {
        (self.p1 - self.p0).hypot()
    }
}

/// A trivial "curve" that is just a constant.
#[derive(Clone, Copy, Debug)]
pub struct ConstPoint(Point);

impl ParamCurve for ConstPoint {
    #[inline]
    fn eval(&self, _t: f64) -> Point {
        self.0
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, other: Line) -> Line {
        Line {
            p0: self * other.p0,
            p1: self * other.p1,
        }
    }
}

impl From<(Point, Point)> for Line {
    #[inline]
    fn from((p0, p1): (Point, Point)) -> Line {
        Line::new(p0, p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::float_cmp)]
    fn line_eval() {
        let l = Line::new((0.0, 0.0), (2.0, 2.0));
        assert_eq!(l.eval(0.5), Point::new(1.0, 1.0));
        assert_eq!(l.start(), l.p0);
        assert_eq!(l.end(), l.p1);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn line_arclen() {
        let l = Line::new((0.0, 0.0), (3.0, 4.0));
        assert_eq!(l.arclen(1), 5.0);
        // The step count plays no role for lines.
        assert_eq!(l.arclen(100), 5.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn line_slope() {
        let l = Line::new((0.0, 100.0), (100.0, 0.0));
        assert_eq!(l.slope(0.3), -1.0);

        // A vertical line has no slope; the division is not guarded.
        let vertical = Line::new((10.0, 0.0), (10.0, 50.0));
        assert!(vertical.slope(0.5).is_infinite());
        assert_eq!(
            vertical.tangent_angle(0.5),
            std::f64::consts::FRAC_PI_2
        );
    }
}
