//! A trait for curves parametrized by a scalar.

use crate::Point;

/// A curve parametrized by a scalar.
///
/// If the result is interpreted as a point, this represents a curve.
/// But the result can be interpreted as a vector as well.
pub trait ParamCurve {
    /// Evaluate the curve at parameter `t`.
    ///
    /// Generally `t` is in the range [0..1].
    fn eval(&self, t: f64) -> Point;

    /// The start point.
    fn start(&self) -> Point {
        self.eval(0.0)
    }

    /// The end point.
    fn end(&self) -> Point {
        self.eval(1.0)
    }
}

/// A differentiable parametrized curve.
pub trait ParamCurveDeriv: ParamCurve {
    /// The parametric curve obtained by taking the derivative of this one.
    type DerivResult: ParamCurve;

    /// The derivative of the curve.
    ///
    /// Note that the type of the return value is somewhat inaccurate, as
    /// the derivative of a curve (mapping of param to point) is a mapping
    /// of param to vector.
    fn deriv(&self) -> Self::DerivResult;

    /// The slope dy/dx of the tangent direction at parameter `t`.
    ///
    /// This is the raw ratio of the derivative components. It is not
    /// defined at a vertical tangent: a zero dx produces ±∞ or NaN per
    /// IEEE floating point semantics. Callers that need a robust angle
    /// should prefer [`tangent_angle`](Self::tangent_angle).
    fn slope(&self, t: f64) -> f64 {
        let d = self.deriv().eval(t);
        d.y / d.x
    }

    /// The angle of the tangent direction at parameter `t`, in radians.
    ///
    /// Computed as `atan2` of the derivative components, so it is robust
    /// at vertical tangents.
    fn tangent_angle(&self, t: f64) -> f64 {
        self.deriv().eval(t).to_vec2().atan2()
    }
}

/// A parametrized curve that can have its arc length measured.
pub trait ParamCurveArclen: ParamCurve {
    /// The arc length of the curve.
    ///
    /// The default implementation partitions the parameter range into
    /// `steps` equal pieces and sums the Euclidean distances between
    /// consecutive sample points. The accuracy of this piecewise-linear
    /// approximation scales with `steps`; the chord sum always
    /// underestimates the true length of a curved segment.
    fn arclen(&self, steps: usize) -> f64 {
        let mut length = 0.0;
        let mut last = self.start();
        for i in 1..=steps {
            let p = self.eval(i as f64 / steps as f64);
            length += last.distance(p);
            last = p;
        }
        length
    }
}
