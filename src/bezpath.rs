//! Bézier paths (up to cubic).

use std::ops::Mul;

use arrayvec::ArrayVec;

use crate::{Affine, CubicBez, Line, ParamCurve, ParamCurveArclen, ParamCurveDeriv, Point, QuadBez};

/// A path built from Bézier segments up to cubic, possibly with multiple subpaths.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

/// A segment of a Bézier path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg {
    /// A line segment.
    Line(Line),
    /// A quadratic bezier segment.
    Quad(QuadBez),
    /// A cubic bezier segment.
    Cubic(CubicBez),
}

impl BezPath {
    /// Create a new path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<PathEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(PathEl::QuadTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Remove all elements from the path.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns `true` if the path contains no drawing elements.
    ///
    /// A path holding only `MoveTo` and `ClosePath` elements is empty in
    /// this sense; it produces no segments.
    pub fn is_empty(&self) -> bool {
        !self
            .0
            .iter()
            .any(|el| matches!(el, PathEl::LineTo(..) | PathEl::QuadTo(..) | PathEl::CurveTo(..)))
    }

    /// Iterate over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = PathSeg> + '_ {
        segments(self.0.iter().copied())
    }

    /// Apply an affine transform to the path.
    pub fn apply_affine(&mut self, affine: Affine) {
        for el in self.0.iter_mut() {
            *el = affine * (*el);
        }
    }
}

/// Transform an iterator over path elements into one over path segments.
///
/// The pen starts at the origin, so a path may begin with a bare `LineTo`.
/// `MoveTo` elements move the pen and emit nothing; `ClosePath` emits
/// nothing and leaves the pen where it is, matching
/// [`decompose`](crate::decompose).
pub fn segments<I: IntoIterator<Item = PathEl>>(elements: I) -> Segments<I::IntoIter> {
    Segments {
        elements: elements.into_iter(),
        last: Point::ZERO,
    }
}

/// An iterator over the segments of a path; see [`segments`].
#[derive(Debug)]
pub struct Segments<I: Iterator<Item = PathEl>> {
    elements: I,
    last: Point,
}

impl<I: Iterator<Item = PathEl>> Iterator for Segments<I> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.elements {
            let seg = match el {
                PathEl::MoveTo(p) => {
                    self.last = p;
                    continue;
                }
                PathEl::LineTo(p) => PathSeg::Line(Line::new(self.last, p)),
                PathEl::QuadTo(p1, p2) => PathSeg::Quad(QuadBez::new(self.last, p1, p2)),
                PathEl::CurveTo(p1, p2, p3) => {
                    PathSeg::Cubic(CubicBez::new(self.last, p1, p2, p3))
                }
                PathEl::ClosePath => continue,
            };
            self.last = seg.end();
            return Some(seg);
        }
        None
    }
}

impl PathSeg {
    /// The slope dy/dx of the tangent direction at parameter `t`.
    ///
    /// Not defined at a vertical tangent; see [`ParamCurveDeriv::slope`].
    pub fn slope(&self, t: f64) -> f64 {
        match *self {
            PathSeg::Line(line) => line.slope(t),
            PathSeg::Quad(quad) => quad.slope(t),
            PathSeg::Cubic(cubic) => cubic.slope(t),
        }
    }

    /// The angle of the tangent direction at parameter `t`, in radians.
    pub fn tangent_angle(&self, t: f64) -> f64 {
        match *self {
            PathSeg::Line(line) => line.tangent_angle(t),
            PathSeg::Quad(quad) => quad.tangent_angle(t),
            PathSeg::Cubic(cubic) => cubic.tangent_angle(t),
        }
    }

    /// The control points of the segment: none for a line, one for a
    /// quadratic, two for a cubic.
    pub fn control_points(&self) -> ArrayVec<Point, 2> {
        let mut points = ArrayVec::new();
        match *self {
            PathSeg::Line(_) => {}
            PathSeg::Quad(quad) => points.push(quad.p1),
            PathSeg::Cubic(cubic) => {
                points.push(cubic.p1);
                points.push(cubic.p2);
            }
        }
        points
    }
}

impl ParamCurve for PathSeg {
    fn eval(&self, t: f64) -> Point {
        match *self {
            PathSeg::Line(line) => line.eval(t),
            PathSeg::Quad(quad) => quad.eval(t),
            PathSeg::Cubic(cubic) => cubic.eval(t),
        }
    }

    fn start(&self) -> Point {
        match *self {
            PathSeg::Line(line) => line.start(),
            PathSeg::Quad(quad) => quad.start(),
            PathSeg::Cubic(cubic) => cubic.start(),
        }
    }

    fn end(&self) -> Point {
        match *self {
            PathSeg::Line(line) => line.end(),
            PathSeg::Quad(quad) => quad.end(),
            PathSeg::Cubic(cubic) => cubic.end(),
        }
    }
}

impl ParamCurveArclen for PathSeg {
    fn arclen(&self, steps: usize) -> f64 {
        match *self {
            PathSeg::Line(line) => line.arclen(steps),
            PathSeg::Quad(quad) => quad.arclen(steps),
            PathSeg::Cubic(cubic) => cubic.arclen(steps),
        }
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = std::iter::Cloned<std::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().cloned()
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        match other {
            PathEl::MoveTo(p) => PathEl::MoveTo(self * p),
            PathEl::LineTo(p) => PathEl::LineTo(self * p),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(self * p1, self * p2),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(self * p1, self * p2, self * p3),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

impl Mul<PathSeg> for Affine {
    type Output = PathSeg;

    fn mul(self, other: PathSeg) -> PathSeg {
        match other {
            PathSeg::Line(line) => PathSeg::Line(self * line),
            PathSeg::Quad(quad) => PathSeg::Quad(self * quad),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(self * cubic),
        }
    }
}

impl Mul<BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: BezPath) -> BezPath {
        BezPath(other.0.iter().map(|&el| self * el).collect())
    }
}

impl<'a> Mul<&'a BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: &BezPath) -> BezPath {
        BezPath(other.0.iter().map(|&el| self * el).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_basic() {
        let mut path = BezPath::new();
        path.move_to((10.0, 10.0));
        path.line_to((20.0, 10.0));
        path.quad_to((25.0, 15.0), (30.0, 10.0));
        path.curve_to((35.0, 5.0), (40.0, 15.0), (45.0, 10.0));

        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0].start(), Point::new(10.0, 10.0));
        assert_eq!(segs[0].end(), Point::new(20.0, 10.0));
        assert_eq!(segs[1].start(), Point::new(20.0, 10.0));
        assert_eq!(segs[2].end(), Point::new(45.0, 10.0));

        assert_eq!(segs[0].control_points().len(), 0);
        assert_eq!(segs[1].control_points().len(), 1);
        assert_eq!(segs[2].control_points().len(), 2);
    }

    #[test]
    fn close_emits_no_segment() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.close_path();

        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 1);

        // A drawing element after the close continues from the line's end,
        // not from the subpath start.
        path.line_to((100.0, 50.0));
        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[1].start(), Point::new(100.0, 0.0));
    }

    #[test]
    fn pen_starts_at_origin() {
        let mut path = BezPath::new();
        path.line_to((100.0, 0.0));

        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].start(), Point::ZERO);
    }

    #[test]
    fn emptiness() {
        let mut path = BezPath::new();
        assert!(path.is_empty());
        path.move_to((1.0, 2.0));
        path.close_path();
        assert!(path.is_empty());
        assert_eq!(path.segments().count(), 0);
        path.line_to((3.0, 4.0));
        assert!(!path.is_empty());
    }

    #[test]
    fn apply_affine() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.apply_affine(Affine::translate((0.0, 5.0)));
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 5.0)),
                PathEl::LineTo(Point::new(10.0, 5.0)),
            ]
        );
    }
}
