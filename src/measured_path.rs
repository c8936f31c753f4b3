//! A Bézier path bundled with its measurement cache.

use std::cell::RefCell;

use crate::{Affine, BezPath, CalculationSettings, PathCache, PathEl, Point};

/// A mutable Bézier path with cached arc-length queries.
///
/// `MeasuredPath` owns both the command list and the derived-data cache, so
/// every mutation passes through it and the cache is invalidated (or, for a
/// pure translation, shifted in place) before control returns to the caller.
/// Queries therefore always reflect the path's current command sequence.
///
/// Queries take `&self`; the cache is refreshed lazily behind a [`RefCell`].
/// The computation model is single-owner and single-threaded — the type is
/// `!Sync`, so simultaneous mutation and query from multiple threads is
/// rejected at compile time.
///
/// ```
/// use pathlen::{MeasuredPath, Point};
///
/// let mut path = MeasuredPath::new();
/// path.move_to((0.0, 0.0));
/// path.line_to((150.0, 0.0));
/// path.line_to((150.0, 150.0));
///
/// assert_eq!(path.length(), 300.0);
/// // Halfway along the length lands exactly on the joint.
/// assert_eq!(path.point_at_fraction(0.5), Point::new(150.0, 0.0));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MeasuredPath {
    path: BezPath,
    cache: RefCell<PathCache>,
    settings: CalculationSettings,
}

impl MeasuredPath {
    /// Create an empty path with default (balanced) settings.
    pub fn new() -> MeasuredPath {
        MeasuredPath::default()
    }

    /// Create an empty path with the given settings.
    pub fn with_settings(settings: CalculationSettings) -> MeasuredPath {
        MeasuredPath {
            path: BezPath::new(),
            cache: RefCell::new(PathCache::new()),
            settings,
        }
    }

    /// Wrap an existing path.
    pub fn from_path(path: BezPath, settings: CalculationSettings) -> MeasuredPath {
        MeasuredPath {
            path,
            cache: RefCell::new(PathCache::new()),
            settings,
        }
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.path.move_to(p);
        self.cache.get_mut().invalidate();
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.path.line_to(p);
        self.cache.get_mut().invalidate();
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.path.quad_to(p1, p2);
        self.cache.get_mut().invalidate();
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.path.curve_to(p1, p2, p3);
        self.cache.get_mut().invalidate();
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.path.close_path();
        self.cache.get_mut().invalidate();
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.path.push(el);
        self.cache.get_mut().invalidate();
    }

    /// Append the elements of another path (or any element sequence).
    pub fn append<I: IntoIterator<Item = PathEl>>(&mut self, elements: I) {
        self.path.extend(elements);
        self.cache.get_mut().invalidate();
    }

    /// Remove all elements from the path.
    pub fn clear(&mut self) {
        self.path.clear();
        self.cache.get_mut().invalidate();
    }

    /// Apply an affine transform to the path.
    ///
    /// A pure translation is also applied to the cached derived data in
    /// place, preserving it; any transform with a scale, rotation or skew
    /// component invalidates the cache instead.
    pub fn apply_affine(&mut self, affine: Affine) {
        self.path.apply_affine(affine);
        match affine.translation_only() {
            Some(v) => self.cache.get_mut().translate(v),
            None => self.cache.get_mut().invalidate(),
        }
    }

    /// Drop all cached derived data.
    ///
    /// Mutations through this type invalidate automatically; this is for
    /// callers who changed [`settings`](Self::set_settings) and want the new
    /// precision applied to an already-measured path.
    pub fn invalidate(&mut self) {
        self.cache.get_mut().invalidate();
    }

    /// The total length of the path; 0 for an empty path.
    pub fn length(&self) -> f64 {
        self.cache
            .borrow_mut()
            .length(self.path.elements(), self.settings)
    }

    /// The point at fraction `t` of the path's total length.
    ///
    /// `t` is clamped to `[0, 1]`. Returns [`Point::ZERO`] for an empty path.
    pub fn point_at_fraction(&self, t: f64) -> Point {
        self.cache
            .borrow_mut()
            .point_at_fraction(self.path.elements(), self.settings, t)
    }

    /// The slope of the path at fraction `t` of its total length.
    ///
    /// The slope is expressed in context of the positive cartesian x-axis:
    /// for a path starting at `(0, 100)` and ending at `(100, 0)` the result
    /// is `1.0` for any `t`, because the y-axis of the usual 2D graphics
    /// coordinate system grows downward. A vertical tangent yields ±∞/NaN.
    /// Returns 0 for an empty path.
    pub fn slope_at_fraction(&self, t: f64) -> f64 {
        self.cache
            .borrow_mut()
            .slope_at_fraction(self.path.elements(), self.settings, t)
    }

    /// The tangent angle, in radians, of the path at fraction `t` of its
    /// total length.
    ///
    /// The angle is expressed in context of the positive cartesian x-axis
    /// and compensates for the downward-growing y-axis by rotating the raw
    /// derivative angle by −π/2. Returns 0 for an empty path.
    pub fn tangent_angle_at_fraction(&self, t: f64) -> f64 {
        self.cache
            .borrow_mut()
            .tangent_angle_at_fraction(self.path.elements(), self.settings, t)
    }

    /// The closest point on the path to `p`, effectively letting fall a
    /// perpendicular from `p` onto the path and returning the intersection.
    ///
    /// The result is an approximation: the closest of the precomputed
    /// lookup-table samples, with accuracy bounded by
    /// `settings.perpendicular_precision`. Returns [`Point::ZERO`] for an
    /// empty path.
    pub fn perpendicular_point(&self, p: Point) -> Point {
        self.cache
            .borrow_mut()
            .perpendicular_point(self.path.elements(), self.settings, p)
    }

    /// The distance from `p` to the closest point on the path; see
    /// [`perpendicular_point`](Self::perpendicular_point).
    pub fn perpendicular_distance(&self, p: Point) -> f64 {
        self.cache
            .borrow_mut()
            .perpendicular_distance(self.path.elements(), self.settings, p)
    }

    /// The underlying path.
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// The path's elements.
    pub fn elements(&self) -> &[PathEl] {
        self.path.elements()
    }

    /// Unwrap the underlying path, discarding the cache.
    pub fn into_path(self) -> BezPath {
        self.path
    }

    /// The calculation settings in use.
    pub fn settings(&self) -> CalculationSettings {
        self.settings
    }

    /// Replace the calculation settings.
    ///
    /// Already-cached derived data keeps the precision it was computed
    /// with; call [`invalidate`](Self::invalidate) to apply the new settings
    /// to it.
    pub fn set_settings(&mut self, settings: CalculationSettings) {
        self.settings = settings;
    }
}

impl From<BezPath> for MeasuredPath {
    fn from(path: BezPath) -> MeasuredPath {
        MeasuredPath::from_path(path, CalculationSettings::default())
    }
}
