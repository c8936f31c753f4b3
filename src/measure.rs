//! The derived-data cache behind the fraction-of-length queries: path
//! decomposition, per-segment lengths, the arc-length index and the
//! nearest-point lookup table.

use std::f64::consts::FRAC_PI_2;
use std::ops::RangeInclusive;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::{
    segments, Affine, CalculationSettings, ParamCurve, ParamCurveArclen, PathEl, PathSeg, Point,
    Vec2,
};

/// One drawn path primitive together with its measured derived data.
///
/// The derived fields are owned by the [`PathCache`] and filled in lazily:
/// the length at construction, the length range by the arc-length index and
/// the lookup table by the nearest-point sampler.
#[derive(Clone, Debug)]
pub struct MeasuredSegment {
    seg: PathSeg,
    length: f64,
    length_range: Option<RangeInclusive<f64>>,
    lookup_table: Option<SmallVec<[Point; 16]>>,
}

impl MeasuredSegment {
    /// Measure a path segment, approximating curved lengths with
    /// `length_steps` linear integration steps.
    pub fn new(seg: PathSeg, length_steps: usize) -> MeasuredSegment {
        let arclen = seg.arclen(length_steps);
        MeasuredSegment {
            seg,
            // A degenerate segment reports length 1 rather than 0, so the
            // ratio math in the arc-length index never divides by zero. The
            // substitution is non-physical and shows up in the total length
            // of paths containing zero-length segments.
            length: if arclen == 0.0 { 1.0 } else { arclen },
            length_range: None,
            lookup_table: None,
        }
    }

    /// The underlying path segment.
    #[inline]
    pub fn seg(&self) -> PathSeg {
        self.seg
    }

    /// The segment's start point.
    #[inline]
    pub fn start(&self) -> Point {
        self.seg.start()
    }

    /// The segment's end point.
    #[inline]
    pub fn end(&self) -> Point {
        self.seg.end()
    }

    /// The segment's control points (empty for a line).
    #[inline]
    pub fn control_points(&self) -> ArrayVec<Point, 2> {
        self.seg.control_points()
    }

    /// The measured length of the segment.
    ///
    /// A geometrically degenerate segment reports 1; see
    /// [`MeasuredSegment::new`].
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The sub-interval of `[0, 1]` of total path length covered by this
    /// segment, or `None` if the arc-length index has not run yet.
    #[inline]
    pub fn length_range(&self) -> Option<RangeInclusive<f64>> {
        self.length_range.clone()
    }

    /// The nearest-point samples of this segment, or `None` if the lookup
    /// table has not been built yet.
    #[inline]
    pub fn lookup_table(&self) -> Option<&[Point]> {
        self.lookup_table.as_deref()
    }

    /// The point at segment-local parameter `t`.
    #[inline]
    pub fn point(&self, t: f64) -> Point {
        self.seg.eval(t)
    }

    /// The raw slope at segment-local parameter `t`; ±∞/NaN at a vertical
    /// tangent.
    #[inline]
    pub fn slope(&self, t: f64) -> f64 {
        self.seg.slope(t)
    }

    /// The raw tangent angle at segment-local parameter `t`, in radians.
    #[inline]
    pub fn tangent_angle(&self, t: f64) -> f64 {
        self.seg.tangent_angle(t)
    }

    fn translate(&mut self, v: Vec2) {
        self.seg = Affine::translate(v) * self.seg;
        if let Some(table) = &mut self.lookup_table {
            for p in table.iter_mut() {
                *p += v;
            }
        }
    }
}

/// Decompose a path's element list into measured segments.
///
/// The pen starts at the origin; `MoveTo` moves it without emitting a
/// segment, and `ClosePath` emits nothing (closing a subpath draws no
/// geometry of its own). Curved segment lengths are measured with
/// `settings.length_precision` integration steps.
pub fn decompose(elements: &[PathEl], settings: CalculationSettings) -> Vec<MeasuredSegment> {
    let steps = settings.length_precision.steps();
    segments(elements.iter().copied())
        .map(|seg| MeasuredSegment::new(seg, steps))
        .collect()
}

/// Cached derived data for one path.
///
/// The cache is created empty, populated lazily by whichever query needs
/// which piece, and fully cleared by [`invalidate`](PathCache::invalidate).
/// It never observes the path itself; callers pass the current element list
/// into every query and must invalidate after any geometry-changing
/// mutation. [`MeasuredPath`](crate::MeasuredPath) packages that contract.
///
/// A pure translation of the path may instead be applied to the cached data
/// in place via [`translate`](PathCache::translate), since all derived
/// ratios are translation invariant.
#[derive(Clone, Debug, Default)]
pub struct PathCache {
    segments: Option<Vec<MeasuredSegment>>,
    total_length: Option<f64>,
    length_ranges_ready: bool,
    lookup_table_ready: bool,
}

impl PathCache {
    /// Create an empty cache.
    pub fn new() -> PathCache {
        PathCache::default()
    }

    /// Whether the segment list has been computed.
    #[inline]
    pub fn segments_computed(&self) -> bool {
        self.segments.is_some()
    }

    /// Whether every segment has been assigned its length range.
    #[inline]
    pub fn length_ranges_ready(&self) -> bool {
        self.length_ranges_ready
    }

    /// Whether every segment has a nearest-point lookup table.
    #[inline]
    pub fn lookup_table_ready(&self) -> bool {
        self.lookup_table_ready
    }

    /// Drop all derived data, returning the cache to its empty state.
    ///
    /// Must be called after any geometry-changing mutation of the path the
    /// cache was built from, before the next query.
    pub fn invalidate(&mut self) {
        self.segments = None;
        self.total_length = None;
        self.length_ranges_ready = false;
        self.lookup_table_ready = false;
    }

    /// Shift every cached coordinate by `v` in place.
    ///
    /// Lengths, length ranges and the ready flags are translation invariant
    /// and stay untouched, so a pure translation of the path does not force
    /// a recompute.
    pub fn translate(&mut self, v: Vec2) {
        if let Some(segments) = &mut self.segments {
            for segment in segments {
                segment.translate(v);
            }
        }
    }

    /// The measured segments of the path, computing them on first access.
    pub fn segments(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
    ) -> &[MeasuredSegment] {
        self.ensure_segments(elements, settings)
    }

    fn ensure_segments(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
    ) -> &mut Vec<MeasuredSegment> {
        self.segments
            .get_or_insert_with(|| decompose(elements, settings))
    }

    fn is_empty_path(&self) -> bool {
        self.segments.as_ref().map_or(true, Vec::is_empty)
    }

    /// The total length of the path; 0 for an empty path.
    pub fn length(&mut self, elements: &[PathEl], settings: CalculationSettings) -> f64 {
        if let Some(length) = self.total_length {
            return length;
        }
        let length = self
            .ensure_segments(elements, settings)
            .iter()
            .map(MeasuredSegment::length)
            .sum();
        self.total_length = Some(length);
        length
    }

    fn ensure_length_ranges(&mut self, elements: &[PathEl], settings: CalculationSettings) {
        if self.length_ranges_ready {
            return;
        }
        let total = self.length(elements, settings);
        if let Some(segments) = &mut self.segments {
            let count = segments.len();
            let mut lo = 0.0;
            for (ix, segment) in segments.iter_mut().enumerate() {
                let mut hi = lo + segment.length / total;
                // The accumulated upper bound can land at 0.9999999999999x;
                // the final range must end at exactly 1.
                if ix == count - 1 {
                    hi = 1.0;
                }
                segment.length_range = Some(lo..=hi);
                lo = hi;
            }
        }
        self.length_ranges_ready = true;
    }

    fn ensure_lookup_table(&mut self, elements: &[PathEl], settings: CalculationSettings) {
        if self.lookup_table_ready {
            return;
        }
        let step = settings.perpendicular_precision.spacing();
        self.ensure_segments(elements, settings);
        if let Some(segments) = &mut self.segments {
            let count = segments.len();
            // The leftover distance of each segment carries into the next,
            // keeping the spacing roughly uniform across joints.
            let mut offset = 0.0;
            for (ix, segment) in segments.iter_mut().enumerate() {
                let mut table = SmallVec::new();
                while offset < segment.length {
                    table.push(segment.point(offset / segment.length));
                    offset += step;
                }
                // The path's true endpoint is always represented.
                if ix == count - 1 && offset - step < segment.length {
                    table.push(segment.point(1.0));
                }
                offset -= segment.length;
                // A segment shorter than the sample spacing still
                // contributes one sample.
                if table.is_empty() {
                    table.push(segment.point(0.5));
                }
                segment.lookup_table = Some(table);
            }
        }
        self.lookup_table_ready = true;
    }

    /// Locate the segment covering fraction `t` and the fraction's position
    /// within it. Requires non-empty, range-ready segments.
    fn find_segment(&self, t: f64) -> (&MeasuredSegment, f64) {
        let t = t.clamp(0.0, 1.0);
        if let Some(segments) = &self.segments {
            for segment in segments {
                if let Some(range) = &segment.length_range {
                    if range.contains(&t) {
                        let (lo, hi) = (*range.start(), *range.end());
                        return (segment, (t - lo) / (hi - lo));
                    }
                }
            }
        }
        unreachable!("length ranges do not partition [0, 1]");
    }

    /// The point at fraction `t` of the path's total length.
    ///
    /// `t` is clamped to `[0, 1]`. Returns [`Point::ZERO`] for an empty path.
    pub fn point_at_fraction(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
        t: f64,
    ) -> Point {
        self.ensure_length_ranges(elements, settings);
        if self.is_empty_path() {
            return Point::ZERO;
        }
        let (segment, local_t) = self.find_segment(t);
        segment.point(local_t)
    }

    /// The slope of the path at fraction `t` of its total length.
    ///
    /// The raw derivative slope is negated: with a downward-increasing
    /// y-axis, a path that visually rises would otherwise report a negative
    /// slope. A vertical tangent yields ±∞/NaN. Returns 0 for an empty path.
    pub fn slope_at_fraction(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
        t: f64,
    ) -> f64 {
        self.ensure_length_ranges(elements, settings);
        if self.is_empty_path() {
            return 0.0;
        }
        let (segment, local_t) = self.find_segment(t);
        -segment.slope(local_t)
    }

    /// The tangent angle, in radians, of the path at fraction `t` of its
    /// total length.
    ///
    /// The raw angle is rotated by −π/2 to compensate for the
    /// downward-increasing y-axis. Returns 0 for an empty path.
    pub fn tangent_angle_at_fraction(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
        t: f64,
    ) -> f64 {
        self.ensure_length_ranges(elements, settings);
        if self.is_empty_path() {
            return 0.0;
        }
        let (segment, local_t) = self.find_segment(t);
        segment.tangent_angle(local_t) - FRAC_PI_2
    }

    /// The closest lookup-table sample to `p`, approximating the foot of
    /// the perpendicular from `p` onto the path.
    ///
    /// Accuracy is bounded by the sample spacing of
    /// `settings.perpendicular_precision`. Ties resolve to the earliest
    /// sample in path order. Returns [`Point::ZERO`] for an empty path.
    pub fn perpendicular_point(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
        p: Point,
    ) -> Point {
        self.ensure_lookup_table(elements, settings);
        let mut closest = (Point::ZERO, f64::MAX);
        if let Some(segments) = &self.segments {
            for segment in segments {
                if let Some(table) = &segment.lookup_table {
                    for &sample in table.iter() {
                        let distance = sample.distance(p);
                        if distance < closest.1 {
                            closest = (sample, distance);
                        }
                    }
                }
            }
        }
        closest.0
    }

    /// The distance from `p` to [`perpendicular_point`](Self::perpendicular_point).
    pub fn perpendicular_distance(
        &mut self,
        elements: &[PathEl],
        settings: CalculationSettings,
        p: Point,
    ) -> f64 {
        self.perpendicular_point(elements, settings, p).distance(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BezPath;

    fn settings() -> CalculationSettings {
        CalculationSettings::default()
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn decompose_measures_lengths() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));
        path.line_to((100.0, 50.0));

        let segments = decompose(path.elements(), settings());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].length(), 100.0);
        assert_eq!(segments[1].length(), 50.0);
        assert!(segments[0].length_range().is_none());
        assert!(segments[0].lookup_table().is_none());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn degenerate_segment_length_is_one() {
        let mut path = BezPath::new();
        path.move_to((5.0, 5.0));
        path.line_to((5.0, 5.0));

        let segments = decompose(path.elements(), settings());
        assert_eq!(segments[0].length(), 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn ranges_partition_unit_interval() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((30.0, 0.0));
        path.line_to((30.0, 40.0));
        path.quad_to((60.0, 60.0), (90.0, 40.0));

        let mut cache = PathCache::new();
        cache.ensure_length_ranges(path.elements(), settings());

        let segments = cache.segments.as_ref().unwrap();
        let mut expected_lo = 0.0;
        for segment in segments {
            let range = segment.length_range().unwrap();
            assert_eq!(*range.start(), expected_lo);
            assert!(range.end() > range.start());
            expected_lo = *range.end();
        }
        // The last upper bound is pinned to exactly 1, not an accumulated
        // float that may fall short.
        assert_eq!(expected_lo, 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn lookup_table_covers_endpoint() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));

        let mut cache = PathCache::new();
        cache.ensure_lookup_table(path.elements(), settings());

        let segments = cache.segments.as_ref().unwrap();
        let table = segments[0].lookup_table().unwrap();
        // Spacing 5 over length 100: samples at 0, 5, …, 95, plus the true
        // endpoint.
        assert_eq!(table.len(), 21);
        assert_eq!(table[0], Point::new(0.0, 0.0));
        assert_eq!(table[20], Point::new(100.0, 0.0));
    }

    #[test]
    fn short_segment_contributes_midpoint() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        // Length 103 leaves a carried offset of 2 for the next segment.
        path.line_to((103.0, 0.0));
        // Shorter than the carried offset; the sample loop skips it.
        path.line_to((103.0, 1.0));
        path.line_to((0.0, 1.0));

        let mut cache = PathCache::new();
        cache.ensure_lookup_table(path.elements(), settings());

        let segments = cache.segments.as_ref().unwrap();
        let table = segments[1].lookup_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0], Point::new(103.0, 0.5));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn translate_shifts_without_recompute() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));

        let mut cache = PathCache::new();
        let length = cache.length(path.elements(), settings());
        cache.ensure_length_ranges(path.elements(), settings());
        cache.ensure_lookup_table(path.elements(), settings());

        cache.translate(Vec2::new(10.0, 20.0));

        assert!(cache.segments_computed());
        assert!(cache.length_ranges_ready());
        assert!(cache.lookup_table_ready());

        let segments = cache.segments.as_ref().unwrap();
        assert_eq!(segments[0].start(), Point::new(10.0, 20.0));
        assert_eq!(segments[0].end(), Point::new(110.0, 20.0));
        assert_eq!(segments[0].lookup_table().unwrap()[0], Point::new(10.0, 20.0));
        // The length and ranges are translation invariant.
        assert_eq!(cache.total_length, Some(length));
        assert!(segments[0].length_range().is_some());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn empty_path_queries() {
        let settings = settings();
        let mut cache = PathCache::new();
        assert_eq!(cache.length(&[], settings), 0.0);
        assert_eq!(cache.point_at_fraction(&[], settings, 0.7), Point::ZERO);
        assert_eq!(cache.slope_at_fraction(&[], settings, 0.5), 0.0);
        assert_eq!(cache.tangent_angle_at_fraction(&[], settings, 0.5), 0.0);
        assert_eq!(
            cache.perpendicular_point(&[], settings, Point::new(5.0, 5.0)),
            Point::ZERO
        );
    }

    #[test]
    fn segments_accessor_is_lazy() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));

        let mut cache = PathCache::new();
        assert!(!cache.segments_computed());
        assert_eq!(cache.segments(path.elements(), settings()).len(), 1);
        assert!(cache.segments_computed());
    }

    #[test]
    fn invalidate_clears_everything() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));

        let mut cache = PathCache::new();
        cache.length(path.elements(), settings());
        cache.point_at_fraction(path.elements(), settings(), 0.5);
        cache.perpendicular_point(path.elements(), settings(), Point::ZERO);
        assert!(cache.segments_computed());

        cache.invalidate();
        assert!(!cache.segments_computed());
        assert!(!cache.length_ranges_ready());
        assert!(!cache.lookup_table_ready());
        assert!(cache.total_length.is_none());
    }
}
