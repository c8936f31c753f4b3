//! Arc-length parameterized queries for 2D Bézier paths.
//!
//! A path made of lines and Bézier curves is parameterized by curve parameter,
//! not by distance: walking `t` from 0 to 1 at constant speed does not move at
//! constant speed along the path. This crate augments a mutable path with
//! queries measured as a *fraction of total arc length* — total length, point
//! and tangent at a fractional distance, and nearest-point-on-path — and keeps
//! the expensive derived data (per-segment lengths, an arc-length index and a
//! point lookup table) in a cache that is invalidated exactly when the path
//! mutates.
//!
//! The central type is [`MeasuredPath`], which owns both the path commands and
//! the cache, so every mutation goes through it and the cache can never be
//! observed stale:
//!
//! ```
//! use pathlen::{MeasuredPath, Point};
//!
//! let mut path = MeasuredPath::new();
//! path.move_to((0.0, 0.0));
//! path.line_to((100.0, 0.0));
//!
//! assert_eq!(path.length(), 100.0);
//! assert_eq!(path.point_at_fraction(0.5), Point::new(50.0, 0.0));
//! ```
//!
//! Nearest-point queries project an arbitrary point onto the path, using a
//! precomputed table of roughly uniformly spaced samples:
//!
//! ```
//! use pathlen::{MeasuredPath, Point};
//!
//! let mut path = MeasuredPath::new();
//! path.move_to((0.0, 0.0));
//! path.line_to((100.0, 0.0));
//!
//! let hit = path.perpendicular_point(Point::new(50.0, 10.0));
//! assert_eq!(hit, Point::new(50.0, 0.0));
//! assert_eq!(path.perpendicular_distance(Point::new(50.0, 10.0)), 10.0);
//! ```
//!
//! The lower-level pieces are public as well: [`BezPath`] and [`PathEl`] for
//! the command list, [`PathSeg`] and the [`ParamCurve`] family of traits for
//! per-primitive math, and [`PathCache`] for callers who want to manage the
//! cache and command list separately. Precision of the length integration and
//! of the nearest-point sampling is controlled by [`CalculationSettings`].
//!
//! # Coordinate system
//!
//! Slopes and tangent angles are reported for a y-down coordinate system (as
//! is conventional for 2D graphics): [`MeasuredPath::slope_at_fraction`]
//! negates the raw derivative slope and
//! [`MeasuredPath::tangent_angle_at_fraction`] rotates the raw angle by −π/2,
//! so that a path rising visually on screen reports a positive slope.
//!
//! # Concurrency
//!
//! All computation is synchronous and bounded; there is no locking. A path and
//! its cache have a single owner; [`MeasuredPath`] is `!Sync` by construction,
//! so concurrent mutation and query cannot compile.

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
#![allow(clippy::unreadable_literal, clippy::many_single_char_names)]

mod affine;
mod bezpath;
mod cubicbez;
mod line;
mod measure;
mod measured_path;
mod param_curve;
mod point;
mod quadbez;
mod settings;
mod vec2;

pub use crate::affine::*;
pub use crate::bezpath::*;
pub use crate::cubicbez::*;
pub use crate::line::*;
pub use crate::measure::*;
pub use crate::measured_path::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::quadbez::*;
pub use crate::settings::*;
pub use crate::vec2::*;
