//! Sequential point-in-polygon containment, used as a reference when checking
//! accelerated implementations of the same predicate.
//!
//! A [`PolygonDataset`] holds up to 32 polygons (features), each made of one
//! or more rings. [`point_in_polygon`] tests one point against one feature
//! with the even-odd crossing rule, and [`evaluate`] turns many points into
//! `u32` masks with bit `j` set for every feature `j` containing the point.

pub mod batch;
pub mod dataset;
pub mod error;
pub mod pip;

pub use batch::{containment_mask, evaluate, evaluate_par, evaluate_xy};
pub use dataset::{PolygonDataset, MAX_FEATURES};
pub use error::{PipError, PipResult};
pub use pip::point_in_polygon;

/// Coordinate type of points and vertices; implemented for `f32` and `f64`.
pub trait Coord: num::Float + nalgebra::Scalar + Send + Sync {}

impl<T: num::Float + nalgebra::Scalar + Send + Sync> Coord for T {}
