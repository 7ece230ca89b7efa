use nalgebra::Point2;
use num::Float;
use std::ops::Range;

use crate::error::{PipError, PipResult};
use crate::Coord;

/// Largest number of features a dataset may hold; one bit per feature in a
/// `u32` mask.
pub const MAX_FEATURES: usize = u32::BITS as usize;

/// A flattened, immutable collection of polygons (features).
///
/// Vertices of every ring of every feature live in two shared coordinate
/// buffers. `ring_end[r]` is the exclusive end of ring `r` in those buffers,
/// and `feature_end[f]` is the exclusive end of feature `f` in the ring list.
/// Rings are not closed implicitly: an edge only joins consecutive vertices,
/// so a closed ring repeats its first vertex at the end. Rings after the
/// first in a feature act as holes under the even-odd rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonDataset<T: Coord> {
    vertex_x: Vec<T>,
    vertex_y: Vec<T>,
    ring_end: Vec<usize>,
    feature_end: Vec<usize>,
}

impl<T: Coord> PolygonDataset<T> {
    pub fn new(
        vertex_x: Vec<T>,
        vertex_y: Vec<T>,
        ring_end: Vec<usize>,
        feature_end: Vec<usize>,
    ) -> PipResult<PolygonDataset<T>> {
        if vertex_x.len() != vertex_y.len() {
            return Err(PipError::invalid(format!(
                "{} x coordinates but {} y coordinates",
                vertex_x.len(),
                vertex_y.len()
            )));
        }

        let mut start = 0;
        for (r, &end) in ring_end.iter().enumerate() {
            if end <= start || end - start < 2 {
                return Err(PipError::invalid(format!(
                    "ring {} spans [{}, {}), a ring needs at least 2 vertices",
                    r, start, end
                )));
            }
            start = end;
        }
        if start > vertex_x.len() {
            return Err(PipError::invalid(format!(
                "ring offsets reach {} but only {} vertices exist",
                start,
                vertex_x.len()
            )));
        }

        let mut start = 0;
        for (f, &end) in feature_end.iter().enumerate() {
            if end <= start {
                return Err(PipError::invalid(format!(
                    "feature {} spans rings [{}, {}), a feature needs at least 1 ring",
                    f, start, end
                )));
            }
            start = end;
        }
        if start > ring_end.len() {
            return Err(PipError::invalid(format!(
                "feature offsets reach {} but only {} rings exist",
                start,
                ring_end.len()
            )));
        }

        if feature_end.len() > MAX_FEATURES {
            return Err(PipError::invalid(format!(
                "{} features exceed the limit of {}",
                feature_end.len(),
                MAX_FEATURES
            )));
        }

        log::debug!(
            "Built polygon dataset: {} features, {} rings, {} vertices",
            feature_end.len(),
            ring_end.len(),
            vertex_x.len()
        );

        Ok(PolygonDataset {
            vertex_x,
            vertex_y,
            ring_end,
            feature_end,
        })
    }

    /// Flattens nested features (feature -> rings -> vertices) and validates
    /// the result with [`PolygonDataset::new`].
    pub fn from_features(features: Vec<Vec<Vec<Point2<T>>>>) -> PipResult<PolygonDataset<T>> {
        let mut vertex_x = vec![];
        let mut vertex_y = vec![];
        let mut ring_end = vec![];
        let mut feature_end = Vec::with_capacity(features.len());

        for rings in features {
            for ring in rings {
                for point in ring {
                    vertex_x.push(point.x);
                    vertex_y.push(point.y);
                }
                ring_end.push(vertex_x.len());
            }
            feature_end.push(ring_end.len());
        }

        PolygonDataset::new(vertex_x, vertex_y, ring_end, feature_end)
    }

    pub fn num_features(&self) -> usize {
        self.feature_end.len()
    }

    pub fn num_rings(&self) -> usize {
        self.ring_end.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_x.len()
    }

    /// Ring indices belonging to feature `f`.
    pub fn feature_rings(&self, f: usize) -> PipResult<Range<usize>> {
        if f >= self.num_features() {
            return Err(PipError::FeatureIndexOutOfRange {
                index: f,
                num_features: self.num_features(),
            });
        }
        let start = if f == 0 { 0 } else { self.feature_end[f - 1] };
        Ok(start..self.feature_end[f])
    }

    /// Ring index ranges of every feature, in feature order.
    pub fn features(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let starts = std::iter::once(0).chain(self.feature_end.iter().copied());
        starts.zip(self.feature_end.iter().copied()).map(|(start, end)| start..end)
    }

    /// Vertex indices belonging to ring `r`, or `None` if there is no such
    /// ring.
    pub fn ring_vertices(&self, r: usize) -> Option<Range<usize>> {
        if r >= self.num_rings() {
            return None;
        }
        Some(self.ring_span(r))
    }

    /// `ring_vertices` for a ring index already known to be valid, such as one
    /// taken from a feature's ring range.
    pub(crate) fn ring_span(&self, r: usize) -> Range<usize> {
        let start = if r == 0 { 0 } else { self.ring_end[r - 1] };
        start..self.ring_end[r]
    }

    pub fn vertex(&self, i: usize) -> Option<Point2<T>> {
        let x = self.vertex_x.get(i)?;
        let y = self.vertex_y.get(i)?;
        Some(Point2::new(*x, *y))
    }

    pub fn vertex_x(&self) -> &[T] {
        &self.vertex_x
    }

    pub fn vertex_y(&self) -> &[T] {
        &self.vertex_y
    }

    /// Axis-aligned bounding box `(min, max)` over every vertex referenced by
    /// a ring, or `None` for a dataset without rings.
    pub fn bounds(&self) -> Option<(Point2<T>, Point2<T>)> {
        let used = self.ring_end.last().copied().unwrap_or(0);
        if used == 0 {
            return None;
        }

        let xs = &self.vertex_x[..used];
        let ys = &self.vertex_y[..used];
        let min = Point2::new(
            xs.iter().copied().fold(T::infinity(), Float::min),
            ys.iter().copied().fold(T::infinity(), Float::min),
        );
        let max = Point2::new(
            xs.iter().copied().fold(T::neg_infinity(), Float::max),
            ys.iter().copied().fold(T::neg_infinity(), Float::max),
        );

        Some((min, max))
    }
}
