use std::ops::Range;

use crate::dataset::PolygonDataset;
use crate::error::PipResult;
use crate::Coord;

/// Tests whether `(x, y)` lies inside feature `feature` of `dataset` under the
/// even-odd rule.
///
/// A horizontal ray is cast from the point towards `+x` and every edge of
/// every ring of the feature that it crosses flips the result. An edge
/// `(x0, y0)-(x1, y1)` is crossed when `y` falls in the half-open span
/// `[min(y0, y1), max(y0, y1))` and the intercept lies strictly right of `x`.
/// The half-open span counts a ray through a shared vertex exactly once and
/// skips horizontal edges. Parity carries across rings, so a point inside a
/// hole ring ends up outside.
///
/// Points on the boundary resolve deterministically: on an axis-aligned
/// square a point on the left or bottom edge is inside, one on the right or
/// top edge is outside. Comparisons against NaN are false, so a NaN
/// coordinate never crosses an edge and a NaN point is always outside.
pub fn point_in_polygon<T: Coord>(
    x: T,
    y: T,
    dataset: &PolygonDataset<T>,
    feature: usize,
) -> PipResult<bool> {
    let rings = dataset.feature_rings(feature)?;
    let inside = crossing_parity(x, y, dataset, rings);
    log::trace!("pip: feature {} -> {}", feature, inside);
    Ok(inside)
}

/// Parity of ray crossings over the given rings.
pub(crate) fn crossing_parity<T: Coord>(
    x: T,
    y: T,
    dataset: &PolygonDataset<T>,
    rings: Range<usize>,
) -> bool {
    let mut inside = false;

    for r in rings {
        let span = dataset.ring_span(r);
        let xs = &dataset.vertex_x()[span.clone()];
        let ys = &dataset.vertex_y()[span];

        for (px, py) in xs.windows(2).zip(ys.windows(2)) {
            let (x0, x1) = (px[0], px[1]);
            let (y0, y1) = (py[0], py[1]);

            let spans = (y0 <= y && y < y1) || (y1 <= y && y < y0);
            if spans && x < (x1 - x0) * (y - y0) / (y1 - y0) + x0 {
                inside = !inside;
            }
        }
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipError;

    fn four_square() -> PolygonDataset<f64> {
        PolygonDataset::new(
            vec![0., 4., 4., 0., 0.],
            vec![0., 0., 4., 4., 0.],
            vec![5],
            vec![1],
        )
        .unwrap()
    }

    fn square_with_hole() -> PolygonDataset<f32> {
        PolygonDataset::new(
            vec![0., 10., 10., 0., 0., 4., 6., 6., 4., 4.],
            vec![0., 0., 10., 10., 0., 4., 4., 6., 6., 4.],
            vec![5, 10],
            vec![2],
        )
        .unwrap()
    }

    #[test]
    fn interior_and_exterior() {
        let square = four_square();
        assert!(point_in_polygon(2., 2., &square, 0).unwrap());
        assert!(!point_in_polygon(5., 5., &square, 0).unwrap());
        assert!(!point_in_polygon(-1., 2., &square, 0).unwrap());
    }

    #[test]
    fn boundary_points() {
        let square = four_square();
        assert!(point_in_polygon(0., 2., &square, 0).unwrap());
        assert!(!point_in_polygon(4., 2., &square, 0).unwrap());
        assert!(point_in_polygon(2., 0., &square, 0).unwrap());
        assert!(!point_in_polygon(2., 4., &square, 0).unwrap());
        assert!(point_in_polygon(0., 0., &square, 0).unwrap());
        assert!(!point_in_polygon(4., 4., &square, 0).unwrap());
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // Diamond: the ray from (0, 0) passes exactly through the vertex (2, 0).
        let diamond = PolygonDataset::new(
            vec![0., 2., 0., -2., 0.],
            vec![-2., 0., 2., 0., -2.],
            vec![5],
            vec![1],
        )
        .unwrap();
        assert!(point_in_polygon(0., 0., &diamond, 0).unwrap());
        assert!(!point_in_polygon(-3., 0., &diamond, 0).unwrap());
    }

    #[test]
    fn holes() {
        let dataset = square_with_hole();
        assert!(!point_in_polygon(5., 5., &dataset, 0).unwrap());
        assert!(point_in_polygon(1., 1., &dataset, 0).unwrap());
        assert!(!point_in_polygon(11., 5., &dataset, 0).unwrap());
    }

    #[test]
    fn open_ring_is_not_closed() {
        // Same square without the closing vertex: the left edge is missing.
        let open = PolygonDataset::new(
            vec![0., 4., 4., 0.],
            vec![0., 0., 4., 4.],
            vec![4],
            vec![1],
        )
        .unwrap();
        assert!(point_in_polygon(2., 2., &open, 0).unwrap());
        // Only the right edge is crossed.
        assert!(point_in_polygon(-2., 2., &open, 0).unwrap());
    }

    #[test]
    fn nan_is_outside() {
        let square = four_square();
        assert!(!point_in_polygon(f64::NAN, 2., &square, 0).unwrap());
        assert!(!point_in_polygon(2., f64::NAN, &square, 0).unwrap());
    }

    #[test]
    fn feature_out_of_range() {
        let square = four_square();
        assert_eq!(
            point_in_polygon(2., 2., &square, 1),
            Err(PipError::FeatureIndexOutOfRange {
                index: 1,
                num_features: 1
            })
        );
    }
}
