use nalgebra::Point2;
use rayon::prelude::*;

use crate::dataset::PolygonDataset;
use crate::error::{PipError, PipResult};
use crate::pip::crossing_parity;
use crate::Coord;

/// Containment mask of a single point: bit `j` is set iff the point lies
/// inside feature `j`.
pub fn containment_mask<T: Coord>(x: T, y: T, dataset: &PolygonDataset<T>) -> u32 {
    dataset
        .features()
        .enumerate()
        .filter(|(_, rings)| crossing_parity(x, y, dataset, rings.clone()))
        .fold(0, |mask, (j, _)| mask | (1u32 << j))
}

/// One containment mask per point, in input order.
pub fn evaluate<T: Coord>(points: &[Point2<T>], dataset: &PolygonDataset<T>) -> Vec<u32> {
    log::debug!(
        "Evaluating {} points against {} features",
        points.len(),
        dataset.num_features()
    );

    points
        .iter()
        .map(|p| containment_mask(p.x, p.y, dataset))
        .collect()
}

/// Same as [`evaluate`] for points given as parallel coordinate slices.
pub fn evaluate_xy<T: Coord>(
    xs: &[T],
    ys: &[T],
    dataset: &PolygonDataset<T>,
) -> PipResult<Vec<u32>> {
    if xs.len() != ys.len() {
        return Err(PipError::MismatchedPointArrays {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }

    log::debug!(
        "Evaluating {} points against {} features",
        xs.len(),
        dataset.num_features()
    );

    Ok(xs
        .iter()
        .zip(ys)
        .map(|(&x, &y)| containment_mask(x, y, dataset))
        .collect())
}

/// Same as [`evaluate`], with points spread over the rayon thread pool.
/// Every mask depends only on its own point, so the output is identical.
pub fn evaluate_par<T: Coord>(points: &[Point2<T>], dataset: &PolygonDataset<T>) -> Vec<u32> {
    log::debug!(
        "Evaluating {} points against {} features on {} threads",
        points.len(),
        dataset.num_features(),
        rayon::current_num_threads()
    );

    points
        .par_iter()
        .map(|p| containment_mask(p.x, p.y, dataset))
        .collect()
}
