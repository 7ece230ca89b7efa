use clap::Parser;
use nalgebra::Point2;
use pip_oracle::{evaluate, evaluate_par, PipError, PolygonDataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Cross-checks sequential and parallel point-in-polygon masks on random data
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of polygons to generate (at most 32)
    #[clap(short, long, default_value_t = 8)]
    features: usize,
    /// Number of random points to test
    #[clap(short, long, default_value_t = 100_000)]
    points: usize,
    /// Side length of the square area polygons are placed in
    #[clap(short, long, default_value_t = 1000.)]
    extent: f64,
    /// Seed for the random generator
    #[clap(short, long, default_value_t = 0)]
    seed: u64,
}

/// Closed square ring around `center`, counter-clockwise unless `reverse`.
fn square_ring(center: Point2<f64>, half: f64, reverse: bool) -> Vec<Point2<f64>> {
    let mut ring = vec![
        Point2::new(center.x - half, center.y - half),
        Point2::new(center.x + half, center.y - half),
        Point2::new(center.x + half, center.y + half),
        Point2::new(center.x - half, center.y + half),
        Point2::new(center.x - half, center.y - half),
    ];
    if reverse {
        ring.reverse();
    }
    ring
}

/// Usable placement extent: finite, and at least 1 so polygon sizes stay
/// positive.
fn checked_extent(extent: f64) -> Option<f64> {
    if extent.is_finite() {
        Some(extent.max(1.))
    } else {
        None
    }
}

fn gen_dataset(
    rng: &mut StdRng,
    features: usize,
    extent: f64,
) -> Result<PolygonDataset<f64>, PipError> {
    let max_half = (extent / 4.).max(2.);

    let features = (0..features)
        .map(|_| {
            let center = Point2::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent));
            let half = rng.gen_range(1.0..max_half);
            let hole = half * rng.gen_range(0.2..0.6);
            vec![square_ring(center, half, false), square_ring(center, hole, true)]
        })
        .collect();

    PolygonDataset::from_features(features)
}

fn main() -> Result<(), PipError> {
    env_logger::init();
    let args = Args::parse();

    let extent = match checked_extent(args.extent) {
        Some(extent) => extent,
        None => {
            eprintln!("--extent must be a finite number, got {}", args.extent);
            std::process::exit(2);
        }
    };
    let mut rng = StdRng::seed_from_u64(args.seed);
    let dataset = gen_dataset(&mut rng, args.features, extent)?;

    let (min, max) = dataset
        .bounds()
        .unwrap_or((Point2::new(0., 0.), Point2::new(extent, extent)));
    let points = (0..args.points)
        .map(|_| Point2::new(rng.gen_range(min.x..=max.x), rng.gen_range(min.y..=max.y)))
        .collect::<Vec<_>>();

    println!(
        "Generated {} polygons ({} rings, {} vertices) and {} points",
        dataset.num_features(),
        dataset.num_rings(),
        dataset.num_vertices(),
        points.len()
    );

    let start = Instant::now();
    let sequential = evaluate(&points, &dataset);
    println!("Sequential: {}", humantime::format_duration(start.elapsed()));

    let start = Instant::now();
    let parallel = evaluate_par(&points, &dataset);
    println!(
        "Parallel ({} threads): {}",
        rayon::current_num_threads(),
        humantime::format_duration(start.elapsed())
    );

    let hits = sequential.iter().filter(|&&mask| mask != 0).count();
    println!("{} of {} points inside at least one polygon", hits, points.len());

    let mut mismatches = 0;
    for (i, (a, b)) in sequential.iter().zip(&parallel).enumerate() {
        if a != b {
            log::error!("point {}: sequential {:#034b}, parallel {:#034b}", i, a, b);
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        println!("{} masks differ", mismatches);
        std::process::exit(1);
    }

    println!("All masks match");
    Ok(())
}
