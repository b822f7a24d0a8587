//! Clusters randomly generated vectors and prints the result.
//!
//! Usage: `kmeans_demo [dimension] [count] [k] [epsilon] [seed]`

use std::env;
use std::error::Error;
use std::str::FromStr;

use lloyd::{kmeans, KMeansConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Uniform};

fn arg<T: FromStr>(args: &[String], index: usize, default: T) -> Result<T, String> {
    match args.get(index) {
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("could not parse argument {} ({:?})", index, raw)),
        None => Ok(default),
    }
}

/// `count` vectors of length `dimension` with coordinates uniform in [0, 10).
fn generate_vectors(dimension: usize, count: usize, rng: &mut ChaCha20Rng) -> Vec<Vec<f64>> {
    let coords = Uniform::new(0.0, 10.0);
    (0..count)
        .map(|_| (0..dimension).map(|_| coords.sample(rng)).collect())
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let dimension: usize = arg(&args, 0, 2)?;
    let count: usize = arg(&args, 1, 1000)?;
    let k: usize = arg(&args, 2, 3)?;
    let epsilon: f64 = arg(&args, 3, 0.001)?;
    let seed: Option<u64> = args.get(4).map(|s| s.parse()).transpose()?;

    // Fixed sample: two obvious groups.
    let sample = vec![
        vec![1.0, 1.0],
        vec![2.0, 2.0],
        vec![9.0, 8.0],
        vec![10.0, 9.0],
    ];
    let result = kmeans(&sample, &KMeansConfig::new(2).with_epsilon(0.001))?;
    for (i, (members, centroid)) in result.clusters.iter().zip(&result.centroids).enumerate() {
        println!("Cluster {} centroid: {:?}", i, centroid);
        println!("Cluster {} members: {:?}", i, members);
    }
    println!();

    let mut rng = match seed {
        Some(s) => ChaCha20Rng::seed_from_u64(s),
        None => ChaCha20Rng::from_entropy(),
    };
    let data = generate_vectors(dimension, count, &mut rng);

    let mut config = KMeansConfig::new(k).with_epsilon(epsilon).with_parallel(true);
    if let Some(s) = seed {
        config = config.with_seed(s);
    }
    let result = kmeans(&data, &config)?;

    println!(
        "Clustered {} vectors of dimension {} into {} clusters in {} iterations",
        count, dimension, k, result.iterations
    );
    println!("Inertia: {:.4}", result.inertia());
    for (i, (members, centroid)) in result.clusters.iter().zip(&result.centroids).enumerate() {
        let preview: Vec<String> = centroid.iter().take(4).map(|x| format!("{:.3}", x)).collect();
        println!(
            "Cluster {}: {} vectors, centroid [{}{}]",
            i,
            members.len(),
            preview.join(", "),
            if centroid.len() > 4 { ", ..." } else { "" }
        );
    }

    Ok(())
}
