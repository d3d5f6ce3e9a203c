//! Command line entry point for the full comparison.
//!
//! Usage: `analysis <k> <file>`. Clusters the points with both SymNMF and
//! K-means and prints the silhouette score of each labeling:
//!
//! ```text
//! nmf: 0.xxxx
//! kmeans: 0.xxxx
//! ```
//!
//! Any failure prints a single generic message and exits with a non-zero
//! status.

use std::env;
use std::process;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use symnmf::{compare, io, Error};

/// Fixed seed for the SymNMF initialization, so repeated runs over the same
/// file print the same scores.
const SEED: u64 = 1234;

fn run(args: &[String]) -> Result<(), Error> {
    if args.len() != 2 {
        return Err(Error::InputFormat("expected <k> <file>".into()));
    }
    let n_clusters = args[0]
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::InputFormat(format!("'{}' is not a valid cluster count", args[0])))?;
    let points = io::read_points(&args[1])?;

    let rng = Xoshiro256Plus::seed_from_u64(SEED);
    let comparison = compare(&points, n_clusters, rng)?;
    println!("nmf: {:.4}", comparison.symnmf);
    println!("kmeans: {:.4}", comparison.kmeans);
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if run(&args).is_err() {
        println!("An Error Has Occurred");
        process::exit(1);
    }
}
