//! Command line entry point for the individual matrix goals.
//!
//! Usage: `symnmf <k> <goal> <file>` with goal one of `sym`, `ddg`, `norm`
//! or `symnmf`. The requested matrix is printed as comma-joined rows with
//! four decimal places. Any failure prints a single generic message and
//! exits with a non-zero status.

use std::env;
use std::process;

use symnmf::{graph, io, Error, ParamGuard, SymNmf};

fn run(args: &[String]) -> Result<(), Error> {
    if args.len() != 3 {
        return Err(Error::InputFormat("expected <k> <goal> <file>".into()));
    }
    let n_clusters = parse_cluster_count(&args[0])?;
    let goal = args[1].as_str();
    let points = io::read_points(&args[2])?;

    let output = match goal {
        "sym" => io::format_matrix(&graph::similarity_matrix(&points)),
        "ddg" => {
            let similarity = graph::similarity_matrix(&points);
            io::format_matrix(&graph::degree_matrix(&similarity)?)
        }
        "norm" => io::format_matrix(&graph::normalized_similarity(&points)?),
        "symnmf" => {
            let w = graph::normalized_similarity(&points)?;
            let model = SymNmf::params(n_clusters).check()?.fit(&w)?;
            io::format_matrix(model.association())
        }
        _ => return Err(Error::InputFormat(format!("unknown goal '{}'", goal))),
    };
    print!("{}", output);
    Ok(())
}

/// The cluster count may be written as a whole-valued float ("3.0").
fn parse_cluster_count(field: &str) -> Result<usize, Error> {
    let invalid = || Error::InputFormat(format!("'{}' is not a valid cluster count", field));
    let value = field.trim().parse::<f64>().map_err(|_| invalid())?;
    if value.fract() != 0.0 || value < 0.0 || value > usize::MAX as f64 {
        return Err(invalid());
    }
    Ok(value as usize)
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if run(&args).is_err() {
        println!("An Error Has Occurred");
        process::exit(1);
    }
}
