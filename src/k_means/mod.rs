mod algorithm;
mod errors;
mod hyperparams;

pub use algorithm::KMeans;
pub use errors::KMeansParamsError;
pub use hyperparams::{KMeansParams, KMeansValidParams};
