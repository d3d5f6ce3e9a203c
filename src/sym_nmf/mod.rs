mod algorithm;
mod errors;
mod hyperparams;
mod init;

pub use algorithm::{reconstruction_error, SymNmf};
pub use errors::SymNmfParamsError;
pub use hyperparams::{SymNmfParams, SymNmfValidParams};
