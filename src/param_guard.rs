use std::error::Error;

/// A set of hyperparameters whose values have not been checked for validity.
///
/// A reference to the checked hyperparameters can only be obtained after
/// checking has completed, so the fitting routines never see an invalid
/// configuration. The validation done in `check_ref()` and `check()` must be
/// identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: Error;

    /// Checks the hyperparameters and returns a reference to the checked
    /// hyperparameters if successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if
    /// successful
    fn check(self) -> Result<Self::Checked, Self::Error>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}
