use thiserror::Error;

pub type RgResult<T> = Result<T, RgError>;

/// Failures of the shared numerics; the engine wraps them as calculation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RgError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("No convergence: {what} after {iterations} iterations")]
    NoConvergence { what: &'static str, iterations: usize },

    /// An engine error carried across the core boundary.
    #[error("Invariant violated: {what}")]
    Invariant { what: String },
}
