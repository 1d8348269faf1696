#![deny(warnings)]

//! Cycle simulator: iterates the per-cycle model until the target revenue
//! multiple is reached or the strategy proves unprofitable.

use growth_core::ValidationError;
use growth_econ::EconError;
use thiserror::Error;

mod comparison;
mod simulate;

pub use comparison::{chart_series, compare, ChartPoint, Comparison, Speedup, StrategyRun};
pub use simulate::simulate;

/// Errors that abort a simulation run. No partial results are returned.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SimError {
    #[error("invalid parameter: {0}")]
    Invalid(#[from] ValidationError),
    /// The schedule would need more rows than the configured bound.
    #[error("cycle limit of {limit} exceeded before reaching the target")]
    CycleLimitExceeded { limit: u32 },
    #[error(transparent)]
    Arithmetic(#[from] EconError),
}
