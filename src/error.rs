//! Error types shared by every component of the engine.

use thiserror::Error;

/// Errors raised by the TSP genetic algorithm.
///
/// Early exits (time limit, stagnation) are not errors: they are reported
/// through [`TerminationReason`](crate::ga::TerminationReason).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TspGaError {
    /// Invalid parameter or distance matrix shape. Raised before any
    /// generation runs.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A tour is not a permutation of `0..n`, or carries no fitness where
    /// one is required.
    #[error("invalid individual: {0}")]
    InvalidIndividual(String),

    /// The hall of fame was queried before it held any tour.
    #[error("hall of fame is empty")]
    EmptyHallOfFame,

    /// Fitness evaluation produced NaN or infinity.
    #[error("non-finite fitness: {value}")]
    NonFiniteFitness { value: f64 },
}

pub type Result<T> = std::result::Result<T, TspGaError>;
