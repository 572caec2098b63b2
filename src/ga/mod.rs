//! Genetic algorithm for the travelling-salesman problem.
//!
//! The engine evolves a population of [`Tour`]s over a [`DistanceMatrix`]
//! using tournament selection, ordered crossover and segment-reversal
//! mutation. It keeps the best tour ever seen in a [`HallOfFame`] and logs
//! per-generation statistics in a [`Logbook`].
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (sizes, rates, budget, limits)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final population, hall of fame, log and termination reason
//!
//! # Submodules
//!
//! - [`operators`]: Ordered crossover and segment-reversal mutation
//! - [`selection`]: Tournament selection
//! - [`trials`]: Repeated independent runs with summary statistics
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
mod fitness;
mod hall_of_fame;
mod matrix;
pub mod operators;
mod runner;
pub mod selection;
mod stats;
pub mod trials;
mod types;

pub use config::{GaConfig, UNLIMITED_TIME_SECS};
pub use fitness::{evaluate_in_place, evaluate_invalid, evaluate_tour};
pub use hall_of_fame::HallOfFame;
pub use matrix::DistanceMatrix;
pub use runner::{GaResult, GaRunner, TerminationReason, STAGNATION_TOLERANCE};
pub use stats::{GenerationRecord, Logbook};
pub use trials::{run_trials, TrialSummary};
pub use types::{is_permutation, Tour};
