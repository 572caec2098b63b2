//! Time- and convergence-bounded genetic algorithm for the travelling-salesman
//! problem.
//!
//! Given a full pairwise [`DistanceMatrix`](ga::DistanceMatrix), the engine
//! evolves candidate tours and returns the best one it found, its cost, and
//! a per-generation log. A run ends when one of these happens first:
//!
//! - **Budget**: the configured number of generations has run.
//! - **Time limit**: a wall-clock limit or caller deadline has passed.
//!   Checked between generations, never mid-generation.
//! - **Stagnation**: the population's mean cost stopped improving over a
//!   trailing window of generations.
//!
//! Fitness evaluation is the only parallel step (rayon, behind the
//! `parallel` feature). Seeded runs are reproducible with or without it.
//!
//! # Example
//!
//! ```
//! use u_tsp_ga::ga::{DistanceMatrix, GaConfig, GaRunner, TerminationReason};
//!
//! let matrix = DistanceMatrix::new(vec![
//!     vec![0.0, 1.0, 2.0, 1.0],
//!     vec![1.0, 0.0, 1.0, 2.0],
//!     vec![2.0, 1.0, 0.0, 1.0],
//!     vec![1.0, 2.0, 1.0, 0.0],
//! ])?;
//! let config = GaConfig::for_nodes(4)
//!     .with_population_size(20)
//!     .with_max_generations(30)
//!     .with_seed(7);
//!
//! let result = GaRunner::run(&matrix, &config)?;
//! assert_eq!(result.termination, TerminationReason::Completed);
//! assert_eq!(result.best_cost()?, 4.0);
//! # Ok::<(), u_tsp_ga::TspGaError>(())
//! ```

pub mod error;
pub mod ga;
pub mod random;

pub use error::{Result, TspGaError};
