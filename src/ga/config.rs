//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::matrix::DistanceMatrix;
use crate::error::{Result, TspGaError};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time limit value that older sweep configurations use to mean "no limit".
///
/// [`GaConfig::with_time_limit_secs`] maps it to `None`, and
/// [`GaConfig::time_limit`] ignores it when set on the field directly.
pub const UNLIMITED_TIME_SECS: f64 = 9999.0;

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 300);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::for_nodes(25)
///     .with_population_size(200)
///     .with_crossover_rate(0.7)
///     .with_mutation_rate(0.2)
///     .with_stagnation_window(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of nodes in every tour. Must equal the matrix dimension.
    pub individual_size: usize,

    /// Number of tours in the population.
    ///
    /// Also sets the tournament size: 5% of this, rounded, at least 1.
    pub population_size: usize,

    /// Probability of applying crossover to each adjacent offspring pair
    /// (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Generations to run after the initial one. 0 evaluates the initial
    /// population and stops.
    pub max_generations: usize,

    /// Trailing generations inspected for mean-cost improvement.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_window: usize,

    /// Optional wall-clock time limit in seconds.
    ///
    /// Checked once per generation, after evaluation, so a run may overshoot
    /// by one generation's worth of work. `Some(0.0)` aborts before the
    /// first generation. `None` disables time-based termination.
    pub time_limit_secs: Option<f64>,

    /// Keep a snapshot of every generation's population in the result.
    ///
    /// Memory grows as generations × population × nodes.
    pub keep_history: bool,

    /// Whether to evaluate tours in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results do not depend
    /// on this setting.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            individual_size: 10,
            population_size: 100,
            crossover_rate: 0.7,
            mutation_rate: 0.2,
            max_generations: 300,
            stagnation_window: 0,
            time_limit_secs: None,
            keep_history: false,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Default configuration for tours over `n` nodes.
    pub fn for_nodes(n: usize) -> Self {
        Self {
            individual_size: n,
            ..Self::default()
        }
    }

    /// Sets the number of nodes per tour.
    pub fn with_individual_size(mut self, n: usize) -> Self {
        self.individual_size = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the generation budget.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the stagnation window (0 to disable).
    pub fn with_stagnation_window(mut self, window: usize) -> Self {
        self.stagnation_window = window;
        self
    }

    /// Sets the wall-clock time limit in seconds.
    ///
    /// [`UNLIMITED_TIME_SECS`] clears the limit.
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit_secs = if secs == UNLIMITED_TIME_SECS {
            None
        } else {
            Some(secs)
        };
        self
    }

    /// Removes the time limit.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit_secs = None;
        self
    }

    /// Enables or disables per-generation population snapshots.
    pub fn with_keep_history(mut self, keep: bool) -> Self {
        self.keep_history = keep;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs: small population, short budget.
    ///
    /// - Population: 50, Generations: 100, Stagnation window: 10
    pub fn fast(n: usize) -> Self {
        Self {
            individual_size: n,
            population_size: 50,
            max_generations: 100,
            stagnation_window: 10,
            ..Self::default()
        }
    }

    /// Preset for a moderate trade-off between quality and time.
    ///
    /// - Population: 150, Generations: 300, Stagnation window: 20
    pub fn balanced(n: usize) -> Self {
        Self {
            individual_size: n,
            population_size: 150,
            max_generations: 300,
            stagnation_window: 20,
            ..Self::default()
        }
    }

    /// Parameters found by a hyperparameter sweep over 10–100 node
    /// instances.
    ///
    /// - Population: 230, Crossover: 0.64, Mutation: 0.33
    /// - Generations: 308, Stagnation window: 16
    pub fn tuned(n: usize) -> Self {
        Self {
            individual_size: n,
            population_size: 230,
            crossover_rate: 0.64,
            mutation_rate: 0.33,
            max_generations: 308,
            stagnation_window: 16,
            ..Self::default()
        }
    }

    /// Effective wall-clock limit of one run.
    ///
    /// `None` when no limit is set, when the limit is
    /// [`UNLIMITED_TIME_SECS`], or when it is too large for a [`Duration`].
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|&secs| secs != UNLIMITED_TIME_SECS)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Tournament size derived from the population size.
    pub fn tournament_size(&self) -> usize {
        super::selection::tournament_size(self.population_size)
    }

    /// Validates the configuration on its own.
    ///
    /// # Errors
    /// [`TspGaError::Configuration`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.individual_size < 2 {
            return Err(config_error("individual_size must be at least 2"));
        }
        if self.population_size == 0 {
            return Err(config_error("population_size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(config_error("crossover_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(config_error("mutation_rate must be within [0, 1]"));
        }
        if let Some(secs) = self.time_limit_secs {
            if !secs.is_finite() || secs < 0.0 {
                return Err(config_error(
                    "time_limit_secs must be a finite non-negative number or None",
                ));
            }
        }
        Ok(())
    }

    /// Validates the configuration against the matrix it will run on.
    pub fn validate_for(&self, matrix: &DistanceMatrix) -> Result<()> {
        self.validate()?;
        if matrix.dimension() != self.individual_size {
            return Err(TspGaError::Configuration(format!(
                "individual_size {} does not match distance matrix dimension {}",
                self.individual_size,
                matrix.dimension()
            )));
        }
        Ok(())
    }
}

fn config_error(msg: &str) -> TspGaError {
    TspGaError::Configuration(msg.into())
}
