//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → selection → crossover → mutation → repeat,
//! stopping on the generation budget, the time limit, or stagnation of the
//! population's mean cost.

use super::config::GaConfig;
use super::fitness::evaluate_invalid;
use super::hall_of_fame::HallOfFame;
use super::matrix::DistanceMatrix;
use super::operators::{ordered_crossover, reverse_segment};
use super::selection::select_tournament;
use super::stats::{GenerationRecord, Logbook};
use super::types::Tour;
use crate::error::{Result, TspGaError};
use crate::random::rng_from_option;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minimum drop in mean cost that counts as progress for the stagnation
/// check.
pub const STAGNATION_TOLERANCE: f64 = 1e-4;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerminationReason {
    /// The generation budget was used up.
    Completed,
    /// The time limit or deadline passed during the run.
    TimedOut,
    /// Mean population cost stopped improving over the stagnation window.
    Stagnated,
    /// The deadline had already passed when the run was started. Nothing
    /// was evaluated.
    AbortedBeforeStart,
}

impl TerminationReason {
    /// Whether the stop was caused by the clock.
    pub fn ran_out_of_time(self) -> bool {
        matches!(self, Self::TimedOut | Self::AbortedBeforeStart)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Completed => "completed",
            Self::TimedOut => "timed out",
            Self::Stagnated => "stagnated",
            Self::AbortedBeforeStart => "aborted before start",
        };
        f.write_str(s)
    }
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// Population of the last committed generation.
    ///
    /// Empty when the run was aborted before start.
    pub population: Vec<Tour>,

    /// Best tour found during the entire run.
    pub hall_of_fame: HallOfFame,

    /// One record per committed generation, starting at generation 0.
    pub log: Logbook,

    /// Why the run stopped.
    pub termination: TerminationReason,

    /// Number of generations run after the initial one.
    pub generations: usize,

    /// Wall-clock time spent in the run.
    pub elapsed: Duration,

    /// Population snapshot per committed generation, when
    /// [`GaConfig::keep_history`] is set. Index `g` is generation `g`.
    pub history: Option<Vec<Vec<Tour>>>,
}

impl GaResult {
    fn aborted(elapsed: Duration, keep_history: bool) -> Self {
        Self {
            population: Vec::new(),
            hall_of_fame: HallOfFame::new(),
            log: Logbook::new(),
            termination: TerminationReason::AbortedBeforeStart,
            generations: 0,
            elapsed,
            history: keep_history.then(Vec::new),
        }
    }

    /// Node order of the best tour.
    pub fn best_tour(&self) -> Result<&[usize]> {
        self.hall_of_fame.best().map(Tour::nodes)
    }

    /// Cost of the best tour.
    pub fn best_cost(&self) -> Result<f64> {
        self.hall_of_fame.best_cost()
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp_ga::ga::{DistanceMatrix, GaConfig, GaRunner};
///
/// let points = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.5, 2.0)];
/// let matrix = DistanceMatrix::from_points(&points).unwrap();
/// let config = GaConfig::for_nodes(5)
///     .with_population_size(40)
///     .with_max_generations(50)
///     .with_seed(42);
///
/// let result = GaRunner::run(&matrix, &config).unwrap();
/// assert!(result.best_cost().unwrap() > 0.0);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA on `matrix`.
    ///
    /// # Errors
    /// - [`TspGaError::Configuration`] if `config` is invalid or does not
    ///   match the matrix. Nothing is run.
    /// - [`TspGaError::InvalidIndividual`] / [`TspGaError::NonFiniteFitness`]
    ///   if evaluation fails mid-run.
    pub fn run(matrix: &DistanceMatrix, config: &GaConfig) -> Result<GaResult> {
        Self::run_until(matrix, config, None)
    }

    /// Runs the GA with an absolute deadline in addition to the configured
    /// time limit. Whichever comes first stops the run.
    pub fn run_with_deadline(
        matrix: &DistanceMatrix,
        config: &GaConfig,
        deadline: Instant,
    ) -> Result<GaResult> {
        Self::run_until(matrix, config, Some(deadline))
    }

    fn run_until(
        matrix: &DistanceMatrix,
        config: &GaConfig,
        external: Option<Instant>,
    ) -> Result<GaResult> {
        config.validate_for(matrix)?;

        let start = Instant::now();
        let deadline = Deadline::new(start, config.time_limit(), external);
        if deadline.expired() {
            info!("deadline passed before the first generation");
            return Ok(GaResult::aborted(start.elapsed(), config.keep_history));
        }

        let mut rng = rng_from_option(config.seed);
        let tournament_size = config.tournament_size();

        let mut candidate: Vec<Tour> = (0..config.population_size)
            .map(|_| Tour::random(config.individual_size, &mut rng))
            .collect();
        let mut evaluations = evaluate_invalid(matrix, &mut candidate, config.parallel)?;

        let mut population: Vec<Tour> = Vec::new();
        let mut hall_of_fame = HallOfFame::new();
        let mut log = Logbook::with_capacity(config.max_generations.min(1024) + 1);
        let mut history = config.keep_history.then(Vec::new);
        let mut stagnation = StagnationMonitor::new(config.stagnation_window);
        let mut generation = 0usize;

        let termination = loop {
            if deadline.expired() {
                // The initial population has no predecessor to fall back to.
                if generation == 0 {
                    population = candidate;
                    hall_of_fame.update(&population)?;
                }
                break TerminationReason::TimedOut;
            }

            population = candidate;
            hall_of_fame.update(&population)?;

            let record = GenerationRecord::compile(generation, evaluations, &population)
                .ok_or_else(|| {
                    TspGaError::InvalidIndividual(format!(
                        "generation {generation} has an unevaluated tour"
                    ))
                })?;
            debug!(
                generation,
                evaluations,
                mean = record.mean,
                min = record.min,
                "generation complete"
            );
            log.record(record);

            if let Some(snapshots) = history.as_mut() {
                snapshots.push(population.clone());
            }

            if stagnation.observe(record.mean) {
                break TerminationReason::Stagnated;
            }
            if generation >= config.max_generations {
                break TerminationReason::Completed;
            }

            generation += 1;
            candidate = breed(&population, config, tournament_size, &mut rng)?;
            evaluations = evaluate_invalid(matrix, &mut candidate, config.parallel)?;
        };

        let elapsed = start.elapsed();
        info!(
            reason = %termination,
            generations = log.len().saturating_sub(1),
            evaluations = log.total_evaluations(),
            best_cost = ?hall_of_fame.best_cost().ok(),
            elapsed_ms = elapsed.as_millis() as u64,
            "evolution finished"
        );

        Ok(GaResult {
            population,
            hall_of_fame,
            generations: log.len().saturating_sub(1),
            log,
            termination,
            elapsed,
            history,
        })
    }
}

/// Builds the next offspring set: tournament selection, ordered crossover
/// on adjacent pairs, then per-tour segment reversal.
///
/// Tours left untouched by variation keep their cached fitness.
fn breed<R: Rng>(
    population: &[Tour],
    config: &GaConfig,
    tournament_size: usize,
    rng: &mut R,
) -> Result<Vec<Tour>> {
    let mut offspring = select_tournament(population, population.len(), tournament_size, rng)?;

    for i in (1..offspring.len()).step_by(2) {
        if rng.random_range(0.0..1.0) < config.crossover_rate {
            let (left, right) = offspring.split_at_mut(i);
            ordered_crossover(&mut left[i - 1], &mut right[0], rng);
        }
    }

    for child in offspring.iter_mut() {
        if rng.random_range(0.0..1.0) < config.mutation_rate {
            reverse_segment(child, rng);
        }
    }

    Ok(offspring)
}

/// Wall-clock stop point; `None` means no limit.
#[derive(Debug, Clone, Copy)]
struct Deadline(Option<Instant>);

impl Deadline {
    fn new(start: Instant, limit: Option<Duration>, external: Option<Instant>) -> Self {
        let configured = limit.and_then(|limit| start.checked_add(limit));
        let at = match (configured, external) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        Self(at)
    }

    fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

/// Early stopping on the rolling mean cost.
///
/// Stops once the best mean among the last `window` generations fails to
/// beat the best mean from before the window by [`STAGNATION_TOLERANCE`].
#[derive(Debug, Clone)]
struct StagnationMonitor {
    window: usize,
    means: Vec<f64>,
}

impl StagnationMonitor {
    fn new(window: usize) -> Self {
        Self {
            window,
            means: Vec::new(),
        }
    }

    /// Records a generation's mean cost. Returns `true` when the run should
    /// stop.
    fn observe(&mut self, mean: f64) -> bool {
        if self.window == 0 {
            return false;
        }
        self.means.push(mean);
        if self.means.len() <= self.window {
            return false;
        }
        let (before, recent) = self.means.split_at(self.means.len() - self.window);
        let prior_best = before.iter().copied().fold(f64::INFINITY, f64::min);
        let recent_best = recent.iter().copied().fold(f64::INFINITY, f64::min);
        prior_best - recent_best < STAGNATION_TOLERANCE
    }
}

// ============================================================================
// Tests
// ============================================================================
