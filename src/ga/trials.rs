//! Repeated independent runs on one instance.
//!
//! A single GA run is noisy. [`run_trials`] repeats the run with distinct
//! seeds and summarizes the spread, keeping the overall best tour.

use super::config::GaConfig;
use super::matrix::DistanceMatrix;
use super::runner::{GaResult, GaRunner, TerminationReason};
use crate::error::Result;
use std::time::{Duration, Instant};
use tracing::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of repeated GA runs on the same distance matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialSummary {
    /// Runs that produced a tour.
    pub runs: usize,

    /// Best cost of each counted run, in trial order.
    pub costs: Vec<f64>,

    /// Time from the start of the batch to the end of each counted run, in
    /// trial order.
    pub running_times: Vec<Duration>,

    /// Termination reason of each counted run, in trial order.
    pub terminations: Vec<TerminationReason>,

    /// Tour of the lowest-cost run. Empty when no run counted.
    pub best_tour: Vec<usize>,
}

impl TrialSummary {
    /// Lowest cost over all counted runs.
    pub fn min_cost(&self) -> Option<f64> {
        self.costs.iter().copied().reduce(f64::min)
    }

    /// Mean cost over all counted runs.
    pub fn mean_cost(&self) -> Option<f64> {
        if self.costs.is_empty() {
            return None;
        }
        Some(self.costs.iter().sum::<f64>() / self.costs.len() as f64)
    }

    /// Wall-clock time of the batch up to its last counted run.
    pub fn total_time(&self) -> Duration {
        self.running_times.iter().copied().max().unwrap_or_default()
    }

    /// Relative gap of the mean cost to a known optimum, in percent.
    pub fn gap_to_optimum(&self, optimum: f64) -> Option<f64> {
        self.mean_cost().map(|mean| (mean / optimum - 1.0) * 100.0)
    }
}

/// Runs the GA up to `trials` times and summarizes the results.
///
/// Trial `i` uses seed `config.seed + i` when a seed is set, so a seeded
/// summary is reproducible.
///
/// The configured time limit is a budget for the whole batch: trials run one
/// after another against a single deadline measured from the call, and the
/// batch stops at the first trial that finds the deadline already passed.
/// Without a time limit, trials are independent and run concurrently on
/// rayon's pool when the `parallel` feature and `config.parallel` are on.
///
/// # Errors
/// Returns the first error raised by any run.
pub fn run_trials(matrix: &DistanceMatrix, config: &GaConfig, trials: usize) -> Result<TrialSummary> {
    config.validate_for(matrix)?;

    let batch_start = Instant::now();
    let configs: Vec<GaConfig> = (0..trials)
        .map(|i| {
            let mut c = config.clone();
            c.seed = config.seed.map(|s| s.wrapping_add(i as u64));
            c
        })
        .collect();

    let deadline = config
        .time_limit()
        .and_then(|limit| batch_start.checked_add(limit));
    let outcomes = match deadline {
        Some(deadline) => run_budgeted(matrix, &configs, batch_start, deadline)?,
        None => run_all(matrix, &configs, batch_start, config.parallel)?,
    };
    Ok(summarize(outcomes))
}

/// A finished run and the batch time at which it finished.
type Outcome = (GaResult, Duration);

fn run_budgeted(
    matrix: &DistanceMatrix,
    configs: &[GaConfig],
    batch_start: Instant,
    deadline: Instant,
) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(configs.len());
    for c in configs {
        let result = GaRunner::run_with_deadline(matrix, c, deadline)?;
        let aborted = result.termination == TerminationReason::AbortedBeforeStart;
        outcomes.push((result, batch_start.elapsed()));
        if aborted {
            break;
        }
    }
    Ok(outcomes)
}

#[cfg(feature = "parallel")]
fn run_all(
    matrix: &DistanceMatrix,
    configs: &[GaConfig],
    batch_start: Instant,
    parallel: bool,
) -> Result<Vec<Outcome>> {
    use rayon::prelude::*;

    let run = |c: &GaConfig| GaRunner::run(matrix, c).map(|r| (r, batch_start.elapsed()));
    if parallel {
        configs.par_iter().map(run).collect()
    } else {
        configs.iter().map(run).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all(
    matrix: &DistanceMatrix,
    configs: &[GaConfig],
    batch_start: Instant,
    _parallel: bool,
) -> Result<Vec<Outcome>> {
    configs
        .iter()
        .map(|c| GaRunner::run(matrix, c).map(|r| (r, batch_start.elapsed())))
        .collect()
}

/// Folds outcomes in trial order, stopping at the first run without a tour.
fn summarize(outcomes: Vec<Outcome>) -> TrialSummary {
    let mut summary = TrialSummary {
        runs: 0,
        costs: Vec::new(),
        running_times: Vec::new(),
        terminations: Vec::new(),
        best_tour: Vec::new(),
    };
    let mut best = f64::INFINITY;

    for (i, (result, finished_at)) in outcomes.into_iter().enumerate() {
        let Ok(cost) = result.best_cost() else {
            info!(trial = i, reason = %result.termination, "time budget spent, stopping trials");
            break;
        };
        if cost < best {
            best = cost;
            summary.best_tour = result
                .hall_of_fame
                .into_best()
                .map(|t| t.into_nodes())
                .unwrap_or_default();
        }
        summary.runs += 1;
        summary.costs.push(cost);
        summary.running_times.push(finished_at);
        summary.terminations.push(result.termination);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::fitness::evaluate_tour;

    fn grid_matrix() -> DistanceMatrix {
        let points: Vec<(f64, f64)> = (0..9)
            .map(|i| ((i % 3) as f64, (i / 3) as f64))
            .collect();
        DistanceMatrix::from_points(&points).unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::for_nodes(9)
            .with_population_size(40)
            .with_max_generations(40)
            .with_seed(11)
    }

    #[test]
    fn test_trials_summary() {
        let matrix = grid_matrix();
        let summary = run_trials(&matrix, &config(), 3).unwrap();

        assert_eq!(summary.runs, 3);
        assert_eq!(summary.costs.len(), 3);
        assert_eq!(summary.running_times.len(), 3);
        assert!(summary
            .terminations
            .iter()
            .all(|t| *t == TerminationReason::Completed));

        let min = summary.min_cost().unwrap();
        let mean = summary.mean_cost().unwrap();
        assert!(min <= mean);
        assert_eq!(evaluate_tour(&matrix, &summary.best_tour).unwrap(), min);
    }

    #[test]
    fn test_trials_reproducible_and_order_stable() {
        let matrix = grid_matrix();
        let seq = run_trials(&matrix, &config().with_parallel(false), 4).unwrap();
        let par = run_trials(&matrix, &config().with_parallel(true), 4).unwrap();
        assert_eq!(seq.costs, par.costs);
        assert_eq!(seq.best_tour, par.best_tour);
    }

    #[test]
    fn test_trial_matches_single_run() {
        let matrix = grid_matrix();
        let summary = run_trials(&matrix, &config(), 1).unwrap();
        let single = GaRunner::run(&matrix, &config()).unwrap();
        assert_eq!(summary.costs, vec![single.best_cost().unwrap()]);
    }

    #[test]
    fn test_zero_budget_counts_no_runs() {
        let matrix = grid_matrix();
        let summary = run_trials(&matrix, &config().with_time_limit_secs(0.0), 3).unwrap();
        assert_eq!(summary.runs, 0);
        assert!(summary.best_tour.is_empty());
        assert_eq!(summary.min_cost(), None);
        assert_eq!(summary.mean_cost(), None);
        assert_eq!(summary.gap_to_optimum(1.0), None);
    }

    #[test]
    fn test_gap_to_optimum() {
        let summary = TrialSummary {
            runs: 2,
            costs: vec![10.0, 12.0],
            running_times: vec![Duration::from_millis(5), Duration::from_millis(7)],
            terminations: vec![TerminationReason::Completed; 2],
            best_tour: vec![0, 1],
        };
        assert_eq!(summary.min_cost(), Some(10.0));
        assert_eq!(summary.mean_cost(), Some(11.0));
        assert!((summary.gap_to_optimum(10.0).unwrap() - 10.0).abs() < 1e-12);
        assert_eq!(summary.total_time(), Duration::from_millis(7));
    }

    #[test]
    fn test_time_limit_is_shared_by_the_batch() {
        let points: Vec<(f64, f64)> = (0..60)
            .map(|i| ((i * 37 % 101) as f64, (i * 53 % 97) as f64))
            .collect();
        let matrix = DistanceMatrix::from_points(&points).unwrap();
        let config = GaConfig::for_nodes(60)
            .with_population_size(200)
            .with_max_generations(1_000_000)
            .with_time_limit_secs(0.05)
            .with_seed(3);

        let summary = run_trials(&matrix, &config, 10).unwrap();

        // The first run spends the whole budget; the second finds it gone.
        assert_eq!(summary.runs, 1);
        assert_eq!(summary.terminations, vec![TerminationReason::TimedOut]);
        assert!(summary.total_time() >= Duration::from_millis(50));
        assert!(summary.total_time() < Duration::from_secs(5));
        assert_eq!(
            evaluate_tour(&matrix, &summary.best_tour).unwrap(),
            summary.min_cost().unwrap()
        );
    }

    #[test]
    fn test_running_times_are_cumulative() {
        let matrix = grid_matrix();
        let summary = run_trials(&matrix, &config().with_time_limit_secs(60.0), 3).unwrap();
        assert_eq!(summary.runs, 3);
        assert!(summary.running_times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(summary.total_time(), summary.running_times[2]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let matrix = grid_matrix();
        assert!(run_trials(&matrix, &GaConfig::for_nodes(4), 2).is_err());
    }
}
