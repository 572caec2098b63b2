//! Tournament selection.
//!
//! Each draw samples `k` distinct members of the population and keeps the
//! one with the lowest cost. Draws are independent, so a strong tour can be
//! picked many times over.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::types::Tour;
use crate::error::{Result, TspGaError};
use rand::seq::index;
use rand::Rng;

/// Share of the population entered into each tournament.
pub const TOURNAMENT_RATIO: f64 = 0.05;

/// Tournament size for a population: `population_size × 0.05` rounded half
/// to even, at least 1 and at most `population_size`.
pub fn tournament_size(population_size: usize) -> usize {
    let k = (population_size as f64 * TOURNAMENT_RATIO).round_ties_even() as usize;
    k.max(1).min(population_size.max(1))
}

/// Selects `count` tours by tournament, returning clones.
///
/// # Errors
/// [`TspGaError::InvalidIndividual`] if a sampled tour carries no fitness.
///
/// # Panics
/// Panics if `population` is empty.
pub fn select_tournament<R: Rng>(
    population: &[Tour],
    count: usize,
    k: usize,
    rng: &mut R,
) -> Result<Vec<Tour>> {
    (0..count)
        .map(|_| tournament(population, k, rng).map(|i| population[i].clone()))
        .collect()
}

/// One tournament: index of the best of `k` distinct random members.
///
/// Ties keep the member sampled first.
pub fn tournament<R: Rng>(population: &[Tour], k: usize, rng: &mut R) -> Result<usize> {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();
    let k = k.clamp(1, n);

    let mut best: Option<(usize, f64)> = None;
    for idx in index::sample(rng, n, k).iter() {
        let cost = population[idx].fitness().ok_or_else(|| {
            TspGaError::InvalidIndividual(format!("tour {idx} entered a tournament unevaluated"))
        })?;
        match best {
            Some((_, best_cost)) if cost >= best_cost => {}
            _ => best = Some((idx, cost)),
        }
    }

    // k >= 1, so at least one member was compared.
    Ok(best.map(|(idx, _)| idx).unwrap_or(0))
}
