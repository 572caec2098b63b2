//! Tour cost evaluation.

use super::matrix::DistanceMatrix;
use super::types::{is_permutation, Tour};
use crate::error::{Result, TspGaError};

/// Cyclic length of a tour: every consecutive edge plus the closing edge
/// from the last node back to the first.
///
/// # Errors
/// - [`TspGaError::InvalidIndividual`] if `nodes` is not a permutation of
///   `0..matrix.dimension()`.
/// - [`TspGaError::NonFiniteFitness`] if the sum overflows to infinity.
///
/// # Complexity
/// O(n)
pub fn evaluate_tour(matrix: &DistanceMatrix, nodes: &[usize]) -> Result<f64> {
    let n = matrix.dimension();
    if !is_permutation(nodes, n) {
        return Err(TspGaError::InvalidIndividual(format!(
            "tour is not a permutation of 0..{n}: {nodes:?}"
        )));
    }

    let closing = matrix.get(nodes[n - 1], nodes[0]);
    let cost = nodes
        .windows(2)
        .fold(closing, |acc, w| acc + matrix.get(w[0], w[1]));

    if !cost.is_finite() {
        return Err(TspGaError::NonFiniteFitness { value: cost });
    }
    Ok(cost)
}

/// Evaluates `tour` and caches the result on it.
pub fn evaluate_in_place(matrix: &DistanceMatrix, tour: &mut Tour) -> Result<f64> {
    let cost = evaluate_tour(matrix, tour.nodes())?;
    tour.set_fitness(cost);
    Ok(cost)
}

/// Scores every tour whose fitness is missing. Returns how many were scored.
///
/// With the `parallel` feature and `parallel = true`, the work is spread over
/// rayon's pool; the call returns only after every tour has been scored.
pub fn evaluate_invalid(
    matrix: &DistanceMatrix,
    population: &mut [Tour],
    parallel: bool,
) -> Result<usize> {
    let mut pending: Vec<&mut Tour> = population
        .iter_mut()
        .filter(|t| !t.is_evaluated())
        .collect();
    score_all(matrix, &mut pending, parallel)?;
    Ok(pending.len())
}

#[cfg(feature = "parallel")]
fn score_all(matrix: &DistanceMatrix, pending: &mut [&mut Tour], parallel: bool) -> Result<()> {
    use rayon::prelude::*;

    if parallel {
        pending
            .par_iter_mut()
            .try_for_each(|t| evaluate_in_place(matrix, t).map(|_| ()))
    } else {
        score_sequential(matrix, pending)
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all(matrix: &DistanceMatrix, pending: &mut [&mut Tour], _parallel: bool) -> Result<()> {
    score_sequential(matrix, pending)
}

fn score_sequential(matrix: &DistanceMatrix, pending: &mut [&mut Tour]) -> Result<()> {
    for t in pending.iter_mut() {
        evaluate_in_place(matrix, t)?;
    }
    Ok(())
}
