//! The tour individual.
//!
//! A [`Tour`] is a visiting order over every node of the distance matrix
//! together with a cached fitness. The cache is cleared whenever a variation
//! operator touches the sequence and filled again by the evaluator.

use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate TSP solution: a permutation of `0..n` plus its cost.
///
/// Fitness is `None` until the tour has been evaluated, and again after any
/// crossover or mutation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tour {
    nodes: Vec<usize>,
    fitness: Option<f64>,
}

impl Tour {
    /// Wraps a node sequence with no fitness.
    ///
    /// The sequence is not checked here; [`evaluate_tour`](super::evaluate_tour)
    /// rejects anything that is not a permutation.
    pub fn new(nodes: Vec<usize>) -> Self {
        Self {
            nodes,
            fitness: None,
        }
    }

    /// Uniformly random permutation of `0..n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut nodes: Vec<usize> = (0..n).collect();
        nodes.shuffle(rng);
        Self::new(nodes)
    }

    /// The visiting order.
    #[inline]
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of nodes in the tour.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cached cost, if the tour has been evaluated since its last change.
    #[inline]
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Whether the cached fitness is current.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Stores the evaluated cost.
    #[inline]
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Clears the cached cost.
    #[inline]
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Mutable access to the sequence. Clears the cached fitness.
    pub fn nodes_mut(&mut self) -> &mut [usize] {
        self.fitness = None;
        &mut self.nodes
    }

    /// Replaces the sequence. Clears the cached fitness.
    pub fn replace_nodes(&mut self, nodes: Vec<usize>) {
        self.nodes = nodes;
        self.fitness = None;
    }

    /// Consumes the tour, returning its node sequence.
    pub fn into_nodes(self) -> Vec<usize> {
        self.nodes
    }

    /// Whether the sequence visits every node of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        is_permutation(&self.nodes, n)
    }
}

/// Checks that `nodes` is a permutation of `0..n`.
pub fn is_permutation(nodes: &[usize], n: usize) -> bool {
    if nodes.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in nodes {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}
