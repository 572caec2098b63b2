//! Per-generation statistics.

use super::types::Tour;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate cost statistics for one generation.
///
/// All figures are taken over the whole population, not only the tours
/// re-scored in that generation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationRecord {
    /// Generation index; 0 is the initial population.
    pub generation: usize,

    /// Tours evaluated during this generation.
    pub evaluations: usize,

    pub mean: f64,

    /// Population standard deviation (divisor `n`).
    pub std: f64,

    pub min: f64,

    pub max: f64,
}

impl GenerationRecord {
    /// Computes the record for an evaluated population.
    ///
    /// Returns `None` if the population is empty or any tour lacks a fitness.
    pub fn compile(generation: usize, evaluations: usize, population: &[Tour]) -> Option<Self> {
        let costs: Vec<f64> = population
            .iter()
            .map(Tour::fitness)
            .collect::<Option<_>>()?;
        if costs.is_empty() {
            return None;
        }

        let n = costs.len() as f64;
        let mean = costs.iter().sum::<f64>() / n;
        let variance = costs.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / n;
        let (min, max) = costs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
                (lo.min(c), hi.max(c))
            });

        Some(Self {
            generation,
            evaluations,
            mean,
            std: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Append-only log of [`GenerationRecord`]s.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Logbook {
    records: Vec<GenerationRecord>,
}

impl Logbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn record(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GenerationRecord> {
        self.records.iter()
    }

    /// Total number of evaluations across all generations.
    pub fn total_evaluations(&self) -> usize {
        self.records.iter().map(|r| r.evaluations).sum()
    }

    /// Best cost seen up to and including each generation.
    pub fn best_so_far(&self) -> Vec<f64> {
        self.records
            .iter()
            .scan(f64::INFINITY, |best, r| {
                *best = best.min(r.min);
                Some(*best)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Logbook {
    type Item = &'a GenerationRecord;
    type IntoIter = std::slice::Iter<'a, GenerationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
