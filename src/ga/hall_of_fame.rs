//! Best-ever tour tracking.

use super::types::Tour;
use crate::error::{Result, TspGaError};

/// Holds the single lowest-cost tour observed during a run.
///
/// The held tour is only replaced by a strictly better one; on ties the
/// entry seen first stays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HallOfFame {
    best: Option<Tour>,
}

impl HallOfFame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers every candidate to the hall of fame.
    ///
    /// Returns `true` if the held tour changed.
    ///
    /// # Errors
    /// [`TspGaError::InvalidIndividual`] if a candidate carries no fitness.
    /// The hall of fame is left unchanged in that case.
    pub fn update<'a, I>(&mut self, candidates: I) -> Result<bool>
    where
        I: IntoIterator<Item = &'a Tour>,
    {
        let mut threshold = self.best.as_ref().and_then(Tour::fitness);
        let mut winner: Option<&Tour> = None;

        for tour in candidates {
            let cost = tour.fitness().ok_or_else(|| {
                TspGaError::InvalidIndividual("hall of fame offered an unevaluated tour".into())
            })?;
            if threshold.map_or(true, |best| cost < best) {
                threshold = Some(cost);
                winner = Some(tour);
            }
        }

        match winner {
            Some(tour) => {
                self.best = Some(tour.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The best tour seen so far.
    pub fn best(&self) -> Result<&Tour> {
        self.best.as_ref().ok_or(TspGaError::EmptyHallOfFame)
    }

    /// Cost of the best tour seen so far.
    pub fn best_cost(&self) -> Result<f64> {
        self.best()?
            .fitness()
            .ok_or(TspGaError::EmptyHallOfFame)
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }

    /// Takes the best tour out, if any.
    pub fn into_best(self) -> Option<Tour> {
        self.best
    }
}
