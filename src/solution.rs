//! Candidate solutions and their acceptance status.

use crate::error::ComputationError;
use crate::types::ObjectiveFunction;

/// Acceptance status of a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolutionStatus {
    /// Freshly generated, not yet (or no longer) judged.
    Candidate,
    /// Accepted by the Metropolis criterion or by bootstrap seeding.
    Accepted,
    /// Nominally terminal rejection. Never assigned by the engine:
    /// [`Solution::reject`] resets to `Candidate` instead (see below).
    Rejected,
}

/// One point in the search space: a domain-specific plan, a lazily
/// memoized energy, and an acceptance status.
///
/// Energy is computed at most once per instance; repeated
/// [`compute_energy`](Self::compute_energy) calls return the cached
/// value even if handed a different objective.
#[derive(Debug, Clone)]
pub struct Solution<P> {
    plan: P,
    energy: Option<f64>,
    status: SolutionStatus,
}

impl<P> Solution<P> {
    /// Wraps a plan as a fresh candidate with no energy yet.
    pub fn new(plan: P) -> Self {
        Self {
            plan,
            energy: None,
            status: SolutionStatus::Candidate,
        }
    }

    /// Wraps a pre-scored plan. The given energy is treated as the
    /// memoized value; the objective will never be consulted for it.
    pub fn with_energy(plan: P, energy: f64) -> Self {
        Self {
            plan,
            energy: Some(energy),
            status: SolutionStatus::Candidate,
        }
    }

    /// Borrows the plan payload.
    pub fn plan(&self) -> &P {
        &self.plan
    }

    /// Consumes the solution, yielding the plan.
    pub fn into_plan(self) -> P {
        self.plan
    }

    /// Memoized energy, if computed.
    pub fn energy(&self) -> Option<f64> {
        self.energy
    }

    /// Computes and memoizes the energy on first call; returns the
    /// cached value on every later call.
    pub fn compute_energy<D, O>(
        &mut self,
        objective: &O,
        data: &D,
    ) -> Result<f64, ComputationError>
    where
        O: ObjectiveFunction<D, Plan = P>,
    {
        if let Some(energy) = self.energy {
            return Ok(energy);
        }
        let energy = objective.evaluate(data, &self.plan)?;
        self.energy = Some(energy);
        Ok(energy)
    }

    /// Marks the solution as accepted.
    pub fn accept(&mut self) {
        self.status = SolutionStatus::Accepted;
    }

    /// Marks the solution as rejected by resetting it to `Candidate`.
    ///
    /// A rejected solution is deliberately indistinguishable from a
    /// never-evaluated one in later equilibrium checks. Callers that
    /// need a true terminal rejection must track it themselves.
    pub fn reject(&mut self) {
        self.status = SolutionStatus::Candidate;
    }

    /// Current status.
    pub fn status(&self) -> SolutionStatus {
        self.status
    }

    /// Whether the solution has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.status == SolutionStatus::Accepted
    }

    /// Whether the solution is an unjudged (or rejected) candidate.
    pub fn is_candidate(&self) -> bool {
        self.status == SolutionStatus::Candidate
    }

    /// Whether the solution carries the terminal `Rejected` status.
    pub fn is_rejected(&self) -> bool {
        self.status == SolutionStatus::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObjective {
        calls: AtomicUsize,
        value: f64,
    }

    impl CountingObjective {
        fn returning(value: f64) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                value,
            }
        }
    }

    impl ObjectiveFunction<()> for CountingObjective {
        type Plan = Vec<usize>;

        fn evaluate(&self, _data: &(), _plan: &Vec<usize>) -> Result<f64, ComputationError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(self.value)
        }
    }

    #[test]
    fn test_energy_computed_at_most_once() {
        let first = CountingObjective::returning(7.0);
        let second = CountingObjective::returning(99.0);

        let mut solution = Solution::new(vec![0, 1, 2]);
        assert_eq!(solution.compute_energy(&first, &()).unwrap(), 7.0);
        // A different objective must not overwrite the memoized value.
        assert_eq!(solution.compute_energy(&second, &()).unwrap(), 7.0);
        assert_eq!(first.calls.load(Ordering::Relaxed), 1);
        assert_eq!(second.calls.load(Ordering::Relaxed), 0);
        assert_eq!(solution.energy(), Some(7.0));
    }

    #[test]
    fn test_pre_scored_solution_skips_objective() {
        let objective = CountingObjective::returning(1.0);
        let mut solution = Solution::with_energy(vec![1], 42.0);
        assert_eq!(solution.compute_energy(&objective, &()).unwrap(), 42.0);
        assert_eq!(objective.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_status_transitions() {
        let mut solution: Solution<Vec<usize>> = Solution::new(vec![]);
        assert!(solution.is_candidate());
        solution.accept();
        assert!(solution.is_accepted());
        solution.reject();
        // Rejection resets to Candidate, never to Rejected.
        assert!(solution.is_candidate());
        assert!(!solution.is_rejected());
    }

    #[test]
    fn test_objective_error_propagates_and_leaves_energy_unset() {
        struct Failing;
        impl ObjectiveFunction<()> for Failing {
            type Plan = Vec<usize>;
            fn evaluate(&self, _: &(), _: &Vec<usize>) -> Result<f64, ComputationError> {
                Err(ComputationError::new("objective blew up"))
            }
        }

        let mut solution = Solution::new(vec![3]);
        assert!(solution.compute_energy(&Failing, &()).is_err());
        assert_eq!(solution.energy(), None);
    }
}
