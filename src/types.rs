//! Capability traits supplied by the caller.
//!
//! The engine is domain-agnostic: scoring and neighbor generation live
//! behind [`ObjectiveFunction`] and [`SolutionGenerator`], implemented
//! by the consumer (e.g. a TSP crate providing tour length and
//! swap-based neighbors). Both receive the engine's RNG so that a
//! seeded run is fully reproducible.
//!
//! # Examples
//!
//! ```ignore
//! struct TourLength;
//!
//! impl ObjectiveFunction<Vec<(f64, f64)>> for TourLength {
//!     type Plan = Vec<usize>;
//!
//!     fn evaluate(&self, cities: &Vec<(f64, f64)>, tour: &Vec<usize>) -> Result<f64, ComputationError> {
//!         Ok(tour
//!             .windows(2)
//!             .map(|w| {
//!                 let (ax, ay) = cities[w[0]];
//!                 let (bx, by) = cities[w[1]];
//!                 ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
//!             })
//!             .sum())
//!     }
//! }
//! ```

use rand::Rng;

use crate::error::ComputationError;
use crate::solution::Solution;

/// Scores a plan. Lower energy is better.
///
/// Must be deterministic given the plan and problem data, and must not
/// mutate either. May be expensive: the engine calls it at most once
/// per [`Solution`] instance.
pub trait ObjectiveFunction<D>: Send + Sync {
    /// The plan payload carried by solutions.
    type Plan: Clone + Send;

    /// Computes the energy of `plan`.
    fn evaluate(&self, data: &D, plan: &Self::Plan) -> Result<f64, ComputationError>;
}

/// Outcome of asking a [`SolutionGenerator`] for the next candidate.
///
/// `Exhausted` is a normal terminal value, not an error: it immediately
/// ends sampling at the current temperature level.
#[derive(Debug, Clone)]
pub enum Generation<P> {
    /// A fresh candidate solution.
    Solution(Solution<P>),
    /// The generator has no further candidates.
    Exhausted,
}

/// Produces candidate solutions.
///
/// `next` takes `&mut self`: a generator is an explicit cursor that may
/// hold its own iteration state and exhaustion flag rather than an
/// implicit iterator.
pub trait SolutionGenerator<D>: Send {
    /// The plan payload carried by solutions.
    type Plan: Clone + Send;

    /// Creates the starting solution. Called exactly once, at engine
    /// construction, unless the caller pre-seeds an initial solution.
    fn initial<R: Rng>(
        &mut self,
        data: &D,
        rng: &mut R,
    ) -> Result<Solution<Self::Plan>, ComputationError>;

    /// Produces the next candidate, or signals exhaustion.
    ///
    /// `current` is the engine's most recently accepted plan, so
    /// neighborhood strategies can perturb it directly.
    fn next<R: Rng>(
        &mut self,
        data: &D,
        current: &Self::Plan,
        rng: &mut R,
    ) -> Result<Generation<Self::Plan>, ComputationError>;
}

/// Read-only view of the search handed to a [`StoppingCriterion`].
#[derive(Debug, Clone, Copy)]
pub struct SearchProbe {
    /// Live temperature.
    pub temperature: f64,
    /// Configured temperature floor.
    pub temperature_min: f64,
    /// Energy of the most recently accepted solution.
    pub energy: f64,
    /// Solutions generated so far.
    pub generated: usize,
}

/// Default stopping test: the live temperature has fallen below the
/// configured floor.
pub fn temperature_floor_reached(temperature: f64, temperature_min: f64) -> bool {
    temperature < temperature_min
}

/// Global stopping criterion evaluated once per outer-loop pass, before
/// cooling.
///
/// The provided default delegates to [`temperature_floor_reached`];
/// implementors overriding [`should_stop`](Self::should_stop) may call
/// the helper to combine it with their own condition.
pub trait StoppingCriterion {
    /// Returns true when the search should terminate.
    fn should_stop(&mut self, probe: &SearchProbe) -> bool {
        temperature_floor_reached(probe.temperature, probe.temperature_min)
    }
}

/// The default criterion: stop only at the temperature floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemperatureFloor;

impl StoppingCriterion for TemperatureFloor {}
