//! Generic simulated-annealing optimization engine.
//!
//! Given a pluggable objective function and solution-generation
//! strategy, the engine searches a solution space by probabilistically
//! accepting worsening moves under a decreasing temperature schedule,
//! converging toward a low-energy solution.
//!
//! - **[`CoolingSchedule`]**: deterministic temperature updates, three
//!   closed-form variants (logarithmic, geometric, exponential).
//! - **[`Solution`]** / **[`ThermalState`]**: candidate points with
//!   lazily memoized energy, grouped per temperature level with
//!   thermal-equilibrium detection.
//! - **[`AnnealingEngine`]**: the search loop: cooling, sampling, the
//!   Metropolis acceptance rule, and global stopping criteria.
//!
//! Everything domain-specific lives behind the [`ObjectiveFunction`]
//! and [`SolutionGenerator`] traits supplied by the caller; the crate
//! contains no knowledge of tours, schedules, or any other concrete
//! problem. It is single-threaded and synchronous: one engine drives
//! one search, and parallel parameter sweeps are just independent
//! engines with independent seeds.
//!
//! # Example
//!
//! ```
//! use annealer::{
//!     AnnealingEngine, ComputationError, CoolingVariant, EngineConfig, Generation,
//!     ObjectiveFunction, Solution, SolutionGenerator,
//! };
//! use rand::Rng;
//!
//! // Minimize f(x) = x^2 over integer plans.
//! struct Square;
//!
//! impl ObjectiveFunction<()> for Square {
//!     type Plan = i64;
//!
//!     fn evaluate(&self, _data: &(), plan: &i64) -> Result<f64, ComputationError> {
//!         Ok((plan * plan) as f64)
//!     }
//! }
//!
//! struct StepNeighbors;
//!
//! impl SolutionGenerator<()> for StepNeighbors {
//!     type Plan = i64;
//!
//!     fn initial<R: Rng>(&mut self, _: &(), rng: &mut R) -> Result<Solution<i64>, ComputationError> {
//!         Ok(Solution::new(rng.random_range(-100..=100)))
//!     }
//!
//!     fn next<R: Rng>(
//!         &mut self,
//!         _: &(),
//!         current: &i64,
//!         rng: &mut R,
//!     ) -> Result<Generation<i64>, ComputationError> {
//!         let step = if rng.random_bool(0.5) { 1 } else { -1 };
//!         Ok(Generation::Solution(Solution::new(current + step)))
//!     }
//! }
//!
//! let config = EngineConfig::default()
//!     .with_initial_temperature(100.0)
//!     .with_temperature_min(0.01)
//!     .with_cooling_speed(0.95)
//!     .with_variant(CoolingVariant::Geometric)
//!     .with_steps(50)
//!     .with_seed(42);
//!
//! let engine = AnnealingEngine::new((), Square, StepNeighbors, config)?;
//! let outcome = engine.solve()?;
//! assert!(outcome.energy >= 0.0);
//! assert!(outcome.generated > 0);
//! # Ok::<(), annealer::EngineError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod schedule;
pub mod solution;
pub mod state;
pub mod types;

pub use config::EngineConfig;
pub use engine::{AnnealOutcome, AnnealingEngine};
pub use error::{BoxError, ComputationError, EngineError};
pub use schedule::{CoolingSchedule, CoolingStatus, CoolingVariant};
pub use solution::{Solution, SolutionStatus};
pub use state::ThermalState;
pub use types::{
    temperature_floor_reached, Generation, ObjectiveFunction, SearchProbe, SolutionGenerator,
    StoppingCriterion, TemperatureFloor,
};
