//! The annealing engine: cooling, sampling, and the Metropolis rule.
//!
//! # Algorithm
//!
//! 1. Bootstrap: score and forcibly accept an initial solution.
//! 2. While the stopping criterion is quiet:
//!    a. Cool; terminate if the schedule reports `Stopped`.
//!    b. Open a fresh [`ThermalState`] at the new temperature.
//!    c. Sample candidates, judging each with the Metropolis criterion,
//!       until the state reaches thermal equilibrium, the step budget
//!       runs out, or the generator is exhausted.
//! 3. The plan of the most recently accepted solution is the result.
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::schedule::CoolingSchedule;
use crate::solution::Solution;
use crate::state::ThermalState;
use crate::types::{
    Generation, ObjectiveFunction, SearchProbe, SolutionGenerator, StoppingCriterion,
    TemperatureFloor,
};

/// Result of a completed annealing run.
#[derive(Debug, Clone)]
pub struct AnnealOutcome<P> {
    /// The plan of the most recently accepted solution.
    pub plan: P,

    /// Energy of that plan.
    pub energy: f64,

    /// Temperature when the search terminated.
    pub final_temperature: f64,

    /// Number of temperature levels entered by the sampling loop.
    pub temperature_levels: usize,

    /// Candidate solutions drawn from the generator (the bootstrap
    /// solution is not counted).
    pub generated: usize,

    /// Candidates accepted, improving or uphill.
    pub accepted_moves: usize,

    /// Candidates rejected by the Metropolis criterion.
    pub rejected_moves: usize,
}

enum Sampled {
    Candidate,
    Exhausted,
}

/// Single-use simulated-annealing search.
///
/// Owns the problem data, the injected [`ObjectiveFunction`] and
/// [`SolutionGenerator`] capabilities, a [`CoolingSchedule`], the
/// [`ThermalState`] history, and a seeded RNG. Construction seeds a
/// bootstrap state with a forcibly-accepted initial solution;
/// [`solve`](Self::solve) consumes the engine, so re-running a finished
/// search is unrepresentable.
///
/// # Examples
///
/// ```ignore
/// let config = EngineConfig::default()
///     .with_initial_temperature(100.0)
///     .with_temperature_min(1.0)
///     .with_cooling_speed(0.9)
///     .with_seed(42);
/// let engine = AnnealingEngine::new(cities, TourLength, SwapNeighbors::new(), config)?;
/// let outcome = engine.solve()?;
/// println!("tour {:?} with length {}", outcome.plan, outcome.energy);
/// ```
pub struct AnnealingEngine<D, O, G, C = TemperatureFloor>
where
    O: ObjectiveFunction<D>,
{
    config: EngineConfig,
    schedule: CoolingSchedule,
    data: D,
    objective: O,
    generator: G,
    criterion: C,
    states: Vec<ThermalState<O::Plan>>,
    current_plan: O::Plan,
    current_energy: f64,
    rng: StdRng,
    generated: usize,
    accepted_moves: usize,
    rejected_moves: usize,
    temperature_levels: usize,
}

impl<D, O, G> AnnealingEngine<D, O, G, TemperatureFloor>
where
    O: ObjectiveFunction<D>,
    G: SolutionGenerator<D, Plan = O::Plan>,
{
    /// Builds an engine whose initial solution comes from the
    /// generator's [`initial`](SolutionGenerator::initial).
    pub fn new(data: D, objective: O, generator: G, config: EngineConfig) -> Result<Self, EngineError> {
        Self::build(data, objective, generator, config, None)
    }

    /// Builds an engine seeded with a caller-supplied initial solution;
    /// the generator's `initial` is never called.
    pub fn with_initial_solution(
        data: D,
        objective: O,
        generator: G,
        config: EngineConfig,
        initial: Solution<O::Plan>,
    ) -> Result<Self, EngineError> {
        Self::build(data, objective, generator, config, Some(initial))
    }

    fn build(
        data: D,
        objective: O,
        mut generator: G,
        config: EngineConfig,
        initial: Option<Solution<O::Plan>>,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let schedule = CoolingSchedule::new(
            config.initial_temperature,
            config.temperature_min,
            config.cooling_speed,
            config.variant,
        )
        .with_dimensionality(config.dimensionality);

        let mut initial = match initial {
            Some(solution) => solution,
            None => generator.initial(&data, &mut rng)?,
        };
        let energy = initial.compute_energy(&objective, &data)?;
        initial.accept();

        let current_plan = initial.plan().clone();
        let mut bootstrap = ThermalState::bootstrap(schedule.temperature(), config.keep_solutions);
        bootstrap.add_solution(initial);

        Ok(Self {
            config,
            schedule,
            data,
            objective,
            generator,
            criterion: TemperatureFloor,
            states: vec![bootstrap],
            current_plan,
            current_energy: energy,
            rng,
            generated: 0,
            accepted_moves: 0,
            rejected_moves: 0,
            temperature_levels: 0,
        })
    }
}

impl<D, O, G, C> AnnealingEngine<D, O, G, C>
where
    O: ObjectiveFunction<D>,
    G: SolutionGenerator<D, Plan = O::Plan>,
    C: StoppingCriterion,
{
    /// Replaces the stopping criterion, keeping all other state.
    pub fn with_stopping_criterion<C2: StoppingCriterion>(
        self,
        criterion: C2,
    ) -> AnnealingEngine<D, O, G, C2> {
        AnnealingEngine {
            config: self.config,
            schedule: self.schedule,
            data: self.data,
            objective: self.objective,
            generator: self.generator,
            criterion,
            states: self.states,
            current_plan: self.current_plan,
            current_energy: self.current_energy,
            rng: self.rng,
            generated: self.generated,
            accepted_moves: self.accepted_moves,
            rejected_moves: self.rejected_moves,
            temperature_levels: self.temperature_levels,
        }
    }

    /// Live temperature.
    pub fn temperature(&self) -> f64 {
        self.schedule.temperature()
    }

    /// Energy of the most recently accepted solution.
    pub fn energy(&self) -> f64 {
        self.current_energy
    }

    /// Plan of the most recently accepted solution.
    pub fn plan(&self) -> &O::Plan {
        &self.current_plan
    }

    /// Candidate solutions drawn from the generator so far.
    pub fn generated(&self) -> usize {
        self.generated
    }

    /// ThermalState history, most-recent-first. Unless
    /// [`keep_states`](EngineConfig::keep_states) is set, only the
    /// newest state and the current accepted one are retained.
    pub fn states(&self) -> &[ThermalState<O::Plan>] {
        &self.states
    }

    /// Runs the full search and returns the final accepted plan with
    /// run statistics. Consumes the engine: a finished search cannot be
    /// resumed or re-run.
    pub fn solve(mut self) -> Result<AnnealOutcome<O::Plan>, EngineError> {
        while !self.should_stop() {
            self.schedule.cool();
            self.open_state();
            if self.schedule.is_stopped() {
                break;
            }
            self.temperature_levels += 1;

            let mut step = 0usize;
            while self.has_incomplete_state() {
                if self.config.steps > 0 && step >= self.config.steps {
                    break;
                }
                match self.sample()? {
                    Sampled::Candidate => step += 1,
                    Sampled::Exhausted => break,
                }
            }
        }

        Ok(AnnealOutcome {
            plan: self.current_plan,
            energy: self.current_energy,
            final_temperature: self.schedule.temperature(),
            temperature_levels: self.temperature_levels,
            generated: self.generated,
            accepted_moves: self.accepted_moves,
            rejected_moves: self.rejected_moves,
        })
    }

    /// Draws one candidate, judges it, and records it into the
    /// incomplete state.
    fn sample(&mut self) -> Result<Sampled, EngineError> {
        let generation = self
            .generator
            .next(&self.data, &self.current_plan, &mut self.rng)?;
        let mut solution = match generation {
            Generation::Solution(solution) => solution,
            Generation::Exhausted => return Ok(Sampled::Exhausted),
        };
        self.generated += 1;

        let energy = solution.compute_energy(&self.objective, &self.data)?;
        let delta = energy - self.current_energy;
        if delta > 0.0 {
            if self.metropolis(delta) {
                solution.accept();
            } else {
                solution.reject();
            }
        } else {
            // As good or better: accept unconditionally, no draw.
            solution.accept();
        }

        let accepted = solution.is_accepted();
        let plan = accepted.then(|| solution.plan().clone());
        let live = self.schedule.temperature();
        let added = match self.states.first_mut().filter(|s| !s.is_stopped(live)) {
            Some(state) => state.add_solution(solution),
            None => false,
        };

        if added && accepted {
            self.accepted_moves += 1;
            if let Some(plan) = plan {
                self.current_plan = plan;
            }
            self.current_energy = energy;
        } else if added {
            self.rejected_moves += 1;
        }
        Ok(Sampled::Candidate)
    }

    /// Metropolis acceptance for an uphill move: accept iff a uniform
    /// draw `r` in [0, 1) satisfies `r <= exp(-delta / T)`.
    fn metropolis(&mut self, delta: f64) -> bool {
        let r: f64 = self.rng.random_range(0.0..1.0);
        r <= (-delta / self.schedule.temperature()).exp()
    }

    fn should_stop(&mut self) -> bool {
        let probe = SearchProbe {
            temperature: self.schedule.temperature(),
            temperature_min: self.schedule.temperature_min(),
            energy: self.current_energy,
            generated: self.generated,
        };
        self.criterion.should_stop(&probe)
    }

    fn has_incomplete_state(&self) -> bool {
        let live = self.schedule.temperature();
        self.states.first().is_some_and(|s| !s.is_stopped(live))
    }

    /// Opens a ThermalState at the live temperature, unless an
    /// incomplete one is still open. Without `keep_states`, the history
    /// is pruned to the new state plus the current accepted one.
    fn open_state(&mut self) {
        if self.has_incomplete_state() {
            return;
        }
        let state = ThermalState::new(self.schedule.temperature(), self.config.keep_solutions);
        if self.config.keep_states || self.states.is_empty() {
            self.states.insert(0, state);
        } else {
            let keep = self.take_current_state();
            self.states.clear();
            self.states.push(state);
            if let Some(keep) = keep {
                self.states.push(keep);
            }
        }
    }

    /// Removes and returns the state holding the current accepted
    /// solution: the most recently equilibrated state, falling back to
    /// the oldest (bootstrap) one.
    fn take_current_state(&mut self) -> Option<ThermalState<O::Plan>> {
        if self.states.is_empty() {
            return None;
        }
        let index = self
            .states
            .iter()
            .position(ThermalState::thermal_equilibrium)
            .unwrap_or(self.states.len() - 1);
        Some(self.states.remove(index))
    }
}
