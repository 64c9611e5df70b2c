//! Per-temperature solution containers and equilibrium detection.

use crate::solution::Solution;

/// All solutions observed while the system sits at one temperature,
/// most-recent-first.
///
/// A state is open until it reaches *thermal equilibrium*: the
/// most-recently-added solution is accepted. After that, append
/// attempts are refused and the state is closed for good.
#[derive(Debug, Clone)]
pub struct ThermalState<P> {
    temperature: f64,
    solutions: Vec<Solution<P>>,
    keep_solutions: bool,
    bootstrap: bool,
}

impl<P> ThermalState<P> {
    /// Opens a state at the given temperature.
    ///
    /// When `keep_solutions` is false, only the two most recent
    /// solutions (current + immediately prior) are retained to bound
    /// memory.
    pub fn new(temperature: f64, keep_solutions: bool) -> Self {
        Self {
            temperature,
            solutions: Vec::new(),
            keep_solutions,
            bootstrap: false,
        }
    }

    /// Opens the engine's one-time bootstrap state, which holds the
    /// forcibly-accepted initial solution and never accepts sampling
    /// work.
    pub fn bootstrap(temperature: f64, keep_solutions: bool) -> Self {
        Self {
            bootstrap: true,
            ..Self::new(temperature, keep_solutions)
        }
    }

    /// True iff the most-recently-added solution is accepted. An empty
    /// state is not at equilibrium.
    pub fn thermal_equilibrium(&self) -> bool {
        self.solutions.first().is_some_and(Solution::is_accepted)
    }

    /// Inserts a solution at the front unless equilibrium has been
    /// reached. Returns whether the solution was added.
    pub fn add_solution(&mut self, solution: Solution<P>) -> bool {
        if self.thermal_equilibrium() {
            return false;
        }
        self.solutions.insert(0, solution);
        if !self.keep_solutions {
            self.solutions.truncate(2);
        }
        true
    }

    /// Whether this state can no longer accept work: its temperature no
    /// longer matches the engine's live temperature, it is the
    /// bootstrap state, or it has reached equilibrium.
    pub fn is_stopped(&self, live_temperature: f64) -> bool {
        self.temperature != live_temperature || self.bootstrap || self.thermal_equilibrium()
    }

    /// The most recently added solution.
    pub fn latest(&self) -> Option<&Solution<P>> {
        self.solutions.first()
    }

    /// Retained solutions, most-recent-first.
    pub fn solutions(&self) -> &[Solution<P>] {
        &self.solutions
    }

    /// Temperature captured when the state was opened.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Whether this is the engine's bootstrap state.
    pub fn is_bootstrap(&self) -> bool {
        self.bootstrap
    }

    /// Number of retained solutions.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Whether no solutions have been retained.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: usize) -> Solution<Vec<usize>> {
        Solution::new(vec![id])
    }

    fn accepted(id: usize) -> Solution<Vec<usize>> {
        let mut solution = candidate(id);
        solution.accept();
        solution
    }

    #[test]
    fn test_empty_state_not_at_equilibrium() {
        let state: ThermalState<Vec<usize>> = ThermalState::new(10.0, true);
        assert!(!state.thermal_equilibrium());
        assert!(state.is_empty());
    }

    #[test]
    fn test_equilibrium_tracks_front_solution() {
        let mut state = ThermalState::new(10.0, true);
        assert!(state.add_solution(candidate(0)));
        assert!(!state.thermal_equilibrium());
        assert!(state.add_solution(accepted(1)));
        assert!(state.thermal_equilibrium());
    }

    #[test]
    fn test_add_refused_after_equilibrium() {
        let mut state = ThermalState::new(10.0, true);
        state.add_solution(accepted(0));
        let before = state.len();
        assert!(!state.add_solution(candidate(1)));
        assert_eq!(state.len(), before);
        assert_eq!(state.latest().unwrap().plan(), &vec![0]);
    }

    #[test]
    fn test_truncation_keeps_two_most_recent() {
        let mut state = ThermalState::new(10.0, false);
        state.add_solution(candidate(0));
        state.add_solution(candidate(1));
        state.add_solution(candidate(2));
        assert_eq!(state.len(), 2);
        assert_eq!(state.latest().unwrap().plan(), &vec![2]);
        assert_eq!(state.solutions()[1].plan(), &vec![1]);
    }

    #[test]
    fn test_full_history_retained_when_enabled() {
        let mut state = ThermalState::new(10.0, true);
        for id in 0..5 {
            state.add_solution(candidate(id));
        }
        assert_eq!(state.len(), 5);
    }

    #[test]
    fn test_is_stopped_conditions() {
        let open = {
            let mut s = ThermalState::new(10.0, true);
            s.add_solution(candidate(0));
            s
        };
        assert!(!open.is_stopped(10.0));
        // Temperature moved on.
        assert!(open.is_stopped(9.0));

        let boot: ThermalState<Vec<usize>> = ThermalState::bootstrap(10.0, true);
        assert!(boot.is_stopped(10.0));

        let mut equilibrated = ThermalState::new(10.0, true);
        equilibrated.add_solution(accepted(0));
        assert!(equilibrated.is_stopped(10.0));
    }
}
