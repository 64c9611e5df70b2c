//! Cooling schedules: deterministic temperature-update state machines.
//!
//! A [`CoolingSchedule`] maps an iteration counter `k` to a temperature.
//! Three closed-form variants are supported; all use the *initial*
//! temperature `T0` captured once at construction, so the sequence of
//! temperatures is fully determined by `(T0, alpha, k, n, variant)`.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Nourani & Andresen (1998), "A comparison of simulated annealing cooling strategies"

/// Temperature-update formula selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingVariant {
    /// `T(k) = (alpha * T0) / ln(1 + k)`.
    ///
    /// Very slow cooling with a theoretical convergence guarantee.
    /// Rarely practical; included for completeness.
    Logarithmic,

    /// `T(k) = alpha^k * T0`.
    ///
    /// The standard textbook schedule. Valid `alpha` in (0, 1);
    /// closer to 1 means slower cooling.
    Geometric,

    /// `T(k) = T0 * exp(-alpha * k^(1/n))`.
    ///
    /// `n` is the dimensionality of the model space; higher `n`
    /// stretches the cooling curve.
    Exponential,
}

/// Outcome of a [`CoolingSchedule::cool`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolingStatus {
    /// Temperature was updated; sampling can continue.
    Continue,
    /// The next temperature would fall below the floor. Terminal: the
    /// stored temperature never changes again.
    Stopped,
}

/// Deterministic temperature controller for one annealing run.
///
/// Invariant: the committed temperature is monotonically non-increasing
/// across successful [`cool`](Self::cool) calls. Invalid parameter
/// combinations (e.g. `alpha >= 1` for the geometric variant) are not
/// validated here; they simply produce [`CoolingStatus::Stopped`] on the
/// first call, or never stop. [`crate::config::EngineConfig::validate`]
/// offers fail-fast checking for callers that want it.
#[derive(Debug, Clone)]
pub struct CoolingSchedule {
    temperature: f64,
    initial_temperature: f64,
    temperature_min: f64,
    speed: f64,
    k: u64,
    n: f64,
    variant: CoolingVariant,
    status: CoolingStatus,
}

impl CoolingSchedule {
    /// Creates a schedule at `initial_temperature` with iteration counter 0.
    pub fn new(
        initial_temperature: f64,
        temperature_min: f64,
        speed: f64,
        variant: CoolingVariant,
    ) -> Self {
        Self {
            temperature: initial_temperature,
            initial_temperature,
            temperature_min,
            speed,
            k: 0,
            n: 1.0,
            variant,
            status: CoolingStatus::Continue,
        }
    }

    /// Sets the model-space dimensionality used by the exponential
    /// variant. Ignored by the other variants.
    pub fn with_dimensionality(mut self, n: f64) -> Self {
        self.n = n;
        self
    }

    /// Advances the iteration counter and attempts to commit the next
    /// temperature.
    ///
    /// Returns [`CoolingStatus::Continue`] and updates the stored
    /// temperature when the computed value is still at or above the
    /// floor; otherwise leaves the temperature untouched and reports
    /// the terminal [`CoolingStatus::Stopped`].
    pub fn cool(&mut self) -> CoolingStatus {
        if self.status == CoolingStatus::Stopped {
            return CoolingStatus::Stopped;
        }
        self.k += 1;
        let next = self.next_temperature();
        if next >= self.temperature_min {
            self.temperature = next;
            CoolingStatus::Continue
        } else {
            self.status = CoolingStatus::Stopped;
            CoolingStatus::Stopped
        }
    }

    fn next_temperature(&self) -> f64 {
        let k = self.k as f64;
        let t0 = self.initial_temperature;
        match self.variant {
            CoolingVariant::Logarithmic => self.speed * t0 / (1.0 + k).ln(),
            CoolingVariant::Geometric => self.speed.powf(k) * t0,
            CoolingVariant::Exponential => t0 * (-self.speed * k.powf(1.0 / self.n)).exp(),
        }
    }

    /// Current committed temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Initial temperature captured at construction.
    pub fn initial_temperature(&self) -> f64 {
        self.initial_temperature
    }

    /// Temperature floor below which cooling stops.
    pub fn temperature_min(&self) -> f64 {
        self.temperature_min
    }

    /// Number of `cool` calls made so far.
    pub fn iteration(&self) -> u64 {
        self.k
    }

    /// Whether the schedule has reached its terminal state.
    pub fn is_stopped(&self) -> bool {
        self.status == CoolingStatus::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_geometric_closed_form() {
        // T0=1000, alpha=0.9, k=3 => 0.9^3 * 1000 = 729
        let mut schedule =
            CoolingSchedule::new(1000.0, 1.0, 0.9, CoolingVariant::Geometric);
        schedule.cool();
        schedule.cool();
        schedule.cool();
        assert_eq!(schedule.iteration(), 3);
        assert!((schedule.temperature() - 729.0).abs() < 1e-9);
    }

    #[test]
    fn test_logarithmic_closed_form() {
        // T(k) = alpha * T0 / ln(1 + k); k=1 => 0.5 * 100 / ln(2)
        let mut schedule =
            CoolingSchedule::new(100.0, 0.001, 0.5, CoolingVariant::Logarithmic);
        assert_eq!(schedule.cool(), CoolingStatus::Continue);
        let expected = 0.5 * 100.0 / 2.0_f64.ln();
        assert!((schedule.temperature() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_closed_form() {
        // T(k) = T0 * exp(-alpha * k^(1/n)); k=4, n=2 => T0 * exp(-0.5 * 2)
        let mut schedule = CoolingSchedule::new(100.0, 1e-9, 0.5, CoolingVariant::Exponential)
            .with_dimensionality(2.0);
        for _ in 0..4 {
            schedule.cool();
        }
        let expected = 100.0 * (-0.5 * 4.0_f64.powf(0.5)).exp();
        assert!((schedule.temperature() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_stopped_is_terminal() {
        let mut schedule = CoolingSchedule::new(10.0, 9.5, 0.5, CoolingVariant::Geometric);
        assert_eq!(schedule.cool(), CoolingStatus::Stopped);
        let frozen = schedule.temperature();
        assert_eq!(schedule.cool(), CoolingStatus::Stopped);
        assert_eq!(schedule.temperature(), frozen);
        assert!(schedule.is_stopped());
    }

    #[test]
    fn test_temperature_unchanged_on_stop() {
        // alpha >= 1 on the geometric variant never cools, so the first
        // call that undershoots the floor must leave temperature intact.
        let mut schedule = CoolingSchedule::new(10.0, 5.0, 0.1, CoolingVariant::Geometric);
        schedule.cool();
        assert!(schedule.is_stopped());
        assert_eq!(schedule.temperature(), 10.0);
    }

    proptest! {
        #[test]
        fn prop_geometric_monotone_and_stops(
            t0 in 1.0_f64..1e6,
            alpha in 0.01_f64..0.99,
        ) {
            let t_min = t0 / 1e9;
            let mut schedule = CoolingSchedule::new(t0, t_min, alpha, CoolingVariant::Geometric);
            let mut previous = schedule.temperature();
            let mut calls = 0usize;
            while schedule.cool() == CoolingStatus::Continue {
                prop_assert!(schedule.temperature() <= previous);
                previous = schedule.temperature();
                calls += 1;
                prop_assert!(calls < 100_000, "geometric schedule failed to stop");
            }
            prop_assert!(schedule.is_stopped());
            prop_assert!(schedule.temperature() >= t_min);
        }

        #[test]
        fn prop_exponential_monotone(
            t0 in 1.0_f64..1e4,
            alpha in 0.01_f64..2.0,
            n in 1.0_f64..4.0,
        ) {
            let mut schedule = CoolingSchedule::new(t0, 1e-12, alpha, CoolingVariant::Exponential)
                .with_dimensionality(n);
            let mut previous = schedule.temperature();
            for _ in 0..50 {
                if schedule.cool() == CoolingStatus::Stopped {
                    break;
                }
                prop_assert!(schedule.temperature() <= previous);
                previous = schedule.temperature();
            }
        }
    }
}
