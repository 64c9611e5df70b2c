//! Engine configuration.

use crate::error::EngineError;
use crate::schedule::CoolingVariant;

/// Configuration for one annealing run.
///
/// # Examples
///
/// ```
/// use annealer::{CoolingVariant, EngineConfig};
///
/// let config = EngineConfig::default()
///     .with_initial_temperature(100.0)
///     .with_temperature_min(1.0)
///     .with_cooling_speed(0.9)
///     .with_variant(CoolingVariant::Geometric)
///     .with_steps(50)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Temperature floor. Cooling stops once the next computed
    /// temperature would fall below it.
    pub temperature_min: f64,

    /// Cooling-speed parameter `alpha`. Valid range depends on the
    /// variant: (0, 1) for geometric and logarithmic, any positive
    /// value for exponential.
    pub cooling_speed: f64,

    /// Temperature-update formula.
    pub variant: CoolingVariant,

    /// Model-space dimensionality `n`, used only by the exponential
    /// variant.
    pub dimensionality: f64,

    /// Per-temperature sampling budget. 0 = no cap: sample until
    /// equilibrium or generator exhaustion. With a never-exhausting
    /// generator that never reaches equilibrium, 0 loops forever at one
    /// temperature; that hazard is the caller's to avoid.
    pub steps: usize,

    /// Retain every ThermalState rather than only the newest plus the
    /// current accepted one.
    pub keep_states: bool,

    /// Retain every solution within a state rather than only the two
    /// most recent.
    pub keep_solutions: bool,

    /// Random seed for reproducibility. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            temperature_min: 1e-6,
            cooling_speed: 0.95,
            variant: CoolingVariant::Geometric,
            dimensionality: 1.0,
            steps: 0,
            keep_states: false,
            keep_solutions: false,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the initial temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the temperature floor.
    pub fn with_temperature_min(mut self, t: f64) -> Self {
        self.temperature_min = t;
        self
    }

    /// Sets the cooling-speed parameter.
    pub fn with_cooling_speed(mut self, alpha: f64) -> Self {
        self.cooling_speed = alpha;
        self
    }

    /// Sets the cooling variant.
    pub fn with_variant(mut self, variant: CoolingVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Sets the model-space dimensionality for the exponential variant.
    pub fn with_dimensionality(mut self, n: f64) -> Self {
        self.dimensionality = n;
        self
    }

    /// Sets the per-temperature sampling budget (0 = no cap).
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Retains the full ThermalState history.
    pub fn with_keep_states(mut self, keep: bool) -> Self {
        self.keep_states = keep;
        self
    }

    /// Retains the full solution history within each state.
    pub fn with_keep_solutions(mut self, keep: bool) -> Self {
        self.keep_solutions = keep;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Fail-fast validation of parameter ranges.
    ///
    /// The cooling schedule itself tolerates invalid combinations by
    /// reporting `Stopped` on its first call (or never stopping);
    /// engine construction calls this instead so misconfiguration
    /// surfaces as an error rather than a silent non-search.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(EngineError::configuration(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !self.temperature_min.is_finite() || self.temperature_min <= 0.0 {
            return Err(EngineError::configuration(format!(
                "temperature_min must be positive and finite, got {}",
                self.temperature_min
            )));
        }
        if self.temperature_min >= self.initial_temperature {
            return Err(EngineError::configuration(
                "temperature_min must be less than initial_temperature",
            ));
        }
        match self.variant {
            CoolingVariant::Geometric | CoolingVariant::Logarithmic => {
                if self.cooling_speed <= 0.0 || self.cooling_speed >= 1.0 {
                    return Err(EngineError::configuration(format!(
                        "cooling_speed must be in (0, 1) for {:?}, got {}",
                        self.variant, self.cooling_speed
                    )));
                }
            }
            CoolingVariant::Exponential => {
                if !self.cooling_speed.is_finite() || self.cooling_speed <= 0.0 {
                    return Err(EngineError::configuration(format!(
                        "cooling_speed must be positive for Exponential, got {}",
                        self.cooling_speed
                    )));
                }
                if !self.dimensionality.is_finite() || self.dimensionality <= 0.0 {
                    return Err(EngineError::configuration(format!(
                        "dimensionality must be positive, got {}",
                        self.dimensionality
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.steps, 0);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_round_trip() {
        let config = EngineConfig::default()
            .with_initial_temperature(500.0)
            .with_temperature_min(0.5)
            .with_cooling_speed(0.8)
            .with_variant(CoolingVariant::Exponential)
            .with_dimensionality(3.0)
            .with_steps(25)
            .with_keep_states(true)
            .with_keep_solutions(true)
            .with_seed(7);
        assert_eq!(config.initial_temperature, 500.0);
        assert_eq!(config.variant, CoolingVariant::Exponential);
        assert_eq!(config.seed, Some(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nonpositive_temperatures() {
        assert!(EngineConfig::default()
            .with_initial_temperature(0.0)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_temperature_min(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_rejects_min_above_initial() {
        let config = EngineConfig::default()
            .with_initial_temperature(10.0)
            .with_temperature_min(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_geometric_speed_of_one() {
        let config = EngineConfig::default().with_cooling_speed(1.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_allows_exponential_speed_above_one() {
        let config = EngineConfig::default()
            .with_variant(CoolingVariant::Exponential)
            .with_cooling_speed(2.5);
        assert!(config.validate().is_ok());
    }
}
