use crate::core::models::boxes::Axis;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Planar periodicity requires two distinct axes, got {0} twice")]
    DuplicatePeriodicAxes(Axis),
    #[error("TOML parsing error: {0}")]
    Parse(String),
}

/// Named scalar parameters consumed by the pair-interaction engine.
///
/// These are the engine-facing subset of the simulation parameters: the
/// integrator layer owns the full parameter surface and hands this view to
/// [`crate::engine::context::SimulationContext`].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SimulationParameters {
    /// Temperature in Kelvin.
    pub temperature: f64,
    /// Integration timestep in picoseconds.
    pub timestep: f64,
    /// Number of steps between pair-list regenerations.
    pub pair_list_update_interval: usize,
    /// Bare interaction cutoff in nanometers.
    pub cutoff: f64,
    /// Whether to drop non-bonded pairs whose members are both frozen.
    #[serde(default)]
    pub exclude_frozen_pairs: bool,
}

impl SimulationParameters {
    /// Parses parameters from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parameters: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        parameters.validate()?;
        Ok(parameters)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "temperature",
                reason: format!("must be non-negative, got {}", self.temperature),
            });
        }
        if self.timestep <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "timestep",
                reason: format!("must be positive, got {}", self.timestep),
            });
        }
        if self.pair_list_update_interval == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "pair_list_update_interval",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.cutoff <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "cutoff",
                reason: format!("must be positive, got {}", self.cutoff),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SimulationParametersBuilder {
    temperature: Option<f64>,
    timestep: Option<f64>,
    pair_list_update_interval: Option<usize>,
    cutoff: Option<f64>,
    exclude_frozen_pairs: bool,
}

impl SimulationParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, kelvin: f64) -> Self {
        self.temperature = Some(kelvin);
        self
    }
    pub fn timestep(mut self, picoseconds: f64) -> Self {
        self.timestep = Some(picoseconds);
        self
    }
    pub fn pair_list_update_interval(mut self, steps: usize) -> Self {
        self.pair_list_update_interval = Some(steps);
        self
    }
    pub fn cutoff(mut self, nanometers: f64) -> Self {
        self.cutoff = Some(nanometers);
        self
    }
    pub fn exclude_frozen_pairs(mut self, exclude: bool) -> Self {
        self.exclude_frozen_pairs = exclude;
        self
    }

    pub fn build(self) -> Result<SimulationParameters, ConfigError> {
        let parameters = SimulationParameters {
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            timestep: self
                .timestep
                .ok_or(ConfigError::MissingParameter("timestep"))?,
            pair_list_update_interval: self
                .pair_list_update_interval
                .ok_or(ConfigError::MissingParameter("pair_list_update_interval"))?,
            cutoff: self.cutoff.ok_or(ConfigError::MissingParameter("cutoff"))?,
            exclude_frozen_pairs: self.exclude_frozen_pairs,
        };
        parameters.validate()?;
        Ok(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_valid_parameters() {
        let parameters = SimulationParametersBuilder::new()
            .temperature(298.15)
            .timestep(0.002)
            .pair_list_update_interval(10)
            .cutoff(1.2)
            .exclude_frozen_pairs(true)
            .build()
            .unwrap();
        assert_eq!(parameters.temperature, 298.15);
        assert_eq!(parameters.pair_list_update_interval, 10);
        assert!(parameters.exclude_frozen_pairs);
    }

    #[test]
    fn builder_fails_on_missing_parameter() {
        let result = SimulationParametersBuilder::new()
            .temperature(298.15)
            .timestep(0.002)
            .cutoff(1.2)
            .build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("pair_list_update_interval"))
        );
    }

    #[test]
    fn builder_rejects_invalid_values() {
        let result = SimulationParametersBuilder::new()
            .temperature(298.15)
            .timestep(-0.002)
            .pair_list_update_interval(10)
            .cutoff(1.2)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "timestep", .. })
        ));
        let result = SimulationParametersBuilder::new()
            .temperature(298.15)
            .timestep(0.002)
            .pair_list_update_interval(0)
            .cutoff(1.2)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "pair_list_update_interval",
                ..
            })
        ));
    }

    #[test]
    fn from_toml_str_parses_and_validates() {
        let parameters = SimulationParameters::from_toml_str(
            r#"
            temperature = 300.0
            timestep = 0.002
            pair_list_update_interval = 20
            cutoff = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(parameters.cutoff, 2.5);
        assert!(!parameters.exclude_frozen_pairs);

        let result = SimulationParameters::from_toml_str("temperature = 300.0");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = SimulationParameters::from_toml_str(
            r#"
            temperature = 300.0
            timestep = 0.002
            pair_list_update_interval = 20
            cutoff = -1.0
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { name: "cutoff", .. })
        ));
    }
}
