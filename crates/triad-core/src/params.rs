//! Model configuration: every constant of the right-hand side, with defaults.
//!
//! All fields are `#[serde(default)]`, so a TOML file only needs to name the
//! values it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GAMMA, DEFAULT_MAX_STEP, DEFAULT_STEEPNESS, DEFAULT_THRESHOLD, FACETS,
};
use crate::error::{Result, SimError};
use crate::hill::Hill;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParams {
    /// Hill output scale. Higher gain strengthens mutual facet excitation.
    pub gamma: f64,
    /// Hill half-maximal input. Moves the separatrix between the low and high basins.
    pub threshold: f64,
    /// Hill exponent. Higher values sharpen the switch between basins.
    pub steepness: f64,
    /// `coupling[i][j]`: weight of facet j in facet i's Hill input.
    /// Default: each facet listens to the mean of the other two.
    pub coupling: [[f64; FACETS]; FACETS],
    /// Constant production of every facet.
    pub basal: f64,
    /// Production per unit of Hill response.
    pub drive: f64,
    /// First-order facet decay rate.
    pub decay: f64,
    /// Facet production per unit of dwelling (exploration feeds activation).
    pub dwelling_gain: f64,
    /// Relaxation rate of dwelling toward its coherence-dependent target.
    pub dwelling_rate: f64,
    /// Dwelling target span: target = span · (1 − C)² + floor.
    pub dwelling_span: f64,
    /// Dwelling target at full coherence.
    pub dwelling_floor: f64,
    /// Largest RK4 sub-step between grid samples.
    pub max_step: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            threshold: DEFAULT_THRESHOLD,
            steepness: DEFAULT_STEEPNESS,
            coupling: [[0.0, 0.5, 0.5], [0.5, 0.0, 0.5], [0.5, 0.5, 0.0]],
            basal: 0.05,
            drive: 0.09,
            decay: 1.0,
            dwelling_gain: 0.05,
            dwelling_rate: 0.5,
            dwelling_span: 0.8,
            dwelling_floor: 0.1,
            max_step: DEFAULT_MAX_STEP,
        }
    }
}

impl ModelParams {
    pub fn hill(&self) -> Hill {
        Hill::new(self.gamma, self.threshold, self.steepness)
    }

    /// Reject parameters the dynamics cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("gamma", self.gamma),
            ("threshold", self.threshold),
            ("steepness", self.steepness),
            ("max_step", self.max_step),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::invalid(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        let finite = [
            ("basal", self.basal),
            ("drive", self.drive),
            ("decay", self.decay),
            ("dwelling_gain", self.dwelling_gain),
            ("dwelling_rate", self.dwelling_rate),
            ("dwelling_span", self.dwelling_span),
            ("dwelling_floor", self.dwelling_floor),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(SimError::invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if self.coupling.iter().flatten().any(|w| !w.is_finite()) {
            return Err(SimError::invalid("coupling weights must be finite"));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let params: Self = toml::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
