//! Interventions applied at the split index.
//!
//! A `Jump` displaces the state once and lets the dynamics carry on from the
//! displaced point. A `Pulse` leaves the state continuous and instead adds a
//! half-sine forcing term to the right-hand side for a bounded window.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::STATE_DIM;
use crate::error::{Result, SimError};
use crate::state::State;

/// Default jump: lift every facet by 0.5, leave dwelling alone.
pub const DEFAULT_JUMP_DISPLACEMENT: [f64; STATE_DIM] = [0.5, 0.5, 0.5, 0.0];

/// Default pulse window length.
pub const DEFAULT_PULSE_WIDTH: f64 = 4.0;

/// Default pulse peak forcing per component.
pub const DEFAULT_PULSE_PEAK: [f64; STATE_DIM] = [0.8, 0.8, 0.8, 0.0];

/// Which kind of nudge, without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeMode {
    Jump,
    Pulse,
}

impl FromStr for NudgeMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jump" => Ok(NudgeMode::Jump),
            "pulse" => Ok(NudgeMode::Pulse),
            other => Err(SimError::invalid(format!(
                "unknown nudge mode '{other}' (expected 'jump' or 'pulse')"
            ))),
        }
    }
}

impl fmt::Display for NudgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NudgeMode::Jump => f.write_str("jump"),
            NudgeMode::Pulse => f.write_str("pulse"),
        }
    }
}

/// An intervention together with its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Nudge {
    /// Instantaneous additive displacement of the state.
    Jump { displacement: [f64; STATE_DIM] },
    /// Transient forcing `peak · sin(π·s/width)` for `s = t − t_int ∈ [0, width]`.
    Pulse { width: f64, peak: [f64; STATE_DIM] },
}

impl Default for Nudge {
    fn default() -> Self {
        Nudge::for_mode(NudgeMode::Jump)
    }
}

impl From<NudgeMode> for Nudge {
    fn from(mode: NudgeMode) -> Self {
        Nudge::for_mode(mode)
    }
}

impl Nudge {
    /// The nudge of the given mode with default parameters.
    pub fn for_mode(mode: NudgeMode) -> Self {
        match mode {
            NudgeMode::Jump => Nudge::Jump {
                displacement: DEFAULT_JUMP_DISPLACEMENT,
            },
            NudgeMode::Pulse => Nudge::Pulse {
                width: DEFAULT_PULSE_WIDTH,
                peak: DEFAULT_PULSE_PEAK,
            },
        }
    }

    pub fn mode(&self) -> NudgeMode {
        match self {
            Nudge::Jump { .. } => NudgeMode::Jump,
            Nudge::Pulse { .. } => NudgeMode::Pulse,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Nudge::Jump { displacement } => {
                if displacement.iter().any(|v| !v.is_finite()) {
                    return Err(SimError::invalid("jump displacement must be finite"));
                }
            }
            Nudge::Pulse { width, peak } => {
                if !(width.is_finite() && *width > 0.0) {
                    return Err(SimError::invalid(format!(
                        "pulse width must be positive and finite, got {width}"
                    )));
                }
                if peak.iter().any(|v| !v.is_finite()) {
                    return Err(SimError::invalid("pulse peak must be finite"));
                }
            }
        }
        Ok(())
    }

    /// Displaced state for a jump; `None` for a pulse.
    pub fn displace(&self, state: State) -> Option<State> {
        match self {
            Nudge::Jump { displacement } => Some(state + State(*displacement)),
            Nudge::Pulse { .. } => None,
        }
    }

    /// Additive forcing at time `t` for an intervention starting at `onset`.
    /// Zero outside the pulse window and always zero for a jump.
    pub fn forcing(&self, t: f64, onset: f64) -> State {
        match self {
            Nudge::Jump { .. } => State::default(),
            Nudge::Pulse { width, peak } => {
                let s = t - onset;
                if s < 0.0 || s > *width {
                    return State::default();
                }
                let envelope = (std::f64::consts::PI * s / width).sin();
                State(*peak) * envelope
            }
        }
    }
}
