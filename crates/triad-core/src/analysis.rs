//! Summaries derived from a finished simulation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};
use crate::simulate::Simulation;
use crate::state::State;

/// Evenly spaced grid of `n` samples from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>> {
    if n < 2 {
        return Err(SimError::invalid(format!(
            "linspace needs at least 2 samples, got {n}"
        )));
    }
    if !(start.is_finite() && end.is_finite() && end > start) {
        return Err(SimError::invalid(format!(
            "linspace needs finite start < end, got [{start}, {end}]"
        )));
    }
    let step = (end - start) / (n - 1) as f64;
    let mut grid: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
    grid[n - 1] = end;
    Ok(grid)
}

/// Reference exploration rate for a learner at the given capability:
/// `0.8 (1 − c)² + 0.1`. Dwelling is read against this curve.
pub fn exploration_reference(coherence: f64) -> f64 {
    let gap = 1.0 - coherence;
    0.8 * gap * gap + 0.1
}

/// End-of-run averages for both scenarios.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Summary {
    pub window: usize,
    pub avg_without: State,
    pub avg_with: State,
    /// Coherence of `avg_with` minus coherence of `avg_without`.
    pub coherence_gain: f64,
}

impl Summary {
    /// Trailing-window averages of a simulation. `None` if `window` is zero.
    pub fn from_simulation(sim: &Simulation, window: usize) -> Option<Self> {
        let avg_without = sim.without.trailing_mean(window)?;
        let avg_with = sim.with.trailing_mean(window)?;
        Some(Self {
            window: window.min(sim.without.len()),
            avg_without,
            avg_with,
            coherence_gain: avg_with.coherence() - avg_without.coherence(),
        })
    }

    /// Whether the nudge moved the system into a more coherent regime.
    pub fn is_breakthrough(&self) -> bool {
        self.coherence_gain > 0.0
    }
}
