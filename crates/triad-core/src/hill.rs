//! Hill activation: the saturating gain shared by all facet equations.
//!
//!   hill(x) = γ · xⁿ / (xⁿ + θⁿ)
//!
//! Zero at x = 0, γ/2 at x = θ, approaching γ as x grows. Larger n pushes
//! the curve toward a step at θ.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_GAMMA, DEFAULT_STEEPNESS, DEFAULT_THRESHOLD};

/// Evaluate the Hill curve at a single input.
///
/// Negative inputs are clamped to 0 rather than evaluated, so the output is
/// 0 for every `x <= 0` (even when an even integer exponent would make the
/// literal formula positive). Positive inputs use the ratio form
/// `γ / (1 + (θ/x)ⁿ)`: an overflowing ratio gives 0 and an underflowing one
/// gives γ, so large exponents never produce 0/0.
pub fn hill(x: f64, gamma: f64, threshold: f64, steepness: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let ratio = (threshold / x).powf(steepness);
    gamma / (1.0 + ratio)
}

/// Elementwise [`hill`] over a slice.
pub fn hill_all(xs: &[f64], gamma: f64, threshold: f64, steepness: f64) -> Vec<f64> {
    xs.iter()
        .map(|&x| hill(x, gamma, threshold, steepness))
        .collect()
}

/// A parametrized Hill curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hill {
    pub gamma: f64,
    pub threshold: f64,
    pub steepness: f64,
}

impl Default for Hill {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_GAMMA,
            threshold: DEFAULT_THRESHOLD,
            steepness: DEFAULT_STEEPNESS,
        }
    }
}

impl Hill {
    pub fn new(gamma: f64, threshold: f64, steepness: f64) -> Self {
        Self {
            gamma,
            threshold,
            steepness,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        hill(x, self.gamma, self.threshold, self.steepness)
    }

    pub fn eval_all(&self, xs: &[f64]) -> Vec<f64> {
        hill_all(xs, self.gamma, self.threshold, self.steepness)
    }
}
