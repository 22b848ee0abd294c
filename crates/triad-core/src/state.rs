use std::ops::{Add, Index, Mul};

use serde::{Deserialize, Serialize};

use crate::constants::{EPSILON, FACETS, STATE_DIM};
use crate::error::{Result, SimError};

/// Point in the model's phase space: `(f1, f2, f3, d)`.
///
/// The first three components are facet activations, the last is dwelling.
/// No range is enforced; trajectories starting in [0, 1] stay near it.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub [f64; STATE_DIM]);

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() < EPSILON)
    }
}

impl State {
    pub fn new(f1: f64, f2: f64, f3: f64, dwelling: f64) -> Self {
        Self([f1, f2, f3, dwelling])
    }

    /// Build a state from an arbitrary slice, requiring exactly four components.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let arr: [f64; STATE_DIM] = values.try_into().map_err(|_| {
            SimError::invalid(format!(
                "state must have exactly {STATE_DIM} components, got {}",
                values.len()
            ))
        })?;
        Ok(Self(arr))
    }

    pub fn facets(&self) -> [f64; FACETS] {
        [self.0[0], self.0[1], self.0[2]]
    }

    pub fn dwelling(&self) -> f64 {
        self.0[3]
    }

    /// Mean of the three facets.
    pub fn coherence(&self) -> f64 {
        self.facets().iter().sum::<f64>() / FACETS as f64
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    pub fn as_array(&self) -> [f64; STATE_DIM] {
        self.0
    }

    /// Exact component-wise equality, no tolerance.
    pub fn bit_eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Index<usize> for State {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl Add for State {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut out = self.0;
        for (o, r) in out.iter_mut().zip(rhs.0) {
            *o += r;
        }
        Self(out)
    }
}

impl Mul<f64> for State {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self(self.0.map(|v| v * k))
    }
}

impl From<[f64; STATE_DIM]> for State {
    fn from(arr: [f64; STATE_DIM]) -> Self {
        Self(arr)
    }
}
