use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::constants::STATE_DIM;
use crate::state::State;

/// Ordered states, one per time-grid sample.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory(Vec<State>);

impl Trajectory {
    pub fn new(states: Vec<State>) -> Self {
        Self(states)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.0
    }

    pub fn last(&self) -> Option<&State> {
        self.0.last()
    }

    /// Values of one component over time (0..=2 facets, 3 dwelling).
    pub fn component(&self, k: usize) -> Vec<f64> {
        self.0.iter().map(|s| s[k]).collect()
    }

    /// Mean facet activation at every sample.
    pub fn coherence(&self) -> Vec<f64> {
        self.0.iter().map(State::coherence).collect()
    }

    /// Component-wise mean of the last `window` samples.
    ///
    /// A window longer than the trajectory averages everything; an empty
    /// trajectory or zero window yields `None`.
    pub fn trailing_mean(&self, window: usize) -> Option<State> {
        let n = window.min(self.0.len());
        if n == 0 {
            return None;
        }
        let mut sum = [0.0; STATE_DIM];
        for s in &self.0[self.0.len() - n..] {
            for (acc, v) in sum.iter_mut().zip(s.0) {
                *acc += v;
            }
        }
        Some(State(sum.map(|v| v / n as f64)))
    }

    /// First index at which the two trajectories differ by more than `tol`
    /// in any component.
    pub fn divergence_index(&self, other: &Trajectory, tol: f64) -> Option<usize> {
        self.0.iter().zip(&other.0).position(|(a, b)| {
            a.0.iter()
                .zip(b.0.iter())
                .any(|(x, y)| (x - y).abs() > tol)
        })
    }

    pub fn into_inner(self) -> Vec<State> {
        self.0
    }
}

impl Index<usize> for Trajectory {
    type Output = State;

    fn index(&self, i: usize) -> &State {
        &self.0[i]
    }
}
