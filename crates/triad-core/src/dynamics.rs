//! Right-hand side of the triadic system.
//!
//!   uᵢ     = Σⱼ wᵢⱼ fⱼ
//!   dfᵢ/dt = basal + drive · hill(uᵢ) + g_d · d − decay · fᵢ
//!   dd/dt  = r_d · (span · (1 − C)² + floor − d),   C = (f₁ + f₂ + f₃) / 3
//!
//! With the defaults the facet subsystem is bistable: a low basin near 0.09
//! and a high basin near 0.93, separated around 0.47. Dwelling tracks the
//! exploration target `span · (1 − C)² + floor`, so it sits high while the
//! facets idle in the low basin and drops once they cohere.

use crate::constants::FACETS;
use crate::params::ModelParams;
use crate::state::State;

/// Target dwelling level for a given coherence.
pub fn dwelling_target(coherence: f64, params: &ModelParams) -> f64 {
    let gap = 1.0 - coherence;
    params.dwelling_span * gap * gap + params.dwelling_floor
}

/// Time derivative of the unforced system at `y`.
pub fn derivative(y: &State, params: &ModelParams) -> State {
    let hill = params.hill();
    let facets = y.facets();
    let d = y.dwelling();

    let mut out = [0.0; 4];
    for i in 0..FACETS {
        let input: f64 = params.coupling[i]
            .iter()
            .zip(facets.iter())
            .map(|(w, f)| w * f)
            .sum();
        out[i] = params.basal + params.drive * hill.eval(input) + params.dwelling_gain * d
            - params.decay * facets[i];
    }
    out[3] = params.dwelling_rate * (dwelling_target(y.coherence(), params) - d);

    State(out)
}
