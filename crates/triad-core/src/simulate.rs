//! Simulation driver: baseline run, intervention, and the spliced run.
//!
//! Both runs start from the same initial state on the same grid. The
//! intervened run shares the baseline's samples up to the split index and
//! continues from there under the nudge.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_Y0, MAX_SUBSTEPS};
use crate::dynamics::derivative;
use crate::error::{Result, SimError};
use crate::integrate::integrate;
use crate::nudge::{Nudge, NudgeMode};
use crate::params::ModelParams;
use crate::state::State;
use crate::trajectory::Trajectory;

/// Outcome of one [`simulate`] call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Simulation {
    /// Unperturbed trajectory, one state per grid sample.
    pub without: Trajectory,
    /// Intervened trajectory, identical to `without` before `idx`.
    pub with: Trajectory,
    /// Grid index nearest the intervention time.
    pub idx: usize,
    /// Initial state actually used.
    pub y0_used: State,
    /// State right after the jump. `None` for a pulse.
    pub y_nudge: Option<State>,
    pub nudge: Nudge,
}

/// Check that `t` is a usable time grid: at least two finite, strictly
/// increasing samples.
pub fn validate_grid(t: &[f64]) -> Result<()> {
    if t.len() < 2 {
        return Err(SimError::invalid(format!(
            "time grid needs at least 2 samples, got {}",
            t.len()
        )));
    }
    if let Some(bad) = t.iter().position(|v| !v.is_finite()) {
        return Err(SimError::invalid(format!(
            "time grid sample {bad} is not finite"
        )));
    }
    if let Some(k) = t.windows(2).position(|w| w[1] <= w[0]) {
        return Err(SimError::invalid(format!(
            "time grid not strictly increasing at index {}: {} then {}",
            k + 1,
            t[k],
            t[k + 1]
        )));
    }
    Ok(())
}

/// Reject grids whose sub-step count under `max_step` exceeds [`MAX_SUBSTEPS`].
pub fn validate_workload(t: &[f64], max_step: f64) -> Result<()> {
    let substeps: f64 = t
        .windows(2)
        .map(|w| ((w[1] - w[0]) / max_step).ceil().max(1.0))
        .sum();
    if !(substeps <= MAX_SUBSTEPS as f64) {
        return Err(SimError::invalid(format!(
            "grid needs {substeps:e} integration steps at max_step={max_step}, limit is {MAX_SUBSTEPS}"
        )));
    }
    Ok(())
}

/// Index of the grid sample nearest `time`; equidistant ties go to the
/// lower index. `t` must be validated and `time` within `[t[0], t[-1]]`.
pub fn nearest_index(t: &[f64], time: f64) -> usize {
    // First sample at or after `time`
    let upper = t.partition_point(|&v| v < time);
    if upper == 0 {
        return 0;
    }
    if upper == t.len() {
        return t.len() - 1;
    }
    let lower = upper - 1;
    if time - t[lower] <= t[upper] - time {
        lower
    } else {
        upper
    }
}

/// Run the unperturbed and intervened scenarios over the grid `t`.
///
/// `y0 = None` starts from [`DEFAULT_Y0`]. All argument checks happen
/// before any integration.
pub fn simulate(
    t: &[f64],
    y0: Option<&[f64]>,
    intervention_time: f64,
    nudge: Nudge,
    params: &ModelParams,
) -> Result<Simulation> {
    validate_grid(t)?;
    let y0_used = match y0 {
        Some(values) => State::from_slice(values)?,
        None => State(DEFAULT_Y0),
    };
    if !y0_used.is_finite() {
        return Err(SimError::invalid("initial state must be finite"));
    }
    let (t_first, t_last) = (t[0], t[t.len() - 1]);
    if !(intervention_time >= t_first && intervention_time <= t_last) {
        return Err(SimError::invalid(format!(
            "intervention time {intervention_time} outside time grid [{t_first}, {t_last}]"
        )));
    }
    nudge.validate()?;
    params.validate()?;
    validate_workload(t, params.max_step)?;

    let idx = nearest_index(t, intervention_time);
    tracing::debug!(
        samples = t.len(),
        idx,
        t_idx = t[idx],
        mode = %nudge.mode(),
        "simulating"
    );

    let rhs = |_t: f64, y: &State| derivative(y, params);
    let without = integrate(rhs, y0_used, t, params.max_step)?;

    // The step sequence of each interval depends only on its endpoints, so
    // re-integrating t[..=idx] would reproduce without[..=idx] bit for bit.
    let mut with = Vec::with_capacity(t.len());
    with.extend_from_slice(&without[..idx]);

    let y_nudge = nudge.displace(without[idx]);
    let post = match nudge {
        Nudge::Jump { .. } => {
            let start = y_nudge.unwrap_or(without[idx]);
            if !start.is_finite() {
                return Err(SimError::Integration {
                    time: t[idx],
                    message: format!("non-finite state after jump {:?}", start.as_array()),
                });
            }
            tracing::debug!(?start, "jump applied");
            integrate(rhs, start, &t[idx..], params.max_step)?
        }
        Nudge::Pulse { .. } => {
            let forced = |time: f64, y: &State| {
                derivative(y, params) + nudge.forcing(time, intervention_time)
            };
            integrate(forced, without[idx], &t[idx..], params.max_step)?
        }
    };
    with.extend(post);

    tracing::debug!(
        coherence_without = without[t.len() - 1].coherence(),
        coherence_with = with[t.len() - 1].coherence(),
        "simulation complete"
    );

    Ok(Simulation {
        without: Trajectory::new(without),
        with: Trajectory::new(with),
        idx,
        y0_used,
        y_nudge,
        nudge,
    })
}

/// [`simulate`] with the nudge given by mode name and default nudge parameters.
pub fn simulate_mode(
    t: &[f64],
    y0: Option<&[f64]>,
    intervention_time: f64,
    nudge_mode: &str,
    params: &ModelParams,
) -> Result<Simulation> {
    let mode: NudgeMode = nudge_mode.parse()?;
    simulate(t, y0, intervention_time, Nudge::for_mode(mode), params)
}
