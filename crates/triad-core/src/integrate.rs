//! Fixed-step RK4 sampled on a caller-supplied time grid.
//!
//! Every grid interval is split into `ceil(Δt / max_step)` equal sub-steps,
//! so the solution is reported at exactly the grid points and the step
//! sequence of an interval depends only on its endpoints.

use crate::error::{Result, SimError};
use crate::state::State;

/// One classical RK4 step of size `h` from `(t, y)`.
pub fn rk4_step<F>(rhs: &F, t: f64, y: State, h: f64) -> State
where
    F: Fn(f64, &State) -> State,
{
    let k1 = rhs(t, &y);
    let k2 = rhs(t + h / 2.0, &(y + k1 * (h / 2.0)));
    let k3 = rhs(t + h / 2.0, &(y + k2 * (h / 2.0)));
    let k4 = rhs(t + h, &(y + k3 * h));
    y + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// Integrate from `y0` at `grid[0]` and return one state per grid sample.
///
/// The grid is assumed validated (strictly increasing, at least one point).
/// Fails on the first non-finite state.
pub fn integrate<F>(rhs: F, y0: State, grid: &[f64], max_step: f64) -> Result<Vec<State>>
where
    F: Fn(f64, &State) -> State,
{
    let mut out = Vec::with_capacity(grid.len());
    let mut y = y0;
    out.push(y);

    for window in grid.windows(2) {
        let (t0, t1) = (window[0], window[1]);
        let n_sub = ((t1 - t0) / max_step).ceil().max(1.0) as usize;
        let h = (t1 - t0) / n_sub as f64;

        for k in 0..n_sub {
            let t = t0 + k as f64 * h;
            y = rk4_step(&rhs, t, y, h);
            if !y.is_finite() {
                return Err(SimError::Integration {
                    time: t + h,
                    message: format!("non-finite state {:?}", y.as_array()),
                });
            }
        }
        out.push(y);
    }

    Ok(out)
}
