//! Triadic facet/dwelling dynamics.
//!
//! Three facets excite one another through a shared Hill activation while a
//! fourth variable, dwelling, tracks how far the facets are from coherence.
//! The facet subsystem is bistable; [`simulate`] runs it once unperturbed
//! and once with a nudge (an instantaneous jump or a transient pulse) so the
//! two trajectories can be compared sample by sample.
//!
//! Zero I/O — pure math with no opinions about plotting or output.

pub mod analysis;
pub mod constants;
pub mod dynamics;
pub mod error;
pub mod hill;
pub mod integrate;
pub mod nudge;
pub mod params;
pub mod simulate;
pub mod state;
pub mod trajectory;

pub use analysis::{Summary, exploration_reference, linspace};
pub use constants::{DEFAULT_TRAILING_WINDOW, DEFAULT_Y0, EPSILON, MAX_SUBSTEPS, STATE_DIM};
pub use dynamics::{derivative, dwelling_target};
pub use error::{Result, SimError};
pub use hill::{Hill, hill, hill_all};
pub use integrate::{integrate, rk4_step};
pub use nudge::{Nudge, NudgeMode};
pub use params::ModelParams;
pub use simulate::{
    Simulation, nearest_index, simulate, simulate_mode, validate_grid, validate_workload,
};
pub use state::State;
pub use trajectory::Trajectory;
