/// Numerical epsilon for near-zero comparisons
pub const EPSILON: f64 = 1e-10;

/// Number of state components: three facets plus dwelling.
pub const STATE_DIM: usize = 4;

/// Number of coupled facets.
pub const FACETS: usize = 3;

/// Initial state used when the caller does not supply one:
/// modest partial activation, moderate dwelling already present.
pub const DEFAULT_Y0: [f64; STATE_DIM] = [0.2, 0.1, 0.15, 0.6];

/// Hill output scale.
pub const DEFAULT_GAMMA: f64 = 10.0;

/// Hill half-maximal input.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Hill exponent.
pub const DEFAULT_STEEPNESS: f64 = 6.0;

/// Largest RK4 sub-step between two grid samples.
pub const DEFAULT_MAX_STEP: f64 = 0.01;

/// Trailing window (in samples) used for end-of-run averages.
pub const DEFAULT_TRAILING_WINDOW: usize = 100;

/// Upper bound on total RK4 sub-steps for one trajectory.
pub const MAX_SUBSTEPS: u64 = 100_000_000;
