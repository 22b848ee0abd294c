//! End-to-end scenarios: grid → simulate → trailing summaries.

use triad_core::{
    DEFAULT_TRAILING_WINDOW, ModelParams, Nudge, NudgeMode, SimError, State, Summary, linspace,
    simulate, simulate_mode,
};

use proptest::prelude::*;

const Y0: [f64; 4] = [0.2, 0.1, 0.15, 0.6];

fn full_grid() -> Vec<f64> {
    linspace(0.0, 50.0, 500).unwrap()
}

fn argmin_distance(t: &[f64], time: f64) -> usize {
    let mut best = 0;
    for (i, v) in t.iter().enumerate() {
        if (v - time).abs() < (t[best] - time).abs() {
            best = i;
        }
    }
    best
}

/// The reference scenario: a jump at mid-run lifts the facets out of the
/// low basin and dwelling falls with it.
#[test]
fn jump_enables_breakthrough() {
    let t = full_grid();
    let sim = simulate_mode(&t, Some(Y0.as_slice()), 25.0, "jump", &ModelParams::default()).unwrap();

    assert_eq!(sim.idx, 249);
    assert_eq!(sim.idx, argmin_distance(&t, 25.0));
    assert_eq!(sim.without.len(), t.len());
    assert_eq!(sim.with.len(), t.len());

    for i in 0..sim.idx {
        assert!(
            sim.with[i].bit_eq(&sim.without[i]),
            "trajectories differ before the intervention at {i}"
        );
    }
    let y_nudge = sim.y_nudge.expect("jump reports its post-nudge state");
    assert!(sim.with[sim.idx].bit_eq(&y_nudge));
    assert!(!sim.with[sim.idx].bit_eq(&sim.without[sim.idx]));
    assert_eq!(sim.without.divergence_index(&sim.with, 1e-12), Some(sim.idx));

    let summary = Summary::from_simulation(&sim, DEFAULT_TRAILING_WINDOW).unwrap();
    assert!(summary.is_breakthrough());
    assert!(
        summary.avg_without.coherence() < 0.2,
        "baseline should stay in the low basin: {:?}",
        summary.avg_without
    );
    assert!(
        summary.avg_with.coherence() > 0.8,
        "nudged run should reach the high basin: {:?}",
        summary.avg_with
    );
    assert!(
        summary.avg_with.dwelling() < summary.avg_without.dwelling(),
        "dwelling should fall as coherence rises"
    );
}

#[test]
fn pulse_is_continuous_at_split() {
    let t = full_grid();
    let sim = simulate_mode(&t, Some(Y0.as_slice()), 25.0, "pulse", &ModelParams::default()).unwrap();

    assert!(sim.y_nudge.is_none());
    for i in 0..=sim.idx {
        assert!(sim.with[i].bit_eq(&sim.without[i]), "pulse moved sample {i}");
    }
    assert_eq!(sim.without.divergence_index(&sim.with, 1e-12), Some(sim.idx + 1));

    let summary = Summary::from_simulation(&sim, DEFAULT_TRAILING_WINDOW).unwrap();
    assert!(summary.avg_with.coherence() > 0.8, "{summary:?}");
    assert!(summary.avg_without.coherence() < 0.2, "{summary:?}");
}

#[test]
fn weak_jump_falls_back() {
    // A displacement that stays below the separatrix decays back to the low basin
    let t = full_grid();
    let nudge = Nudge::Jump {
        displacement: [0.1, 0.1, 0.1, 0.0],
    };
    let sim = simulate(&t, Some(Y0.as_slice()), 25.0, nudge, &ModelParams::default()).unwrap();
    let summary = Summary::from_simulation(&sim, DEFAULT_TRAILING_WINDOW).unwrap();
    assert!(summary.coherence_gain.abs() < 1e-3, "{summary:?}");
}

#[test]
fn dwelling_tracks_coherence_inversely() {
    let t = full_grid();
    let sim = simulate_mode(&t, Some(Y0.as_slice()), 25.0, "jump", &ModelParams::default()).unwrap();
    let coherence = sim.with.coherence();
    let dwelling = sim.with.component(3);
    let last = t.len() - 1;
    assert!(coherence[last] > coherence[sim.idx - 1]);
    assert!(dwelling[last] < dwelling[sim.idx - 1]);
}

#[test]
fn deterministic() {
    let t = full_grid();
    let p = ModelParams::default();
    let a = simulate_mode(&t, Some(Y0.as_slice()), 25.0, "pulse", &p).unwrap();
    let b = simulate_mode(&t, Some(Y0.as_slice()), 25.0, "pulse", &p).unwrap();
    assert_eq!(a.idx, b.idx);
    for i in 0..t.len() {
        assert!(a.without[i].bit_eq(&b.without[i]));
        assert!(a.with[i].bit_eq(&b.with[i]));
    }
}

#[test]
fn overrides_change_dynamics() {
    // Halving the gain removes the high basin entirely
    let t = full_grid();
    let p = ModelParams {
        gamma: 5.0,
        ..Default::default()
    };
    let sim = simulate_mode(&t, Some(Y0.as_slice()), 25.0, "jump", &p).unwrap();
    let summary = Summary::from_simulation(&sim, DEFAULT_TRAILING_WINDOW).unwrap();
    assert!(summary.avg_with.coherence() < 0.5, "{summary:?}");
}

#[test]
fn invalid_arguments() {
    let t = full_grid();
    let p = ModelParams::default();
    let cases: Vec<Result<_, SimError>> = vec![
        simulate_mode(&t, Some(Y0.as_slice()), 25.0, "teleport", &p),
        simulate_mode(&t, Some(Y0.as_slice()), 50.5, "jump", &p),
        simulate_mode(&t, Some(Y0.as_slice()), -1.0, "jump", &p),
        simulate_mode(&t, Some(&[0.2, 0.1][..]), 25.0, "jump", &p),
        simulate_mode(&[0.0], Some(Y0.as_slice()), 0.0, "jump", &p),
        simulate_mode(&[0.0, 2.0, 1.0], Some(Y0.as_slice()), 0.5, "jump", &p),
    ];
    for (i, r) in cases.into_iter().enumerate() {
        assert!(
            matches!(r, Err(SimError::InvalidArgument(_))),
            "case {i} should be rejected"
        );
    }
}

#[test]
fn simulation_serializes() {
    let t = linspace(0.0, 5.0, 11).unwrap();
    let sim = simulate(&t, None, 2.5, Nudge::for_mode(NudgeMode::Jump), &ModelParams::default())
        .unwrap();
    let json = serde_json::to_value(&sim).unwrap();
    assert_eq!(json["without"].as_array().unwrap().len(), 11);
    assert_eq!(json["with"][0].as_array().unwrap().len(), 4);
    assert_eq!(json["nudge"]["mode"], "jump");
    assert!(json["y_nudge"].is_array());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prefix_shared_and_shapes_hold(
        f1 in 0.0f64..1.0,
        f2 in 0.0f64..1.0,
        f3 in 0.0f64..1.0,
        d in 0.0f64..1.0,
        frac in 0.0f64..=1.0,
        pulse in any::<bool>(),
    ) {
        let t = linspace(0.0, 10.0, 41).unwrap();
        let y0 = [f1, f2, f3, d];
        let time = frac * 10.0;
        let mode = if pulse { "pulse" } else { "jump" };
        let sim = simulate_mode(&t, Some(y0.as_slice()), time, mode, &ModelParams::default()).unwrap();

        prop_assert_eq!(sim.without.len(), t.len());
        prop_assert_eq!(sim.with.len(), t.len());
        prop_assert!(sim.without[0].bit_eq(&State(y0)));
        prop_assert!(sim.y0_used.bit_eq(&State(y0)));
        prop_assert_eq!(sim.idx, argmin_distance(&t, time));
        for i in 0..sim.idx {
            prop_assert!(sim.with[i].bit_eq(&sim.without[i]));
        }
        if pulse {
            prop_assert!(sim.with[sim.idx].bit_eq(&sim.without[sim.idx]));
            prop_assert!(sim.y_nudge.is_none());
        } else {
            prop_assert!(sim.with[sim.idx].bit_eq(&sim.y_nudge.unwrap()));
        }
        if sim.idx > 0 {
            prop_assert!(sim.with[0].bit_eq(&State(y0)));
        }
    }
}
