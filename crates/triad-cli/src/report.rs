//! Rendering of a finished simulation for the terminal or as JSON.

use serde::Serialize;
use triad_core::{Nudge, Simulation, State, Summary, Trajectory, exploration_reference};

/// Everything a plotting front end needs from one run.
#[derive(Serialize)]
pub struct Report<'a> {
    pub t: &'a [f64],
    pub idx: usize,
    pub intervention_time: f64,
    pub nudge: Nudge,
    pub y0_used: State,
    pub y_nudge: Option<State>,
    pub without: &'a Trajectory,
    pub with: &'a Trajectory,
    pub coherence_without: Vec<f64>,
    pub coherence_with: Vec<f64>,
    /// Reference exploration rate at each sample's coherence (with nudge).
    pub exploration_reference: Vec<f64>,
    pub summary: Option<Summary>,
}

impl<'a> Report<'a> {
    pub fn new(t: &'a [f64], intervention_time: f64, sim: &'a Simulation, window: usize) -> Self {
        let coherence_with = sim.with.coherence();
        let exploration_reference = coherence_with
            .iter()
            .map(|&c| exploration_reference(c))
            .collect();
        Self {
            t,
            idx: sim.idx,
            intervention_time,
            nudge: sim.nudge,
            y0_used: sim.y0_used,
            y_nudge: sim.y_nudge,
            without: &sim.without,
            with: &sim.with,
            coherence_without: sim.without.coherence(),
            coherence_with,
            exploration_reference,
            summary: Summary::from_simulation(sim, window),
        }
    }
}

fn format_avg(avg: &State) -> String {
    format!(
        "facet1 ≈ {:.3}, facet2 ≈ {:.3}, facet3 ≈ {:.3}, dwelling ≈ {:.3}",
        avg[0], avg[1], avg[2], avg[3]
    )
}

/// Human-readable summary of a run.
pub fn render_text(report: &Report<'_>) -> String {
    let mut out = String::new();
    if let Some(summary) = &report.summary {
        out.push_str("Without catalytic nudge (sustained contemplative holding):\n");
        out.push_str(&format_avg(&summary.avg_without));
        out.push_str("\n\nWith gentle nudge (insight emerges):\n");
        out.push_str(&format_avg(&summary.avg_with));
        out.push('\n');
    }
    out.push_str(&format!(
        "\nnudge:      {} at t={:.3} (idx {}, grid t={:.3})\n",
        report.nudge.mode(),
        report.intervention_time,
        report.idx,
        report.t[report.idx]
    ));
    if let Some(y) = &report.y_nudge {
        out.push_str(&format!("post-jump:  {}\n", format_avg(y)));
    }
    if let Some(summary) = &report.summary {
        out.push_str(&format!(
            "coherence:  {:.3} → {:.3} (gain {:+.3}, last {} samples)\n",
            summary.avg_without.coherence(),
            summary.avg_with.coherence(),
            summary.coherence_gain,
            summary.window
        ));
    }
    out
}
