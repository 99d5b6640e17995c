//! Window-less driver: steps frames and reports through `tracing`

use tracing::info;

use crate::simulation::scenario::Scenario;

/// Totals over a headless run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    pub emitted: usize,
    pub removed: usize,
    pub live: usize,
}

/// Run frames `0..frames` and log a line at the end of every orbit
pub fn run_headless(scenario: &mut Scenario, frames: usize) -> RunSummary {
    let orbit_period = scenario.stepper.orbit().orbit_period();
    let mut summary = RunSummary::default();

    for frame in 0..frames {
        let snapshot = scenario.stepper.step(frame);
        summary.frames += 1;
        summary.emitted += snapshot.emitted;
        summary.removed += snapshot.report.removed;
        summary.live = snapshot.particles.count;

        if (frame + 1) % orbit_period == 0 {
            info!(
                frame,
                hours = scenario.parameters.sim_time(frame),
                live = summary.live,
                removed_total = summary.removed,
                "orbit complete"
            );
        }
    }

    info!(
        frames = summary.frames,
        emitted = summary.emitted,
        removed = summary.removed,
        live = summary.live,
        "headless run finished"
    );
    summary
}
