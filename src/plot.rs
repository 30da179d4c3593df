//! Plot Pipeline
//!
//! Ties the solvers together: derives the full per-target record from an
//! observation pair, evaluates all targets plus an optional maneuver
//! request in one pass, and propagates a solved maneuver to the other
//! tracked targets.
//!
//! Everything here is a pure mapping from inputs to freshly built
//! records; recomputing with unchanged inputs yields identical output.

use crate::cpa::{cpa, cpa_on_track};
use crate::crossing::bow_crossing;
use crate::error::PlotError;
use crate::geometry::{cartesian_to_polar, direction, polar_to_cartesian};
use crate::maneuver;
use crate::motion::{relative_motion, true_motion, MIN_RELATIVE_SPEED};
use crate::trace::{NopTrace, TraceSink};
use crate::types::{
    CpaData, Evaluation, ManeuverOutcome, ManeuverRequest, ManeuverSolution, Observation, OwnShip,
    RelativeMotion, TargetPlot, TargetRecord, TargetTrack,
};

/// Derive all per-target values from an observation pair
///
/// Fails when either observation lacks a distance or the second does not
/// come after the first. The CPA and bow-crossing blocks are optional in
/// the result; their absence is not an error.
pub fn plot_target(
    first: &Observation,
    second: &Observation,
    own: &OwnShip,
) -> Result<TargetPlot, PlotError> {
    if !first.is_complete() {
        return Err(PlotError::InputIncomplete(
            "first observation has no distance".into(),
        ));
    }
    if !second.is_complete() {
        return Err(PlotError::InputIncomplete(
            "second observation has no distance".into(),
        ));
    }
    let interval = second.time - first.time;
    let sight = [first.position(), second.position()];
    let relative = relative_motion(&sight[0], &sight[1], interval).ok_or_else(|| {
        PlotError::InputIncomplete("second observation must be later than the first".into())
    })?;
    let true_motion = true_motion(&relative, own);
    Ok(TargetPlot {
        cpa: cpa(&sight[1], &relative, own.course, second.time),
        crossing: bow_crossing(&sight[1], &relative, own.course, second.time),
        sight,
        time: second.time,
        interval,
        relative_bearings: [first.relative_bearing(), second.relative_bearing()],
        relative,
        true_motion,
    })
}

/// CPA of one target under a maneuver solved against another
///
/// The target keeps its true motion; own ship changes course/speed at the
/// solved maneuver time. Returns `None` when the target has no valid
/// relative motion or CPA to begin with.
pub fn cpa_under_maneuver(plot: &TargetPlot, solution: &ManeuverSolution) -> Option<CpaData> {
    plot.cpa.as_ref()?;
    if plot.relative.speed < MIN_RELATIVE_SPEED {
        return None;
    }
    // Advance the target along its present relative track to the moment
    // the maneuver takes effect
    let run = (solution.maneuver_clock - plot.time) / 60.0 * plot.relative.speed;
    let position = plot.sight[1] + direction(plot.relative.course) * run;
    let new_own_velocity = polar_to_cartesian(solution.new_course, solution.new_speed);
    let (course, speed) = cartesian_to_polar(&(plot.true_motion.velocity() - new_own_velocity));
    cpa_on_track(
        &position,
        &RelativeMotion { course, speed },
        solution.new_course,
        solution.maneuver_clock,
    )
}

/// Recompute every other target's CPA under a solved maneuver
///
/// The primary target keeps the CPA already carried by the solution;
/// targets without valid data get their new-CPA block cleared.
pub fn propagate_maneuver(
    plots: &[Option<TargetPlot>],
    primary: usize,
    solution: &ManeuverSolution,
) -> Vec<Option<CpaData>> {
    plots
        .iter()
        .enumerate()
        .map(|(index, plot)| {
            if index == primary {
                Some(solution.cpa)
            } else {
                plot.as_ref()
                    .and_then(|plot| cpa_under_maneuver(plot, solution))
            }
        })
        .collect()
}

/// Evaluate own ship, all target tracks and an optional maneuver request
pub fn evaluate(
    own: &OwnShip,
    tracks: &[TargetTrack],
    request: Option<&ManeuverRequest>,
) -> Evaluation {
    evaluate_traced(own, tracks, request, &mut NopTrace)
}

/// [`evaluate`] with solver decisions reported to `trace`
pub fn evaluate_traced(
    own: &OwnShip,
    tracks: &[TargetTrack],
    request: Option<&ManeuverRequest>,
    trace: &mut dyn TraceSink,
) -> Evaluation {
    let plots: Vec<Option<TargetPlot>> = tracks
        .iter()
        .map(|track| plot_target(&track.observations[0], &track.observations[1], own).ok())
        .collect();

    // A request against an incomplete target is discarded, not failed
    let maneuver = match request {
        None => ManeuverOutcome::Unset,
        Some(request) => match plots.get(request.target).and_then(|p| p.as_ref()) {
            None => ManeuverOutcome::Unset,
            Some(plot) => match maneuver::solve(plot, own, request, trace) {
                Ok(solution) => ManeuverOutcome::Solved {
                    solution: Box::new(solution),
                },
                Err(error) => ManeuverOutcome::Failed { error },
            },
        },
    };

    let mut new_cpas = vec![None; plots.len()];
    if let (Some(request), ManeuverOutcome::Solved { solution }) = (request, &maneuver) {
        new_cpas = propagate_maneuver(&plots, request.target, solution);
    }

    Evaluation {
        targets: plots
            .into_iter()
            .zip(new_cpas)
            .map(|(plot, new_cpa)| TargetRecord { plot, new_cpa })
            .collect(),
        maneuver,
    }
}
