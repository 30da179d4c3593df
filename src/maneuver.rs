//! Maneuver Solver
//!
//! Reproduces the radar-plotting-paper maneuver construction: pick a
//! maneuver point on the target's current relative track, build the
//! tangent to the desired-CPA circle, and solve the velocity triangle for
//! the new own course (circle intersection) or speed (line intersection)
//! with the smallest deviation from the present values.
//!
//! Course-change and speed-change requests share the candidate selection
//! and fallback logic; only the intersection geometry differs, behind the
//! [`ManeuverGeometry`] seam.

use crate::cpa::cpa_on_track;
use crate::crossing::bow_crossing;
use crate::error::PlotError;
use crate::geometry::{
    cartesian_to_polar, direction, line_circle_intersection, line_line_intersection,
    normalize_deg, polar_to_cartesian, reciprocal_deg, signed_delta_deg, Point, EPSILON,
};
use crate::motion::MIN_RELATIVE_SPEED;
use crate::trace::{NopTrace, TraceEvent, TraceSink};
use crate::types::{
    Axis, ManeuverGoal, ManeuverRequest, ManeuverSolution, OwnShip, PointSpec, RelativeMotion,
    SolutionQuality, TargetPlot,
};

/// Tolerance when comparing an explicit request against current values
const CHANGE_EPSILON: f64 = 1e-9;

/// Shared construction data for one maneuver solve
struct Construction {
    /// First and second sight
    p1: Point,
    p2: Point,
    /// Maneuver point on the relative track
    pm: Point,
    /// Velocity-triangle apex: first sight shifted by the reversed own run
    apex: Point,
    /// Observation interval in minutes
    interval: f64,
    own: OwnShip,
}

/// One candidate value for the varied axis
struct Candidate {
    /// New course in degrees or new speed in knots
    value: f64,
    /// Deviation from the current value, smaller preferred
    deviation: f64,
    /// Whether the candidate honors the domain constraints
    valid: bool,
}

/// Intersection strategy for one maneuver axis
trait ManeuverGeometry {
    /// Candidates reaching the tangent direction given by `offset`
    /// (the vector from the maneuver point to the tangent point)
    fn candidates(&self, c: &Construction, offset: &Point, prefer_port: bool) -> Vec<Candidate>;

    /// Constructed fallback when no candidate exists at all
    fn fallback(&self, c: &Construction) -> f64;

    /// New (course, speed) pair for a chosen value
    fn apply(&self, own: &OwnShip, value: f64) -> (f64, f64);

    /// Signed change of the varied axis
    fn delta(&self, own: &OwnShip, value: f64) -> f64;
}

/// Course change at constant speed: the new own-run endpoint must lie on
/// the circle of radius `own travel` around the triangle apex.
struct CourseGeometry;

impl ManeuverGeometry for CourseGeometry {
    fn candidates(&self, c: &Construction, offset: &Point, prefer_port: bool) -> Vec<Candidate> {
        // Apex-relative endpoints of the new relative-run locus
        let v0 = c.p2 - c.apex;
        let v1 = (c.p2 - offset) - c.apex;
        let run = c.own.travel(c.interval);
        line_circle_intersection(&v0, &v1, run)
            .into_iter()
            .map(|w| {
                let (course, _) = cartesian_to_polar(&w);
                // Turn magnitude in the preferred direction
                let deviation = if prefer_port {
                    normalize_deg(c.own.course - course)
                } else {
                    normalize_deg(course - c.own.course)
                };
                Candidate {
                    value: course,
                    deviation,
                    valid: deviation <= 180.0,
                }
            })
            .collect()
    }

    fn fallback(&self, c: &Construction) -> f64 {
        // Steer directly at the maneuver point
        cartesian_to_polar(&c.pm).0
    }

    fn apply(&self, own: &OwnShip, value: f64) -> (f64, f64) {
        (normalize_deg(value), own.speed)
    }

    fn delta(&self, own: &OwnShip, value: f64) -> f64 {
        signed_delta_deg(value - own.course)
    }
}

/// Speed change at constant course: the new own-run endpoint must lie on
/// the apex-to-first-sight segment (the locus of all speeds on the
/// present course).
struct SpeedGeometry;

impl ManeuverGeometry for SpeedGeometry {
    fn candidates(&self, c: &Construction, offset: &Point, _prefer_port: bool) -> Vec<Candidate> {
        let along = c.p1 - c.apex;
        let len_sq = along.dot(&along);
        if len_sq < EPSILON {
            // Own ship is stopped: no speed locus to intersect
            return Vec::new();
        }
        let hit = line_line_intersection(&c.apex, &c.p1, &c.p2, &(c.p2 - offset));
        let Some(x) = hit else {
            return Vec::new();
        };
        // Fraction of the present run; 1.0 keeps the present speed
        let t = (x - c.apex).dot(&along) / len_sq;
        let value = t * c.own.speed;
        vec![Candidate {
            value,
            // Positive means slowing down; prefer the higher speed
            deviation: c.own.speed - value,
            valid: (0.0..=1.0).contains(&t),
        }]
    }

    fn fallback(&self, _c: &Construction) -> f64 {
        // Stop the ship
        0.0
    }

    fn apply(&self, own: &OwnShip, value: f64) -> (f64, f64) {
        (own.course, value)
    }

    fn delta(&self, own: &OwnShip, value: f64) -> f64 {
        value - own.speed
    }
}

/// Solve a maneuver request without tracing
pub fn solve_maneuver(
    plot: &TargetPlot,
    own: &OwnShip,
    request: &ManeuverRequest,
) -> Result<ManeuverSolution, PlotError> {
    solve(plot, own, request, &mut NopTrace)
}

/// Solve a maneuver request, reporting decisions to `trace`
pub fn solve(
    plot: &TargetPlot,
    own: &OwnShip,
    request: &ManeuverRequest,
    trace: &mut dyn TraceSink,
) -> Result<ManeuverSolution, PlotError> {
    let rel = plot.relative;
    let current_cpa = plot.cpa.as_ref().ok_or_else(|| {
        PlotError::DegenerateGeometry("no closest point of approach on the current track".into())
    })?;
    if rel.speed < MIN_RELATIVE_SPEED {
        return Err(PlotError::DegenerateGeometry(
            "relative speed is zero".into(),
        ));
    }

    let p1 = plot.sight[0];
    let p2 = plot.sight[1];
    let track = direction(rel.course);

    // Step A: fix the maneuver point on the relative track
    let (pm, time_to_maneuver) = match request.point {
        PointSpec::ByTime(clock) => {
            if clock <= 0.0 {
                return Err(PlotError::InputIncomplete(
                    "maneuver time not specified".into(),
                ));
            }
            if current_cpa.time_to < EPSILON {
                return Err(PlotError::DegenerateGeometry(
                    "target is already at closest approach".into(),
                ));
            }
            let minutes = clock - plot.time;
            let fraction = minutes / current_cpa.time_to;
            trace.record(TraceEvent::PointByTime { clock, fraction });
            // Extrapolation past the CPA point is deliberate
            (p2 + (current_cpa.point - p2) * fraction, minutes)
        }
        PointSpec::ByDistance(distance) => {
            if distance <= 0.0 {
                return Err(PlotError::InputIncomplete(
                    "maneuver distance not specified".into(),
                ));
            }
            let hits = line_circle_intersection(&p1, &p2, distance);
            if hits.is_empty() {
                return Err(PlotError::InfeasibleGoal(format!(
                    "the relative track never passes within {distance:.2} NM"
                )));
            }
            // Of the reachable crossings, take the earlier one
            let mut best: Option<(Point, f64)> = None;
            for hit in hits {
                let minutes = (hit - p2).dot(&track) / rel.speed * 60.0;
                if minutes >= 0.0 && best.map_or(true, |(_, b)| minutes < b) {
                    best = Some((hit, minutes));
                }
            }
            let (point, minutes) = best.ok_or_else(|| {
                PlotError::InfeasibleGoal("maneuver point lies in the past".into())
            })?;
            trace.record(TraceEvent::PointByDistance {
                distance,
                travel_minutes: minutes,
            });
            (point, minutes)
        }
    };
    let maneuver_clock = plot.time + time_to_maneuver;
    let apex = p1 + direction(reciprocal_deg(own.course)) * own.travel(plot.interval);

    let geometry: &dyn ManeuverGeometry = match request.axis {
        Axis::Course => &CourseGeometry,
        Axis::Speed => &SpeedGeometry,
    };
    let construction = Construction {
        p1,
        p2,
        pm,
        apex,
        interval: plot.interval,
        own: *own,
    };

    // Steps B/C: fix the value of the varied axis
    let (value, quality, tangent_point) = match request.goal {
        ManeuverGoal::Explicit(requested) => {
            trace.record(TraceEvent::BranchEntered {
                axis: request.axis,
                by_cpa: false,
            });
            let unchanged = match request.axis {
                Axis::Course => signed_delta_deg(requested - own.course).abs() < CHANGE_EPSILON,
                Axis::Speed => (requested - own.speed).abs() < CHANGE_EPSILON,
            };
            if unchanged {
                return Err(PlotError::NoChangeRequested);
            }
            let value = match request.axis {
                Axis::Course => normalize_deg(requested),
                Axis::Speed => requested,
            };
            (value, SolutionQuality::Valid, None)
        }
        ManeuverGoal::DesiredCpa(desired) => {
            trace.record(TraceEvent::BranchEntered {
                axis: request.axis,
                by_cpa: true,
            });
            if desired <= 0.0 {
                return Err(PlotError::InputIncomplete("desired CPA not specified".into()));
            }
            let range = pm.norm();
            if desired >= range {
                return Err(PlotError::InfeasibleGoal(format!(
                    "desired CPA of {desired:.2} NM is not below the {range:.2} NM maneuver range"
                )));
            }

            // Tangent construction on the desired-CPA circle
            let alpha = (desired / range).asin().to_degrees();
            let to_own = cartesian_to_polar(&-pm).0;
            let tangent_run = (range * range - desired * desired).sqrt();
            let point_bearing = normalize_deg(cartesian_to_polar(&pm).0 - own.course);
            let prefer_port = (90.0..180.0).contains(&point_bearing);

            let mut candidates: Vec<(Candidate, Point)> = Vec::new();
            for new_track in [normalize_deg(to_own + alpha), normalize_deg(to_own - alpha)] {
                let offset = direction(new_track) * tangent_run;
                let tangent = pm + offset;
                for candidate in geometry.candidates(&construction, &offset, prefer_port) {
                    trace.record(TraceEvent::Candidate {
                        axis: request.axis,
                        value: candidate.value,
                        deviation: candidate.deviation,
                        valid: candidate.valid,
                    });
                    candidates.push((candidate, tangent));
                }
            }

            let best_valid = candidates
                .iter()
                .filter(|(c, _)| c.valid)
                .min_by(|a, b| a.0.deviation.total_cmp(&b.0.deviation));
            match best_valid {
                Some((candidate, tangent)) => {
                    trace.record(TraceEvent::Selected {
                        axis: request.axis,
                        value: candidate.value,
                        quality: SolutionQuality::Valid,
                    });
                    (candidate.value, SolutionQuality::Valid, Some(*tangent))
                }
                None => {
                    // No candidate honors the constraints; keep the least
                    // deviating one as a degraded answer
                    let best_any = candidates
                        .iter()
                        .min_by(|a, b| a.0.deviation.total_cmp(&b.0.deviation));
                    match best_any {
                        Some((candidate, tangent)) => {
                            trace.record(TraceEvent::Selected {
                                axis: request.axis,
                                value: candidate.value,
                                quality: SolutionQuality::OutOfRange,
                            });
                            (candidate.value, SolutionQuality::OutOfRange, Some(*tangent))
                        }
                        None => {
                            let value = geometry.fallback(&construction);
                            trace.record(TraceEvent::Fallback {
                                axis: request.axis,
                                value,
                            });
                            (value, SolutionQuality::Fallback, None)
                        }
                    }
                }
            }
        }
    };

    // Step D: derived values after the maneuver
    let (new_course, new_speed) = geometry.apply(own, value);
    let new_own_velocity = polar_to_cartesian(new_course, new_speed);
    let (new_track, new_rate) =
        cartesian_to_polar(&(plot.true_motion.velocity() - new_own_velocity));
    let new_relative = RelativeMotion {
        course: new_track,
        speed: new_rate,
    };
    let new_cpa = cpa_on_track(&pm, &new_relative, new_course, maneuver_clock).ok_or_else(|| {
        PlotError::DegenerateGeometry("relative motion vanishes after the maneuver".into())
    })?;
    let crossing = bow_crossing(&pm, &new_relative, new_course, maneuver_clock);

    Ok(ManeuverSolution {
        axis: request.axis,
        new_course,
        new_speed,
        delta: geometry.delta(own, value),
        relative: new_relative,
        cpa: new_cpa,
        crossing,
        maneuver_point: pm,
        maneuver_clock,
        time_to_maneuver,
        tangent_point,
        own_apex: apex,
        point_relative_bearing: normalize_deg(cartesian_to_polar(&pm).0 - new_course),
        track_delta: signed_delta_deg(new_track - rel.course),
        quality,
    })
}
