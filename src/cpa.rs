//! Closest Point of Approach
//!
//! Projects the current target position onto the relative-motion line to
//! find the closest approach distance, time and bearings.

use crate::geometry::{cartesian_to_polar, direction, normalize_deg, Point};
use crate::motion::MIN_RELATIVE_SPEED;
use crate::types::{CpaData, RelativeMotion};

/// CPA ahead on the relative track
///
/// Returns `None` when the relative speed vanishes or when the closest
/// point already lies astern of `pos` (CPA in the past).
///
/// # Arguments
///
/// * `pos` - current target position in NM (usually the second sight)
/// * `relative` - relative motion of the target
/// * `own_course` - own course in degrees, for the relative bearing
/// * `clock` - current time in minutes of day
pub fn cpa(pos: &Point, relative: &RelativeMotion, own_course: f64, clock: f64) -> Option<CpaData> {
    let data = cpa_on_track(pos, relative, own_course, clock)?;
    if data.time_to < 0.0 {
        return None;
    }
    Some(data)
}

/// CPA on the infinite relative track, signed
///
/// Unlike [`cpa`] this keeps closest points astern of `pos` (negative
/// `time_to`). Maneuver results use it so a degraded solution still has
/// fully populated display values.
pub(crate) fn cpa_on_track(
    pos: &Point,
    relative: &RelativeMotion,
    own_course: f64,
    clock: f64,
) -> Option<CpaData> {
    if relative.speed < MIN_RELATIVE_SPEED {
        return None;
    }
    let u = direction(relative.course);
    // Signed run from pos to the foot of the perpendicular from own ship
    let run = -pos.dot(&u);
    let point = pos + u * run;
    let (bearing, distance) = cartesian_to_polar(&point);
    let time_to = run / relative.speed * 60.0;
    Some(CpaData {
        distance,
        time_to,
        clock: clock + time_to,
        bearing,
        relative_bearing: normalize_deg(bearing - own_course),
        point,
    })
}
