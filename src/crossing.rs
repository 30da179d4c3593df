//! Bow Crossing
//!
//! Intersects the target's relative-motion line with own ship's heading
//! line to determine if and when the target crosses the bow.

use crate::geometry::{direction, line_line_intersection, Point, EPSILON};
use crate::motion::MIN_RELATIVE_SPEED;
use crate::types::{BowCrossing, RelativeMotion};

/// Bow crossing ahead of own ship
///
/// Returns `None` when the lines are parallel, when the intersection lies
/// astern of own ship, or when the target has already passed it.
///
/// # Arguments
///
/// * `pos` - current target position in NM
/// * `relative` - relative motion of the target
/// * `own_course` - own course in degrees (the heading line)
/// * `clock` - current time in minutes of day
pub fn bow_crossing(
    pos: &Point,
    relative: &RelativeMotion,
    own_course: f64,
    clock: f64,
) -> Option<BowCrossing> {
    if relative.speed < MIN_RELATIVE_SPEED {
        return None;
    }
    let heading = direction(own_course);
    let track = direction(relative.course);
    let origin = Point::new(0.0, 0.0);
    let point = line_line_intersection(&origin, &heading, pos, &(pos + track))?;
    // Astern of own ship
    if point.dot(&heading) < EPSILON {
        return None;
    }
    // Already passed by the target
    if (point - pos).dot(&track) < EPSILON {
        return None;
    }
    let time_to = (point - pos).norm() / relative.speed * 60.0;
    Some(BowCrossing {
        range: point.norm(),
        time_to,
        clock: clock + time_to,
        point,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crossing_ahead() {
        // Target to starboard, tracking due west across the bow
        let pos = Point::new(5.0, 3.0);
        let rel = RelativeMotion {
            course: 270.0,
            speed: 10.0,
        };
        let data = bow_crossing(&pos, &rel, 0.0, 600.0).unwrap();
        assert!((data.range - 3.0).abs() < 1e-9);
        assert!((data.time_to - 30.0).abs() < 1e-9);
        assert!((data.clock - 630.0).abs() < 1e-9);
        assert!(data.point.x.abs() < 1e-9);
        assert!((data.point.y - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_crossing_astern_is_none() {
        // Intersection lies behind own ship
        let pos = Point::new(5.0, -3.0);
        let rel = RelativeMotion {
            course: 270.0,
            speed: 10.0,
        };
        assert!(bow_crossing(&pos, &rel, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_already_crossed_is_none() {
        // Target is already on the port side, tracking further west
        let pos = Point::new(-2.0, 4.0);
        let rel = RelativeMotion {
            course: 270.0,
            speed: 10.0,
        };
        assert!(bow_crossing(&pos, &rel, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_parallel_track_is_none() {
        let pos = Point::new(5.0, 3.0);
        let rel = RelativeMotion {
            course: 0.0,
            speed: 10.0,
        };
        assert!(bow_crossing(&pos, &rel, 0.0, 0.0).is_none());
    }
}
