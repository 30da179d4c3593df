//! Motion Decomposition
//!
//! Converts a pair of timed observations into relative motion, and
//! relative plus own motion into true motion, reproducing the velocity
//! triangle of manual radar plotting.

use crate::geometry::{cartesian_to_polar, normalize_deg, Point, EPSILON};
use crate::types::{OwnShip, RelativeMotion, TrueMotion};

/// Relative speeds below this are treated as "no relative motion"
pub const MIN_RELATIVE_SPEED: f64 = 1e-9;

/// Relative motion between two observed positions
///
/// Returns `None` when the observation interval is not positive; a zero
/// displacement yields a zero-speed result rather than a failure.
///
/// # Arguments
///
/// * `pos1`, `pos2` - Cartesian observation positions in NM
/// * `interval_minutes` - time between the observations
pub fn relative_motion(pos1: &Point, pos2: &Point, interval_minutes: f64) -> Option<RelativeMotion> {
    if interval_minutes <= EPSILON {
        return None;
    }
    let (course, run) = cartesian_to_polar(&(pos2 - pos1));
    Some(RelativeMotion {
        course,
        speed: run / interval_minutes * 60.0,
    })
}

/// True motion from relative motion and own motion
///
/// The true-motion vector is the vector sum of the relative-motion and
/// own-motion vectors. The aspect angle is the target's true course seen
/// against the reciprocal of own course. Purely algebraic: there is no
/// failure mode once relative motion is defined.
pub fn true_motion(relative: &RelativeMotion, own: &OwnShip) -> TrueMotion {
    let (course, speed) = cartesian_to_polar(&(relative.velocity() + own.velocity()));
    TrueMotion {
        course,
        speed,
        aspect: normalize_deg(course - (own.course + 180.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polar_to_cartesian;

    #[test]
    fn test_direct_approach() {
        // Constant true bearing 045, range closing 10 -> 8 NM in 6 min:
        // 2 NM over 6 min = 20 kn along the reciprocal of the bearing.
        let p1 = polar_to_cartesian(45.0, 10.0);
        let p2 = polar_to_cartesian(45.0, 8.0);
        let rel = relative_motion(&p1, &p2, 6.0).unwrap();
        assert!((rel.course - 225.0).abs() < 1e-9);
        assert!((rel.speed - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_interval_fails() {
        let p1 = polar_to_cartesian(45.0, 10.0);
        let p2 = polar_to_cartesian(45.0, 8.0);
        assert!(relative_motion(&p1, &p2, 0.0).is_none());
        assert!(relative_motion(&p1, &p2, -3.0).is_none());
    }

    #[test]
    fn test_zero_displacement() {
        let p = polar_to_cartesian(10.0, 5.0);
        let rel = relative_motion(&p, &p, 6.0).unwrap();
        assert_eq!(rel.speed, 0.0);
    }

    #[test]
    fn test_true_motion_head_on() {
        // Own ship north at 10 kn, relative motion due south at 20 kn:
        // the target really steams south at 10 kn, dead ahead, bow-on.
        let own = OwnShip {
            course: 0.0,
            speed: 10.0,
        };
        let rel = RelativeMotion {
            course: 180.0,
            speed: 20.0,
        };
        let tm = true_motion(&rel, &own);
        assert!((tm.course - 180.0).abs() < 1e-9);
        assert!((tm.speed - 10.0).abs() < 1e-9);
        assert!(tm.aspect.abs() < 1e-9);
    }

    #[test]
    fn test_inverse_law() {
        // trueMotion composed with subtracting own motion reproduces the
        // original relative motion.
        let own = OwnShip {
            course: 73.0,
            speed: 14.5,
        };
        let rel = RelativeMotion {
            course: 211.0,
            speed: 9.25,
        };
        let tm = true_motion(&rel, &own);
        let back = tm.velocity() - own.velocity();
        let (course, speed) = cartesian_to_polar(&back);
        assert!((course - rel.course).abs() < 1e-9);
        assert!((speed - rel.speed).abs() < 1e-9);
    }

    #[test]
    fn test_roundtrip_polar() {
        // relativeMotion then polar->cartesian->polar round-trips KBr/vBr
        let p1 = Point::new(1.25, 7.5);
        let p2 = Point::new(-0.5, 3.75);
        let rel = relative_motion(&p1, &p2, 12.0).unwrap();
        let (course, speed) = cartesian_to_polar(&rel.velocity());
        assert!((course - rel.course).abs() < 1e-9);
        assert!((speed - rel.speed).abs() < 1e-9);
    }
}
