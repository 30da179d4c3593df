//! 2D Plotting Geometry
//!
//! Vector and analytic-geometry primitives for the plotting engine.
//!
//! All positions are Cartesian, in nautical miles, with own ship at the
//! origin. Bearings use the nautical convention: 0 degrees = north,
//! increasing clockwise, so `x = d * sin(bearing)` points east and
//! `y = d * cos(bearing)` points north.

use nalgebra::Vector2;

/// A point or displacement on the plotting plane, in nautical miles.
pub type Point = Vector2<f64>;

/// Tolerance for parallel-line and degenerate-geometry tests
pub const EPSILON: f64 = 1e-12;

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let a = deg % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Signed angular difference in degrees, normalized to (-180, 180]
#[inline]
pub fn signed_delta_deg(deg: f64) -> f64 {
    let a = normalize_deg(deg);
    if a > 180.0 {
        a - 360.0
    } else {
        a
    }
}

/// Reciprocal bearing (opposite direction)
#[inline]
pub fn reciprocal_deg(deg: f64) -> f64 {
    normalize_deg(deg + 180.0)
}

/// Convert a bearing/distance pair to a Cartesian point
#[inline]
pub fn polar_to_cartesian(bearing_deg: f64, distance: f64) -> Point {
    let rad = bearing_deg.to_radians();
    Point::new(distance * rad.sin(), distance * rad.cos())
}

/// Convert a Cartesian point to a (bearing, distance) pair
///
/// The bearing is normalized to [0, 360); the origin maps to (0, 0).
#[inline]
pub fn cartesian_to_polar(p: &Point) -> (f64, f64) {
    let distance = p.norm();
    if distance < EPSILON {
        return (0.0, 0.0);
    }
    (normalize_deg(p.x.atan2(p.y).to_degrees()), distance)
}

/// Unit vector pointing along a bearing
#[inline]
pub fn direction(bearing_deg: f64) -> Point {
    polar_to_cartesian(bearing_deg, 1.0)
}

/// 2D cross product (perp product) of two vectors
#[inline]
pub fn cross(a: &Point, b: &Point) -> f64 {
    a.perp(b)
}

/// Rotate a point clockwise by an angle in degrees
///
/// Clockwise rotation matches the bearing convention: rotating north by
/// 90 degrees yields east.
pub fn rotate_deg(p: &Point, deg: f64) -> Point {
    let rad = deg.to_radians();
    let (sin, cos) = rad.sin_cos();
    Point::new(p.x * cos + p.y * sin, -p.x * sin + p.y * cos)
}

/// Intersection of the infinite lines through (`p1`, `p2`) and (`p3`, `p4`)
///
/// Returns `None` when the lines are parallel or coincident, i.e. when the
/// direction determinant is below [`EPSILON`]. Vertical lines need no
/// special case in this parametric form.
pub fn line_line_intersection(p1: &Point, p2: &Point, p3: &Point, p4: &Point) -> Option<Point> {
    let d1 = p2 - p1;
    let d2 = p4 - p3;
    let denom = cross(&d1, &d2);
    if denom.abs() < EPSILON {
        return None;
    }
    let t = cross(&(p3 - p1), &d2) / denom;
    Some(p1 + d1 * t)
}

/// Intersections of the infinite line through (`p0`, `p1`) with a circle
/// of the given radius centered at the origin
///
/// Returns zero, one (tangent) or two points from the quadratic solution
/// of the parametric line equation.
pub fn line_circle_intersection(p0: &Point, p1: &Point, radius: f64) -> Vec<Point> {
    let d = p1 - p0;
    let a = d.dot(&d);
    if a < EPSILON {
        // Degenerate line: both points coincide
        return Vec::new();
    }
    let b = 2.0 * p0.dot(&d);
    let c = p0.dot(p0) - radius * radius;
    let disc = b * b - 4.0 * a * c;
    if disc < -EPSILON {
        return Vec::new();
    }
    if disc.abs() < EPSILON {
        let t = -b / (2.0 * a);
        return vec![p0 + d * t];
    }
    let sqrt = disc.sqrt();
    let t1 = (-b - sqrt) / (2.0 * a);
    let t2 = (-b + sqrt) / (2.0 * a);
    vec![p0 + d * t1, p0 + d * t2]
}

/// Shortest distance from a point to the segment (`a`, `b`)
pub fn point_to_segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let d = b - a;
    let len_sq = d.dot(&d);
    if len_sq < EPSILON {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    (p - (a + d * t)).norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_deg() {
        assert_eq!(normalize_deg(0.0), 0.0);
        assert_eq!(normalize_deg(360.0), 0.0);
        assert_eq!(normalize_deg(-90.0), 270.0);
        assert_eq!(normalize_deg(725.0), 5.0);
    }

    #[test]
    fn test_signed_delta_deg() {
        assert_eq!(signed_delta_deg(10.0), 10.0);
        assert_eq!(signed_delta_deg(350.0), -10.0);
        assert_eq!(signed_delta_deg(180.0), 180.0);
        assert_eq!(signed_delta_deg(-190.0), 170.0);
    }

    #[test]
    fn test_polar_cardinals() {
        let north = polar_to_cartesian(0.0, 1.0);
        assert!((north.x - 0.0).abs() < 1e-12);
        assert!((north.y - 1.0).abs() < 1e-12);

        let east = polar_to_cartesian(90.0, 2.0);
        assert!((east.x - 2.0).abs() < 1e-12);
        assert!(east.y.abs() < 1e-12);

        let south = polar_to_cartesian(180.0, 3.0);
        assert!(south.x.abs() < 1e-12);
        assert!((south.y + 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_polar_roundtrip() {
        for bearing in [0.0, 45.0, 123.4, 270.0, 359.9] {
            let p = polar_to_cartesian(bearing, 7.5);
            let (b, d) = cartesian_to_polar(&p);
            assert!((b - bearing).abs() < 1e-9, "bearing {bearing} -> {b}");
            assert!((d - 7.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cartesian_to_polar_origin() {
        assert_eq!(cartesian_to_polar(&Point::new(0.0, 0.0)), (0.0, 0.0));
    }

    #[test]
    fn test_rotate_deg() {
        let north = Point::new(0.0, 1.0);
        let east = rotate_deg(&north, 90.0);
        assert!((east.x - 1.0).abs() < 1e-12);
        assert!(east.y.abs() < 1e-12);
    }

    #[test]
    fn test_line_line_intersection() {
        // Diagonals of the unit square cross at the center
        let p = line_line_intersection(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 1.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 0.0),
        )
        .unwrap();
        assert!((p.x - 0.5).abs() < 1e-12);
        assert!((p.y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_line_line_vertical() {
        // A vertical line has no finite slope; the parametric form still works
        let p = line_line_intersection(
            &Point::new(2.0, -5.0),
            &Point::new(2.0, 5.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 1.0),
        )
        .unwrap();
        assert!((p.x - 2.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_line_parallel() {
        let p = line_line_intersection(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 1.0),
            &Point::new(0.0, 1.0),
            &Point::new(1.0, 2.0),
        );
        assert!(p.is_none());
    }

    #[test]
    fn test_line_circle_two_points() {
        // Horizontal line y=0 through a unit circle
        let pts = line_circle_intersection(&Point::new(-2.0, 0.0), &Point::new(2.0, 0.0), 1.0);
        assert_eq!(pts.len(), 2);
        assert!((pts[0].x + 1.0).abs() < 1e-9);
        assert!((pts[1].x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_circle_tangent() {
        let pts = line_circle_intersection(&Point::new(-2.0, 1.0), &Point::new(2.0, 1.0), 1.0);
        assert_eq!(pts.len(), 1);
        assert!(pts[0].x.abs() < 1e-6);
        assert!((pts[0].y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_line_circle_miss() {
        let pts = line_circle_intersection(&Point::new(-2.0, 3.0), &Point::new(2.0, 3.0), 1.0);
        assert!(pts.is_empty());
    }

    #[test]
    fn test_point_to_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((point_to_segment_distance(&Point::new(5.0, 3.0), &a, &b) - 3.0).abs() < 1e-12);
        // Beyond the endpoint the distance is measured to the endpoint
        assert!((point_to_segment_distance(&Point::new(13.0, 4.0), &a, &b) - 5.0).abs() < 1e-12);
    }
}
