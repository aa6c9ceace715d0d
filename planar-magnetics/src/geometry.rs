//! Planar geometry primitives for describing copper shapes on board layers.
//!
//! Linear dimensions are in meters and angles in radians throughout. Arcs
//! carry their rotation sense in the order of their angle pair, which the
//! corner-smoothing algorithms rely on.

use crate::error::Error;

pub mod arc;
pub mod layer;
pub mod point;
pub mod polygon;
pub mod via;

pub use arc::Arc;
pub use layer::Layer;
pub use point::Point;
pub use polygon::{Fill, PathElement, Polygon};
pub use via::Via;

/// Full rotation in radians.
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
/// Quarter rotation in radians.
pub const PI_OVER_TWO: f64 = std::f64::consts::FRAC_PI_2;
/// Three-quarter rotation in radians.
pub const THREE_PI_OVER_TWO: f64 = 3.0 * std::f64::consts::FRAC_PI_2;

/// Relative tolerance used for the geometric coincidence checks.
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Whether two values are equal up to a small relative tolerance.
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

/// Calculate the quadrant of an angle, after normalization into `[0, 2π)`.
pub fn quadrant(angle: f64) -> u8 {
    let mut angle = angle % TWO_PI;

    if angle < 0.0 {
        angle += TWO_PI;
    }

    if angle < PI_OVER_TWO {
        1
    } else if angle < std::f64::consts::PI {
        2
    } else if angle < THREE_PI_OVER_TWO {
        3
    } else {
        4
    }
}

/// Find the center of the circle through three points.
///
/// # Errors
/// Returns an error if the points are collinear.
pub fn find_center(a: Point, b: Point, c: Point) -> Result<Point, Error> {
    let temp = b.x * b.x + b.y * b.y;
    let ab = (a.x * a.x + a.y * a.y - temp) / 2.0;
    let bc = (temp - c.x * c.x - c.y * c.y) / 2.0;
    let det = (a.x - b.x) * (b.y - c.y) - (b.x - c.x) * (a.y - b.y);

    if det.abs() < 1e-10 {
        return Err(Error::CollinearPoints);
    }

    let x = (ab * (b.y - c.y) - bc * (a.y - b.y)) / det;
    let y = ((a.x - b.x) * bc - (b.x - c.x) * ab) / det;

    Ok(Point::new(x, y))
}

/// Distance from `point` to the infinite line through `a` and `b`.
///
/// # Errors
/// Returns an error if `a` and `b` coincide.
pub fn distance_to_line(point: Point, a: Point, b: Point) -> Result<f64, Error> {
    let direction = b - a;
    let length = direction.norm();

    if length == 0.0 {
        return Err(Error::DegenerateLine);
    }

    Ok((direction.cross(point - a) / length).abs())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn center_of_circle_through_three_points() {
        let center = find_center(
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
        )
        .unwrap();

        assert!(center.distance(Point::new(0.0, 0.0)) < 1e-12);
    }

    #[test]
    fn collinear_points_have_no_circle() {
        let result = find_center(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
        );

        assert!(matches!(result, Err(Error::CollinearPoints)));
    }

    #[test]
    fn distance_from_point_to_line() {
        let distance = distance_to_line(
            Point::new(0.0, 2.0),
            Point::new(-1.0, 0.0),
            Point::new(1.0, 0.0),
        )
        .unwrap();

        assert!((distance - 2.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_line_is_rejected() {
        let result = distance_to_line(Point::new(0.0, 1.0), Point::default(), Point::default());

        assert!(matches!(result, Err(Error::DegenerateLine)));
    }

    #[quickcheck_macros::quickcheck]
    fn quadrants_are_in_range(angle: f64) -> bool {
        if !angle.is_finite() {
            return true;
        }

        (1..=4).contains(&quadrant(angle))
    }

    #[test]
    fn quadrants_of_cardinal_angles() {
        assert_eq!(quadrant(0.1), 1);
        assert_eq!(quadrant(2.0), 2);
        assert_eq!(quadrant(3.5), 3);
        assert_eq!(quadrant(5.0), 4);
        assert_eq!(quadrant(-0.1), 4);
        assert_eq!(quadrant(TWO_PI + 0.1), 1);
    }
}
