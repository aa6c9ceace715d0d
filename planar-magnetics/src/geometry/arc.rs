//! This module defines [Arc], a circular arc section.

use std::ops::Add;

use serde::{Deserialize, Serialize};

use super::Point;

/// A circular arc, described by its center, radius and angle pair.
///
/// The rotation sense is encoded in the order of the angles: the arc rotates
/// clockwise iff `end_angle < start_angle`. Angles are not normalized, so
/// sweeps beyond a full rotation are representable; over-rotated spiral
/// sections rely on this.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    center: Point,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl Arc {
    /// Create a new [Arc].
    pub fn new(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        debug_assert!(radius >= 0.0, "arc radius must not be negative");

        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// The center of the circle this arc lies on.
    pub fn center(&self) -> Point {
        self.center
    }

    /// The radius of the circle this arc lies on.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The angle at which the arc starts.
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// The angle at which the arc ends.
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// The point at which the arc starts.
    pub fn start(&self) -> Point {
        self.center + Point::polar(self.radius, self.start_angle)
    }

    /// The point at the angular middle of the arc.
    pub fn mid(&self) -> Point {
        let mid_angle = 0.5 * (self.start_angle + self.end_angle);
        self.center + Point::polar(self.radius, mid_angle)
    }

    /// The point at which the arc ends.
    pub fn end(&self) -> Point {
        self.center + Point::polar(self.radius, self.end_angle)
    }

    /// The signed angle swept by the arc, negative for clockwise rotation.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether the arc rotates clockwise.
    pub fn rotates_clockwise(&self) -> bool {
        self.end_angle < self.start_angle
    }

    /// The same arc traversed in the opposite direction.
    pub fn reverse(&self) -> Self {
        Self::new(self.center, self.radius, self.end_angle, self.start_angle)
    }

    /// Sample the arc into a point chain whose angular step does not exceed
    /// `max_angle`. Both endpoints are included.
    pub fn interpolate(&self, max_angle: f64) -> Vec<Point> {
        debug_assert!(max_angle > 0.0, "angular step must be positive");

        let steps = (self.sweep().abs() / max_angle).ceil().max(1.0) as usize;
        let increment = self.sweep() / steps as f64;

        (0..=steps)
            .map(|step| {
                self.center
                    + Point::polar(self.radius, self.start_angle + increment * step as f64)
            })
            .collect()
    }
}

impl Add<Point> for Arc {
    type Output = Arc;

    fn add(self, rhs: Point) -> Self::Output {
        Arc::new(self.center + rhs, self.radius, self.start_angle, self.end_angle)
    }
}

#[cfg(test)]
mod test {
    use super::Arc;
    use crate::geometry::{Point, PI_OVER_TWO, TWO_PI};

    fn close(a: Point, b: Point) -> bool {
        a.distance(b) < 1e-12
    }

    #[test]
    fn endpoints_lie_at_the_given_angles() {
        let arc = Arc::new(Point::new(1.0, 0.0), 2.0, 0.0, PI_OVER_TWO);

        assert!(close(arc.start(), Point::new(3.0, 0.0)));
        assert!(close(arc.end(), Point::new(1.0, 2.0)));
        assert!(!arc.rotates_clockwise());
    }

    #[test]
    fn reversing_swaps_endpoints_and_rotation_sense() {
        let arc = Arc::new(Point::default(), 1.0, -1.0, 2.0);
        let reversed = arc.reverse();

        assert!(close(reversed.start(), arc.end()));
        assert!(close(reversed.end(), arc.start()));
        assert!(reversed.rotates_clockwise());
    }

    #[test]
    fn interpolation_spans_the_whole_arc() {
        let arc = Arc::new(Point::default(), 1.0, 0.0, TWO_PI);
        let path = arc.interpolate(0.1);

        assert!(close(path[0], arc.start()));
        assert!(close(*path.last().unwrap(), arc.end()));
        assert!(path.len() >= (TWO_PI / 0.1) as usize);
    }

    #[test]
    fn interpolation_of_a_degenerate_arc_keeps_its_endpoints() {
        let arc = Arc::new(Point::default(), 1.0, 1.0, 1.0);
        let path = arc.interpolate(0.5);

        assert_eq!(path.len(), 2);
        assert!(close(path[0], path[1]));
    }

    #[test]
    fn translation_moves_the_center_only() {
        let arc = Arc::new(Point::default(), 1.0, 0.0, 1.0) + Point::new(2.0, -1.0);

        assert_eq!(arc.center(), Point::new(2.0, -1.0));
        assert_eq!(arc.radius(), 1.0);
    }
}
