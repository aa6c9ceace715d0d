//! Tangential corner rounding for arc-based outlines.
//!
//! Winding polygons are assembled from concentric arcs whose junctions form
//! sharp corners. The functions in this module replace those junctions with
//! arcs of a given radius that are tangential to both neighbors, which keeps
//! the copper etchable and avoids field concentration at the corners.

use crate::error::Error;
use crate::geometry::{
    distance_to_line, is_close, Arc, PathElement, Point, Polygon, PI_OVER_TWO, TWO_PI,
};

/// Find the smoothing arc that joins a line segment to an arc.
///
/// The segment runs from `point` to the start of `arc`. The returned corner
/// arc of the given `radius` is tangential to both the segment and the arc.
/// Returns `None` when the segment is already tangential, so no corner is
/// needed.
///
/// # Errors
/// Returns an error if no corner of the requested radius fits the junction.
pub fn smooth_point_to_arc(point: Point, arc: &Arc, radius: f64) -> Result<Option<Arc>, Error> {
    // normalized to the arc center, which simplifies the math; the arc
    // center is added back to the result at the end
    let p1 = point - arc.center();
    let p2 = arc.start() - arc.center();

    // the angle of the vector from p1 to p2
    let segment_angle = (p2.y - p1.y).atan2(p2.x - p1.x);

    // the initial angle that the arc is pointing
    let arc_angle = if arc.rotates_clockwise() {
        arc.start_angle() - PI_OVER_TWO
    } else {
        arc.start_angle() + PI_OVER_TWO
    };

    // distance from the center of the arc to the center of the corner: if
    // the segment intersects from the inside of the circle it is
    // radius - corner radius, from the outside radius + corner radius
    let a0 = p2.angle();
    let (center_to_center, corner_inside_arc) =
        if segment_angle > a0 + PI_OVER_TWO || segment_angle < a0 - PI_OVER_TWO {
            (arc.radius() + radius, false)
        } else {
            (arc.radius() - radius, true)
        };

    // a tangential segment needs no corner
    if is_close(segment_angle, arc_angle) {
        return Ok(None);
    }

    // the orientation of the corner relative to the segment determines how
    // the delta for the distance arithmetic below is formed
    let (delta, positive_orientation) = match (arc.rotates_clockwise(), corner_inside_arc) {
        (true, true) | (false, false) => (p2 - p1, true),
        (true, false) | (false, true) => (p1 - p2, false),
    };

    let amplitude = delta.norm();
    let alpha = delta.y.atan2(-delta.x);

    let sine = (radius * amplitude - delta.x * p1.y + delta.y * p1.x) / center_to_center / amplitude;
    if !(-1.0..=1.0).contains(&sine) {
        return Err(Error::CornerDoesNotFit { radius });
    }

    let angle = if arc.rotates_clockwise() {
        std::f64::consts::PI - sine.asin() - alpha
    } else {
        sine.asin() - alpha
    };

    // center of the corner
    let center = Point::polar(center_to_center, angle) + arc.center();

    let start_angle = if positive_orientation {
        segment_angle + PI_OVER_TWO
    } else {
        segment_angle - PI_OVER_TWO
    };

    let end_angle = if corner_inside_arc {
        angle
    } else if angle < 0.0 {
        angle + std::f64::consts::PI
    } else {
        angle - std::f64::consts::PI
    };

    // make sure the corner rotates in the correct direction: positive
    // orientations rotate clockwise
    let corner = if positive_orientation {
        if start_angle > end_angle {
            Arc::new(center, radius, start_angle, end_angle)
        } else if start_angle < 0.0 {
            Arc::new(center, radius, start_angle + TWO_PI, end_angle)
        } else {
            Arc::new(center, radius, start_angle, end_angle - TWO_PI)
        }
    } else if start_angle < end_angle {
        Arc::new(center, radius, start_angle, end_angle)
    } else if start_angle > 0.0 {
        Arc::new(center, radius, start_angle - TWO_PI, end_angle)
    } else {
        Arc::new(center, radius, start_angle, end_angle + TWO_PI)
    };

    Ok(Some(corner))
}

/// A junction is continuous when the segment between the arc endpoints is
/// tangential to the arc, or degenerates to a single shared point.
fn transition_is_continuous(arc: &Arc, from: Point, to: Point) -> bool {
    from.distance(to) == 0.0
        || distance_to_line(arc.center(), from, to)
            .map(|distance| is_close(arc.radius(), distance))
            .unwrap_or(true)
}

/// Replace the junction of two consecutive arcs by a smooth transition.
///
/// Returns the trimmed arcs with tangential corners of the given `radius`
/// inserted where the transition is not already continuous.
pub fn round_corner(arc1: Arc, arc2: Arc, radius: f64) -> Result<Vec<Arc>, Error> {
    // check if the transition from the end of arc1 is continuous
    let mut arcs = if transition_is_continuous(&arc1, arc1.end(), arc2.start()) {
        vec![arc1]
    } else {
        match smooth_point_to_arc(arc2.start(), &arc1.reverse(), radius)? {
            None => vec![arc1],
            Some(reversed_corner) => {
                let corner = reversed_corner.reverse();

                // the tangency lies on the line connecting the two centers
                let mut end_angle = (corner.center() - arc1.center()).angle();
                if arc1.rotates_clockwise() {
                    while end_angle > arc1.start_angle() {
                        end_angle -= TWO_PI;
                    }
                } else {
                    while end_angle < arc1.start_angle() {
                        end_angle += TWO_PI;
                    }
                }

                vec![
                    Arc::new(arc1.center(), arc1.radius(), arc1.start_angle(), end_angle),
                    corner,
                ]
            }
        }
    };

    // check if the transition to the start of arc2 is continuous
    if transition_is_continuous(&arc2, arc1.end(), arc2.start()) {
        arcs.push(arc2);
        return Ok(arcs);
    }

    let Some(corner) = smooth_point_to_arc(arc1.end(), &arc2, radius)? else {
        arcs.push(arc2);
        return Ok(arcs);
    };

    // the tangency lies on the line connecting the two centers
    let mut start_angle = (corner.center() - arc2.center()).angle();

    // correct rotation
    if arc2.rotates_clockwise() {
        while start_angle < arc2.end_angle() {
            start_angle += TWO_PI;
        }
    } else {
        while start_angle > arc2.end_angle() {
            start_angle -= TWO_PI;
        }
    }

    arcs.push(corner);
    arcs.push(Arc::new(
        arc2.center(),
        arc2.radius(),
        start_angle,
        arc2.end_angle(),
    ));

    Ok(arcs)
}

/// Smooth the corners of a polygon.
///
/// Adds tangential transition arcs of the given `radius` between the arcs of
/// the outline, including the closing start-to-finish transition.
///
/// # Errors
/// Returns an error if `radius` is not positive, or if the outline contains
/// elements other than arcs or fewer than two of them.
pub fn smooth_polygon(polygon: &Polygon, radius: f64) -> Result<Polygon, Error> {
    if radius <= 0.0 {
        return Err(Error::NonPositiveSmoothingRadius(radius));
    }

    let arcs = polygon
        .elements()
        .iter()
        .map(|element| match element {
            PathElement::Arc(arc) => Ok(*arc),
            PathElement::Point(_) => Err(Error::SmoothingRequiresArcs),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if arcs.len() < 2 {
        return Err(Error::PolygonTooSmall(arcs.len()));
    }

    // smooth the corners
    let mut smoothed = vec![arcs[0]];
    for &arc in &arcs[1..] {
        let previous = smoothed
            .pop()
            .expect("the smoothed outline always retains at least one arc");
        smoothed.extend(round_corner(previous, arc, radius)?);
    }

    // don't forget to smooth the start-to-finish transition
    let last = smoothed
        .pop()
        .expect("the smoothed outline always retains at least one arc");
    let first = smoothed.remove(0);
    smoothed.extend(round_corner(last, first, radius)?);

    Ok(polygon.with_elements(smoothed))
}
