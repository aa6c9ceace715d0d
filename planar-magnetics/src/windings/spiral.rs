//! Single-layer multi-turn spiral windings.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::conduction::dcr_of_annular_sector;
use crate::error::Error;
use crate::geometry::{Arc, Layer, Point, Polygon, TWO_PI};
use crate::smoothing::smooth_polygon;

use std::f64::consts::PI;

/// Fractional turn counts below this threshold are treated as whole turns.
const FRACTIONAL_EPSILON: f64 = 1e-9;

/// Optimal turn-boundary radii between `inner_radius` and `outer_radius`,
/// following the geometric progression of equation 10 in Knabben et al.,
/// "Conceptualization and Analysis of a Next-Generation Ultra-Compact
/// 1.5-kW PCB-Integrated Wide-Input-Voltage-Range 12V-Output Industrial
/// DC/DC Converter Module".
fn turn_radii(inner_radius: f64, outer_radius: f64, num_turns: usize) -> Vec<f64> {
    let inverse = 1.0 / num_turns as f64;

    (0..num_turns)
        .map(|i| {
            (((num_turns - i) as f64 * inner_radius.ln() + i as f64 * outer_radius.ln()) * inverse)
                .exp()
        })
        .collect()
}

/// Parameters describing a single-layer spiral winding.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct SpiralParameters {
    /// Center of the spiral
    pub at: Point,
    /// Inner radius of the winding window
    pub inner_radius: f64,
    /// Outer radius of the winding window
    pub outer_radius: f64,
    /// Number of turns; a fractional part over-rotates the final section
    pub num_turns: f64,
    /// Radial spacing between adjacent turns
    pub spacing: f64,
    /// Copper layer of the winding
    #[serde(default)]
    pub layer: Layer,
    /// Corner radius used to smooth the outline, zero to disable smoothing
    #[serde(default)]
    pub corner_radius: f64,
}

/// Radial span and angular extent of one turn of a spiral.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TurnSector {
    /// Inner copper edge of the turn
    pub inner_radius: f64,
    /// Outer copper edge of the turn
    pub outer_radius: f64,
    /// Angular extent of the turn
    pub angle: f64,
}

/// An optimized multi-turn spiral winding on a single layer.
///
/// Turn boundaries follow the geometric progression that equalizes the
/// resistive drop across turns, and the trace width grows towards the
/// outside accordingly.
#[derive(Clone, Debug)]
pub struct Spiral {
    polygon: Polygon,
    sectors: Vec<TurnSector>,
}

impl Spiral {
    /// Create a new [Spiral] from its parameters.
    ///
    /// # Errors
    /// Returns an error if the parameters describe fewer than one turn, an
    /// inverted winding window, a negative spacing, or turns too narrow for
    /// the requested corner radius.
    pub fn new(parameters: &SpiralParameters) -> Result<Self, Error> {
        let &SpiralParameters {
            at,
            inner_radius,
            outer_radius,
            num_turns,
            spacing,
            layer,
            corner_radius,
        } = parameters;

        if num_turns < 1.0 {
            return Err(Error::TooFewTurns(num_turns));
        }
        if outer_radius <= inner_radius {
            return Err(Error::InvalidAnnulus {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        if spacing < 0.0 {
            return Err(Error::NegativeSpacing(spacing));
        }

        // unpack the turn count into its integer and fractional parts
        let integer_turns = num_turns.floor() as usize;
        let fractional_turns = num_turns.fract();

        let wide_radii = turn_radii(inner_radius, outer_radius, integer_turns);
        let narrow_radii = turn_radii(inner_radius, outer_radius, integer_turns + 1);

        // verify that the narrowest trace is wide enough for the corners
        let min_trace_width = if num_turns > 1.0 {
            narrow_radii[1] - narrow_radii[0] - spacing
        } else {
            outer_radius - inner_radius
        };
        if min_trace_width <= 2.0 * corner_radius {
            return Err(Error::TraceTooNarrow {
                width_mm: 1e3 * min_trace_width,
            });
        }

        let arcs = if fractional_turns < FRACTIONAL_EPSILON {
            integer_arcs(at, &wide_radii, outer_radius, spacing)
        } else {
            fractional_arcs(
                at,
                &wide_radii,
                &narrow_radii,
                outer_radius,
                spacing,
                fractional_turns,
            )
        };

        log::debug!(
            "spiral of {num_turns} turns with boundary radii {wide_radii:?}, {} arcs",
            arcs.len()
        );

        let mut polygon = Polygon::new(arcs, layer);
        if corner_radius > 0.0 {
            polygon = smooth_polygon(&polygon, corner_radius)?;
        }

        let sectors = turn_sectors(
            &wide_radii,
            &narrow_radii,
            outer_radius,
            spacing,
            fractional_turns,
        );

        Ok(Self { polygon, sectors })
    }

    /// The copper outline of the winding.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// The annular sectors the turns of this winding occupy.
    pub fn sectors(&self) -> &[TurnSector] {
        &self.sectors
    }

    /// Estimate the DC resistance of the winding, in ohms.
    ///
    /// Sums the resistance of the annular sector occupied by each turn for a
    /// layer of the given `thickness` and a material of resistivity `rho`.
    ///
    /// # Errors
    /// Returns an error if a turn degenerates to a non-positive radial span.
    pub fn estimate_dcr(&self, thickness: f64, rho: f64) -> Result<f64, Error> {
        self.sectors
            .iter()
            .map(|sector| {
                dcr_of_annular_sector(
                    thickness,
                    sector.inner_radius,
                    sector.outer_radius,
                    sector.angle,
                    rho,
                )
            })
            .sum()
    }
}

/// Arcs of a spiral with a whole number of turns.
fn integer_arcs(at: Point, radii: &[f64], outer_radius: f64, gap: f64) -> Vec<Arc> {
    let mut arcs = Vec::new();

    // inner edges, spiraling outwards
    let angle = (1.0 - gap / radii[0]).acos();
    arcs.push(Arc::new(at, radii[0], -PI + angle, PI));
    for (r0, r1) in radii.iter().tuple_windows() {
        let angle = (r0 / r1).acos();
        arcs.push(Arc::new(at, *r1, -PI + angle, PI));
    }

    // the outermost edge
    let innermost = radii[radii.len() - 1];
    let a0 = (innermost / outer_radius).acos();
    let a1 = ((innermost - gap) / outer_radius).acos();
    arcs.push(Arc::new(at, outer_radius, PI + a0, -PI + a1));

    // outer edges of the inner turns, returning inwards
    for (r1, r0) in radii.iter().rev().tuple_windows() {
        let angle = ((r0 - gap) / (r1 - gap)).acos();
        arcs.push(Arc::new(at, r1 - gap, PI, -PI + angle));
    }

    arcs
}

/// Arcs of a spiral whose final turn is fractional, over-rotating the
/// terminal sections by the fractional part of the turn count.
fn fractional_arcs(
    at: Point,
    wide_radii: &[f64],
    narrow_radii: &[f64],
    outer_radius: f64,
    gap: f64,
    fractional_turns: f64,
) -> Vec<Arc> {
    let turns = wide_radii.len();
    let rotation_angle = -PI + TWO_PI * fractional_turns;

    let mut arcs = Vec::new();

    // inner edges: alternating wide and narrow sections, spiraling outwards
    let mut previous_radius = wide_radii[0] - gap;
    let mut previous_angle = -PI;
    for i in 0..turns {
        let wide = wide_radii[i];
        arcs.push(Arc::new(
            at,
            wide,
            previous_angle + (previous_radius / wide).acos(),
            PI,
        ));

        let narrow = narrow_radii[i + 1];
        arcs.push(Arc::new(at, narrow, -PI + (wide / narrow).acos(), rotation_angle));

        previous_radius = narrow;
        previous_angle = rotation_angle;
    }

    // the outermost edge
    let terminal = narrow_radii[turns];
    let a0 = (terminal / outer_radius).acos();
    let a1 = ((terminal - gap) / outer_radius).acos();
    arcs.push(Arc::new(
        at,
        outer_radius,
        rotation_angle + a0,
        rotation_angle + a1 - TWO_PI,
    ));

    // outer edges: alternating narrow and wide sections, returning inwards
    for i in (0..turns).rev() {
        let narrow = narrow_radii[i + 1] - gap;
        let wide = wide_radii[i] - gap;
        arcs.push(Arc::new(
            at,
            narrow,
            rotation_angle,
            -PI + (wide / narrow).acos(),
        ));
        arcs.push(Arc::new(
            at,
            wide,
            PI,
            rotation_angle + ((narrow_radii[i] - gap) / wide).acos(),
        ));
    }

    arcs
}

/// The annular sectors occupied by the turns of a spiral.
fn turn_sectors(
    wide_radii: &[f64],
    narrow_radii: &[f64],
    outer_radius: f64,
    gap: f64,
    fractional_turns: f64,
) -> Vec<TurnSector> {
    let turns = wide_radii.len();

    if fractional_turns < FRACTIONAL_EPSILON {
        return (0..turns)
            .map(|i| TurnSector {
                inner_radius: wide_radii[i],
                outer_radius: if i + 1 < turns {
                    wide_radii[i + 1] - gap
                } else {
                    outer_radius
                },
                angle: TWO_PI,
            })
            .collect();
    }

    let mut sectors: Vec<TurnSector> = (0..turns)
        .map(|i| TurnSector {
            inner_radius: wide_radii[i],
            outer_radius: if i + 1 < turns {
                wide_radii[i + 1] - gap
            } else {
                narrow_radii[turns] - gap
            },
            angle: TWO_PI,
        })
        .collect();

    // the partial terminal turn
    sectors.push(TurnSector {
        inner_radius: narrow_radii[turns],
        outer_radius,
        angle: TWO_PI * fractional_turns,
    });

    sectors
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::{turn_radii, Spiral, SpiralParameters};
    use crate::conduction::dcr_of_annulus;
    use crate::error::Error;
    use crate::geometry::{Layer, Point};
    use crate::materials::COPPER;

    fn parameters() -> SpiralParameters {
        SpiralParameters {
            at: Point::default(),
            inner_radius: 10.0e-3,
            outer_radius: 20.0e-3,
            num_turns: 2.4,
            spacing: 0.5e-3,
            layer: Layer::FrontCu,
            corner_radius: 0.0,
        }
    }

    #[test]
    fn boundary_radii_follow_the_geometric_progression() {
        let radii = turn_radii(6.0e-3, 12.0e-3, 2);

        assert!((radii[0] - 6.0e-3).abs() < 1e-12);
        assert!((radii[1] - 6.0e-3 * 2.0f64.sqrt()).abs() < 1e-12);
    }

    /// Regression test: a large thin single-turn spiral is exactly one
    /// annulus, so both estimates must agree.
    #[test]
    fn single_turn_resistance_matches_the_annulus() {
        let spiral = Spiral::new(&SpiralParameters {
            at: Point::default(),
            inner_radius: 100.0,
            outer_radius: 101.0,
            num_turns: 1.0,
            spacing: 0.1,
            layer: Layer::FrontCu,
            corner_radius: 0.0,
        })
        .unwrap();

        let thickness = 0.1;
        let dcr = spiral.estimate_dcr(thickness, COPPER.resistivity).unwrap();
        let expected = dcr_of_annulus(thickness, 100.0, 101.0, COPPER.resistivity).unwrap();

        assert!((dcr / expected - 1.0).abs() < 1e-12);
    }

    #[test]
    fn fractional_spirals_have_a_partial_terminal_sector() {
        let spiral = Spiral::new(&parameters()).unwrap();

        // two full turns plus the partial one
        assert_eq!(spiral.sectors().len(), 3);
        let partial = spiral.sectors()[2];
        assert!((partial.angle - 0.4 * crate::geometry::TWO_PI).abs() < 1e-9);
        assert_eq!(partial.outer_radius, 20.0e-3);
    }

    #[test]
    fn fractional_spirals_produce_the_expected_arc_count() {
        let spiral = Spiral::new(&parameters()).unwrap();

        // two arcs per turn out, one terminal arc, two arcs per turn back
        assert_eq!(spiral.polygon().elements().len(), 9);
    }

    #[test]
    fn whole_turn_spirals_produce_the_expected_arc_count() {
        let mut parameters = parameters();
        parameters.num_turns = 2.0;

        let spiral = Spiral::new(&parameters).unwrap();

        // two inner edges, the outermost edge, one returning edge
        assert_eq!(spiral.polygon().elements().len(), 4);
        assert_eq!(spiral.sectors().len(), 2);
    }

    #[test]
    fn smoothing_inserts_corner_arcs() {
        let mut parameters = parameters();
        parameters.corner_radius = 0.05e-3;

        let spiral = Spiral::new(&parameters).unwrap();

        assert!(spiral.polygon().elements().len() > 9);
    }

    #[test]
    fn resistance_grows_with_turn_count() {
        let mut two_turns = parameters();
        two_turns.num_turns = 2.0;
        let mut three_turns = parameters();
        three_turns.num_turns = 3.0;

        let thickness = 70.0e-6;
        let dcr2 = Spiral::new(&two_turns)
            .unwrap()
            .estimate_dcr(thickness, COPPER.resistivity)
            .unwrap();
        let dcr3 = Spiral::new(&three_turns)
            .unwrap()
            .estimate_dcr(thickness, COPPER.resistivity)
            .unwrap();

        assert!(dcr3 > dcr2);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let mut too_few = parameters();
        too_few.num_turns = 0.5;
        assert!(matches!(
            Spiral::new(&too_few),
            Err(Error::TooFewTurns(_))
        ));

        let mut inverted = parameters();
        inverted.outer_radius = 5.0e-3;
        assert!(matches!(
            Spiral::new(&inverted),
            Err(Error::InvalidAnnulus { .. })
        ));

        let mut fat_corners = parameters();
        fat_corners.num_turns = 8.0;
        fat_corners.corner_radius = 2.0e-3;
        assert!(matches!(
            Spiral::new(&fat_corners),
            Err(Error::TraceTooNarrow { .. })
        ));
    }

    #[test]
    fn parameters_deserialize_from_json() {
        let parameters: SpiralParameters = serde_json::from_str(
            r#"{
                "at": {"x": 0.11, "y": 0.11},
                "inner_radius": 0.006,
                "outer_radius": 0.012,
                "num_turns": 2.4,
                "spacing": 0.0005,
                "layer": "In2.Cu"
            }"#,
        )
        .unwrap();

        assert_eq!(parameters.layer, Layer::InnerCu(2));
        assert_eq!(parameters.corner_radius, 0.0);
        assert!(Spiral::new(&parameters).is_ok());
    }
}
