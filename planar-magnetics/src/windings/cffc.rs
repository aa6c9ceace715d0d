//! Stacked windings with one turn per copper layer, joined by via strips at
//! the inner radius.
//!
//! The turn shapes follow the CFFC inductor construction: the top and
//! bottom turns carry termination tabs, the inner turns are rotated against
//! each other so that the inter-layer via strips do not overlap.

use serde::{Deserialize, Serialize};

use crate::conduction::{dcr_of_annulus, weight_to_thickness};
use crate::error::Error;
use crate::geometry::{
    via::{DEFAULT_VIA_DRILL, DEFAULT_VIA_SIZE},
    Arc, Layer, PathElement, Point, Polygon, Via, TWO_PI,
};
use crate::materials::Conductor;

/// Minimum clearance between the drills of neighboring vias in a strip.
const MIN_VIA_SPACING: f64 = 0.5e-3;

/// The largest supported stackup; matches the KiCad copper layer limit.
const MAX_LAYERS: usize = 32;

fn check_annulus(inner_radius: f64, outer_radius: f64) -> Result<(), Error> {
    if outer_radius <= inner_radius {
        return Err(Error::InvalidAnnulus {
            inner: inner_radius,
            outer: outer_radius,
        });
    }

    Ok(())
}

fn check_gap(gap: f64, inner_radius: f64) -> Result<(), Error> {
    if gap >= inner_radius {
        return Err(Error::GapTooLarge { gap, inner_radius });
    }

    Ok(())
}

fn check_termination(termination_width: f64, outer_radius: f64) -> Result<(), Error> {
    if termination_width > 2.0 * outer_radius {
        return Err(Error::TerminationTooWide {
            termination_width,
            outer_radius,
        });
    }

    Ok(())
}

/// The entry turn of a stacked winding, with its termination tab.
#[derive(Clone, Debug)]
pub struct TopTurn {
    inner_radius: f64,
    outer_radius: f64,
    polygon: Polygon,
}

impl TopTurn {
    /// Create a new [TopTurn].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        at: Point,
        inner_radius: f64,
        outer_radius: f64,
        gap: f64,
        termination_width: f64,
        viastrip_angle: f64,
        viastrip_width: f64,
        layer: Layer,
    ) -> Result<Self, Error> {
        check_annulus(inner_radius, outer_radius)?;
        check_gap(gap, inner_radius)?;
        check_termination(termination_width, outer_radius)?;

        // the gap angles
        let inner_gap_angle = (gap / inner_radius).asin();
        let outer_gap_angle = (gap / outer_radius).asin();

        // angle from the center to the corner of the termination
        let term_angle = (termination_width / outer_radius / 2.0).asin();

        let termination_arc = Arc::new(at, inner_radius, -term_angle, term_angle);

        let inner_arc = Arc::new(
            at,
            inner_radius + viastrip_width,
            term_angle,
            TWO_PI - term_angle - inner_gap_angle - viastrip_angle,
        );

        let via_arc = Arc::new(
            at,
            inner_radius,
            TWO_PI - term_angle - inner_gap_angle - viastrip_angle,
            TWO_PI - term_angle - inner_gap_angle,
        );

        let outer_arc = Arc::new(
            at,
            outer_radius,
            TWO_PI - term_angle - outer_gap_angle,
            term_angle,
        );

        // the termination tab
        let termination = [
            at + Point::new(outer_radius + termination_width, termination_width / 2.0),
            at + Point::new(outer_radius + termination_width, -termination_width / 2.0),
            at + Point::new(outer_radius * term_angle.cos(), -termination_width / 2.0),
        ];

        let elements = [termination_arc, inner_arc, via_arc, outer_arc]
            .map(PathElement::from)
            .into_iter()
            .chain(termination.map(PathElement::from));

        Ok(Self {
            inner_radius,
            outer_radius,
            polygon: Polygon::new(elements, layer),
        })
    }

    /// The copper outline of the turn.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Estimate the DC resistance of the turn, in ohms.
    pub fn estimate_dcr(&self, thickness: f64, rho: f64) -> Result<f64, Error> {
        dcr_of_annulus(thickness, self.inner_radius, self.outer_radius, rho)
    }
}

/// The exit turn of a stacked winding, the mirror image of [TopTurn].
#[derive(Clone, Debug)]
pub struct BottomTurn {
    inner_radius: f64,
    outer_radius: f64,
    polygon: Polygon,
}

impl BottomTurn {
    /// Create a new [BottomTurn].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        at: Point,
        inner_radius: f64,
        outer_radius: f64,
        gap: f64,
        termination_width: f64,
        viastrip_angle: f64,
        viastrip_width: f64,
        layer: Layer,
    ) -> Result<Self, Error> {
        check_annulus(inner_radius, outer_radius)?;
        check_gap(gap, inner_radius)?;
        check_termination(termination_width, outer_radius)?;

        let inner_gap_angle = (gap / inner_radius).asin();
        let outer_gap_angle = (gap / outer_radius).asin();
        let term_angle = (termination_width / outer_radius / 2.0).asin();

        let termination_arc = Arc::new(at, inner_radius, term_angle, -term_angle);

        let inner_arc = Arc::new(
            at,
            inner_radius + viastrip_width,
            TWO_PI - term_angle,
            term_angle + inner_gap_angle + viastrip_angle,
        );

        let via_arc = Arc::new(
            at,
            inner_radius,
            term_angle + inner_gap_angle + viastrip_angle,
            term_angle + inner_gap_angle,
        );

        let outer_arc = Arc::new(
            at,
            outer_radius,
            term_angle + outer_gap_angle,
            TWO_PI - term_angle,
        );

        let termination = [
            at + Point::new(outer_radius + termination_width, -termination_width / 2.0),
            at + Point::new(outer_radius + termination_width, termination_width / 2.0),
            at + Point::new(outer_radius * term_angle.cos(), termination_width / 2.0),
        ];

        let elements = [termination_arc, inner_arc, via_arc, outer_arc]
            .map(PathElement::from)
            .into_iter()
            .chain(termination.map(PathElement::from));

        Ok(Self {
            inner_radius,
            outer_radius,
            polygon: Polygon::new(elements, layer),
        })
    }

    /// The copper outline of the turn.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Estimate the DC resistance of the turn, in ohms.
    pub fn estimate_dcr(&self, thickness: f64, rho: f64) -> Result<f64, Error> {
        dcr_of_annulus(thickness, self.inner_radius, self.outer_radius, rho)
    }
}

/// A middle turn of a stacked winding, rotated so that its via strips clear
/// the neighboring layers.
#[derive(Clone, Debug)]
pub struct InnerTurn {
    inner_radius: f64,
    outer_radius: f64,
    polygon: Polygon,
}

impl InnerTurn {
    /// Create a new [InnerTurn].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        at: Point,
        inner_radius: f64,
        outer_radius: f64,
        gap: f64,
        rotation: f64,
        viastrip_angle: f64,
        viastrip_width: f64,
        layer: Layer,
    ) -> Result<Self, Error> {
        check_annulus(inner_radius, outer_radius)?;
        check_gap(gap, inner_radius)?;

        let inner_gap_angle = (gap / inner_radius).asin();
        let outer_gap_angle = (gap / outer_radius).asin();

        let start_via_arc = Arc::new(
            at,
            inner_radius,
            inner_gap_angle / 2.0 + rotation,
            inner_gap_angle / 2.0 + viastrip_angle + rotation,
        );
        let inner_arc = Arc::new(
            at,
            inner_radius + viastrip_width,
            inner_gap_angle / 2.0 + viastrip_angle + rotation,
            TWO_PI - inner_gap_angle / 2.0 - viastrip_angle + rotation,
        );
        let end_via_arc = Arc::new(
            at,
            inner_radius,
            TWO_PI - inner_gap_angle / 2.0 - viastrip_angle + rotation,
            TWO_PI - inner_gap_angle / 2.0 + rotation,
        );
        let outer_arc = Arc::new(
            at,
            outer_radius,
            TWO_PI - outer_gap_angle / 2.0 + rotation,
            outer_gap_angle / 2.0 + rotation,
        );

        Ok(Self {
            inner_radius,
            outer_radius,
            polygon: Polygon::new(
                [start_via_arc, inner_arc, end_via_arc, outer_arc],
                layer,
            ),
        })
    }

    /// The copper outline of the turn.
    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Estimate the DC resistance of the turn, in ohms.
    pub fn estimate_dcr(&self, thickness: f64, rho: f64) -> Result<f64, Error> {
        dcr_of_annulus(thickness, self.inner_radius, self.outer_radius, rho)
    }
}

/// One turn of a stacked winding.
#[derive(Clone, Debug)]
pub enum Turn {
    /// The entry turn with its termination tab
    Top(TopTurn),
    /// A middle turn
    Inner(InnerTurn),
    /// The exit turn with its termination tab
    Bottom(BottomTurn),
}

impl Turn {
    /// The copper outline of the turn.
    pub fn polygon(&self) -> &Polygon {
        match self {
            Turn::Top(turn) => turn.polygon(),
            Turn::Inner(turn) => turn.polygon(),
            Turn::Bottom(turn) => turn.polygon(),
        }
    }

    /// The copper layer the turn lives on.
    pub fn layer(&self) -> Layer {
        self.polygon().layer()
    }

    /// Estimate the DC resistance of the turn, in ohms.
    pub fn estimate_dcr(&self, thickness: f64, rho: f64) -> Result<f64, Error> {
        match self {
            Turn::Top(turn) => turn.estimate_dcr(thickness, rho),
            Turn::Inner(turn) => turn.estimate_dcr(thickness, rho),
            Turn::Bottom(turn) => turn.estimate_dcr(thickness, rho),
        }
    }
}

/// A strip of evenly spaced vias filling an angular span at the inner
/// radius of a winding.
#[derive(Clone, Debug)]
pub struct ViaStrip {
    vias: Vec<Via>,
}

impl ViaStrip {
    /// Create a new [ViaStrip] between `start_angle` and `end_angle`.
    ///
    /// # Errors
    /// Returns an error if the span is too narrow to hold a single via.
    pub fn new(
        at: Point,
        layers: Vec<Layer>,
        inner_radius: f64,
        start_angle: f64,
        end_angle: f64,
        size: f64,
        drill: f64,
    ) -> Result<Self, Error> {
        let angle = end_angle - start_angle;

        // how many vias fit in the strip
        let width = inner_radius * angle.abs();
        let number_vias = (width / (drill + MIN_VIA_SPACING)) as usize;
        if number_vias == 0 {
            return Err(Error::ViaStripTooNarrow {
                width_mm: 1e3 * width,
            });
        }

        let via_radius = inner_radius + size / 2.0;
        let delta_angle = angle / number_vias as f64;
        let initial_angle = start_angle + delta_angle / 2.0;

        let vias = (0..number_vias)
            .map(|n| {
                let angle = initial_angle + n as f64 * delta_angle;
                Via::new(
                    at + Point::polar(via_radius, angle),
                    size,
                    drill,
                    layers.clone(),
                )
            })
            .collect();

        Ok(Self { vias })
    }

    /// The vias of the strip.
    pub fn vias(&self) -> &[Via] {
        &self.vias
    }
}

fn default_gap() -> f64 {
    0.5e-3
}

fn default_viastrip_width() -> f64 {
    1.0e-3
}

/// Parameters describing a stacked winding with one turn per layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CffcParameters {
    /// Center of the winding
    pub at: Point,
    /// Inner radius of the winding window
    pub inner_radius: f64,
    /// Outer radius of the winding window
    pub outer_radius: f64,
    /// Number of turns, one per copper layer
    pub number_turns: usize,
    /// Radial gap between a turn and its terminations
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Width of the termination tabs; the winding window width when omitted
    #[serde(default)]
    pub termination_width: Option<f64>,
    /// Radial width of the via landing strips at the inner radius
    #[serde(default = "default_viastrip_width")]
    pub viastrip_width: f64,
    /// Explicit copper layer for each turn, top to bottom; the full board
    /// stackup when omitted
    #[serde(default)]
    pub layers: Option<Vec<Layer>>,
}

/// A stacked winding with one turn per copper layer, connected in series by
/// via strips at the inner radius.
#[derive(Clone, Debug)]
pub struct CffcWinding {
    turns: Vec<Turn>,
    via_strips: Vec<ViaStrip>,
    inner_radius: f64,
    outer_radius: f64,
}

impl CffcWinding {
    /// Create a new [CffcWinding] from its parameters.
    ///
    /// # Errors
    /// Returns an error if the stackup has fewer than 2 or more than 32
    /// turns, the winding window is inverted, the gap does not fit the inner
    /// radius, or an explicit layer assignment does not match the turn
    /// count.
    pub fn new(parameters: &CffcParameters) -> Result<Self, Error> {
        let at = parameters.at;
        let inner_radius = parameters.inner_radius;
        let outer_radius = parameters.outer_radius;
        let number_turns = parameters.number_turns;
        let gap = parameters.gap;
        let viastrip_width = parameters.viastrip_width;

        if number_turns < 2 {
            return Err(Error::StackTooShort(number_turns));
        }
        if number_turns > MAX_LAYERS {
            return Err(Error::StackTooTall(number_turns));
        }
        check_annulus(inner_radius, outer_radius)?;
        check_gap(gap, inner_radius)?;

        let termination_width = parameters
            .termination_width
            .unwrap_or(outer_radius - inner_radius);
        check_termination(termination_width, outer_radius)?;

        let layers = match &parameters.layers {
            Some(layers) => {
                if layers.len() != number_turns {
                    return Err(Error::LayerCountMismatch {
                        layers: layers.len(),
                        turns: number_turns,
                    });
                }
                layers.clone()
            }
            None => default_layers(number_turns),
        };

        let inner_gap_angle = (gap / inner_radius).asin();
        let term_angle = (termination_width / outer_radius / 2.0).asin();

        // the angle left for the via transitions once the termination and
        // the turn gaps are accounted for
        let circumference_for_transitions =
            (TWO_PI - term_angle) * inner_radius - number_turns as f64 * gap;
        let angle_for_transitions = circumference_for_transitions / inner_radius;
        let viastrip_angle = angle_for_transitions / (number_turns - 1) as f64;

        // the rotation per turn that keeps the via strips from overlapping
        let initial_rotation = (term_angle + inner_gap_angle) / 2.0;
        let rotation_per_turn = viastrip_angle + inner_gap_angle;

        log::debug!(
            "stacked winding of {number_turns} turns, via strip angle {viastrip_angle:.4} rad"
        );

        let mut turns = Vec::with_capacity(number_turns);
        turns.push(Turn::Top(TopTurn::new(
            at,
            inner_radius,
            outer_radius,
            gap,
            termination_width,
            viastrip_angle,
            viastrip_width,
            layers[0],
        )?));
        for n in 1..number_turns - 1 {
            turns.push(Turn::Inner(InnerTurn::new(
                at,
                inner_radius,
                outer_radius,
                gap,
                -(n as f64) * rotation_per_turn - initial_rotation,
                viastrip_angle,
                viastrip_width,
                layers[n],
            )?));
        }
        turns.push(Turn::Bottom(BottomTurn::new(
            at,
            inner_radius,
            outer_radius,
            gap,
            termination_width,
            viastrip_angle,
            viastrip_width,
            layers[number_turns - 1],
        )?));

        // one via strip joins each pair of adjacent layers, placed on the
        // entry via span of the lower turn
        let mut via_strips = Vec::with_capacity(number_turns - 1);
        for pair in 0..number_turns - 1 {
            let start_angle = if pair + 1 < number_turns - 1 {
                let rotation = -((pair + 1) as f64) * rotation_per_turn - initial_rotation;
                inner_gap_angle / 2.0 + rotation
            } else {
                term_angle + inner_gap_angle
            };

            via_strips.push(ViaStrip::new(
                at,
                vec![layers[pair], layers[pair + 1]],
                inner_radius,
                start_angle,
                start_angle + viastrip_angle,
                DEFAULT_VIA_SIZE,
                DEFAULT_VIA_DRILL,
            )?);
        }

        Ok(Self {
            turns,
            via_strips,
            inner_radius,
            outer_radius,
        })
    }

    /// The turns of the winding, top to bottom.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The via strips joining adjacent turns.
    pub fn via_strips(&self) -> &[ViaStrip] {
        &self.via_strips
    }

    /// Inner radius of the winding window.
    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    /// Outer radius of the winding window.
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Estimate the DC resistance of the winding, in ohms.
    ///
    /// Sums the series resistance of every turn, with the thickness of each
    /// layer taken from `stackup` (copper weights in ounces, top to bottom)
    /// and the resistivity of `material` evaluated at `temperature` (°C).
    ///
    /// # Errors
    /// Returns an error if the stackup length does not match the number of
    /// turns.
    pub fn estimate_dcr(
        &self,
        stackup: &[f64],
        temperature: f64,
        material: &Conductor,
    ) -> Result<f64, Error> {
        if stackup.len() != self.turns.len() {
            return Err(Error::StackupMismatch {
                stackup: stackup.len(),
                turns: self.turns.len(),
            });
        }

        let rho = material.resistivity_at(temperature);

        // TODO: add the via-strip barrel resistance between the layers
        self.turns
            .iter()
            .zip(stackup)
            .map(|(turn, weight)| turn.estimate_dcr(weight_to_thickness(*weight), rho))
            .sum()
    }
}

/// The default layer assignment: front, inner layers in order, back.
fn default_layers(number_turns: usize) -> Vec<Layer> {
    (0..number_turns)
        .map(|index| {
            if index == 0 {
                Layer::FrontCu
            } else if index == number_turns - 1 {
                Layer::BackCu
            } else {
                Layer::InnerCu(u8::try_from(index).expect("layer count is validated above"))
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::{CffcParameters, CffcWinding, Turn, ViaStrip};
    use crate::error::Error;
    use crate::geometry::{Layer, Point};
    use crate::materials::COPPER;

    fn parameters() -> CffcParameters {
        CffcParameters {
            at: Point::new(110.0e-3, 110.0e-3),
            inner_radius: 10.0e-3,
            outer_radius: 15.0e-3,
            number_turns: 6,
            gap: 0.5e-3,
            termination_width: None,
            viastrip_width: 1.0e-3,
            layers: None,
        }
    }

    #[test]
    fn windings_have_one_turn_per_layer() {
        let winding = CffcWinding::new(&parameters()).unwrap();

        assert_eq!(winding.turns().len(), 6);
        assert!(matches!(winding.turns()[0], Turn::Top(_)));
        assert!(matches!(winding.turns()[5], Turn::Bottom(_)));

        let layers: Vec<Layer> = winding.turns().iter().map(Turn::layer).collect();
        assert_eq!(
            layers,
            vec![
                Layer::FrontCu,
                Layer::InnerCu(1),
                Layer::InnerCu(2),
                Layer::InnerCu(3),
                Layer::InnerCu(4),
                Layer::BackCu,
            ]
        );
    }

    #[test]
    fn adjacent_layers_are_joined_by_via_strips() {
        let winding = CffcWinding::new(&parameters()).unwrap();

        assert_eq!(winding.via_strips().len(), 5);
        for strip in winding.via_strips() {
            assert!(!strip.vias().is_empty());
        }

        // the first strip joins the top layer to the first inner layer
        let first = &winding.via_strips()[0].vias()[0];
        assert_eq!(first.layers(), &[Layer::FrontCu, Layer::InnerCu(1)]);
    }

    #[test]
    fn via_strips_space_their_vias_apart() {
        let strip = ViaStrip::new(
            Point::default(),
            vec![Layer::FrontCu, Layer::BackCu],
            10.0e-3,
            0.0,
            1.0,
            0.8e-3,
            0.4e-3,
        )
        .unwrap();

        // 10 mm of arc at 0.9 mm pitch
        assert_eq!(strip.vias().len(), 11);

        let positions: Vec<_> = strip.vias().iter().map(|via| via.at()).collect();
        for pair in positions.windows(2) {
            assert!(pair[0].distance(pair[1]) > 0.4e-3 + 0.4e-3);
        }
    }

    #[test]
    fn narrow_via_strips_are_rejected() {
        let result = ViaStrip::new(
            Point::default(),
            vec![Layer::FrontCu, Layer::BackCu],
            10.0e-3,
            0.0,
            0.01,
            0.8e-3,
            0.4e-3,
        );

        assert!(matches!(result, Err(Error::ViaStripTooNarrow { .. })));
    }

    #[test]
    fn resistance_scales_with_copper_weight() {
        let winding = CffcWinding::new(&parameters()).unwrap();

        let light = winding.estimate_dcr(&[1.0; 6], 25.0, &COPPER).unwrap();
        let heavy = winding.estimate_dcr(&[2.0; 6], 25.0, &COPPER).unwrap();

        assert!((light / heavy - 2.0).abs() < 1e-9);
        assert!(winding.estimate_dcr(&[1.0; 6], 100.0, &COPPER).unwrap() > light);
    }

    #[test]
    fn stackup_length_must_match_the_turns() {
        let winding = CffcWinding::new(&parameters()).unwrap();

        assert!(matches!(
            winding.estimate_dcr(&[1.0; 4], 25.0, &COPPER),
            Err(Error::StackupMismatch { stackup: 4, turns: 6 })
        ));
    }

    #[test]
    fn invalid_windings_are_rejected() {
        let mut too_short = parameters();
        too_short.number_turns = 1;
        assert!(matches!(
            CffcWinding::new(&too_short),
            Err(Error::StackTooShort(1))
        ));

        let mut big_gap = parameters();
        big_gap.gap = 20.0e-3;
        assert!(matches!(
            CffcWinding::new(&big_gap),
            Err(Error::GapTooLarge { .. })
        ));

        let mut wrong_layers = parameters();
        wrong_layers.layers = Some(vec![Layer::FrontCu, Layer::BackCu]);
        assert!(matches!(
            CffcWinding::new(&wrong_layers),
            Err(Error::LayerCountMismatch { layers: 2, turns: 6 })
        ));
    }
}
