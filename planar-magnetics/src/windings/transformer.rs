//! Planar transformer assemblies built from two stacked windings sharing
//! one radial footprint.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::geometry::{Layer, Point};
use crate::materials::Conductor;

use super::cffc::{CffcParameters, CffcWinding};

/// The largest supported stackup; matches the KiCad copper layer limit.
const MAX_LAYERS: usize = 32;

fn default_gap() -> f64 {
    0.5e-3
}

/// Parameters describing a planar transformer.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct TransformerParameters {
    /// Center of both windings
    pub at: Point,
    /// Inner radius of the shared winding window
    pub inner_radius: f64,
    /// Outer radius of the shared winding window
    pub outer_radius: f64,
    /// Number of primary turns, occupying the top of the stackup
    pub primary_turns: usize,
    /// Number of secondary turns, occupying the bottom of the stackup
    pub secondary_turns: usize,
    /// Radial gap between a turn and its terminations
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Width of the termination tabs; the winding window width when omitted
    #[serde(default)]
    pub termination_width: Option<f64>,
}

/// A planar transformer: a primary and a secondary stacked winding over the
/// same radial footprint, partitioned across the board stackup.
///
/// The primary occupies the front copper layer and the first inner layers,
/// the secondary the remaining inner layers and the back copper layer, so
/// both windings terminate on an outside-accessible tab.
#[derive(Clone, Debug)]
pub struct Transformer {
    primary: CffcWinding,
    secondary: CffcWinding,
    primary_turns: usize,
    secondary_turns: usize,
}

impl Transformer {
    /// Create a new [Transformer] from its parameters.
    ///
    /// # Errors
    /// Returns an error if either winding has fewer than 2 turns, the
    /// combined stackup exceeds 32 layers, or the shared winding window is
    /// invalid.
    pub fn new(parameters: &TransformerParameters) -> Result<Self, Error> {
        let primary_turns = parameters.primary_turns;
        let secondary_turns = parameters.secondary_turns;

        if primary_turns + secondary_turns > MAX_LAYERS {
            return Err(Error::StackTooTall(primary_turns + secondary_turns));
        }

        // the primary ends on an inner layer, the secondary starts on the
        // following one
        let primary_layers: Vec<Layer> = (0..primary_turns)
            .map(|index| {
                if index == 0 {
                    Layer::FrontCu
                } else {
                    inner_layer(index)
                }
            })
            .collect();
        let secondary_layers: Vec<Layer> = (0..secondary_turns)
            .map(|index| {
                if index == secondary_turns - 1 {
                    Layer::BackCu
                } else {
                    inner_layer(primary_turns + index)
                }
            })
            .collect();

        let winding = |turns: usize, layers: Vec<Layer>| CffcParameters {
            at: parameters.at,
            inner_radius: parameters.inner_radius,
            outer_radius: parameters.outer_radius,
            number_turns: turns,
            gap: parameters.gap,
            termination_width: parameters.termination_width,
            viastrip_width: 1.0e-3,
            layers: Some(layers),
        };

        let primary = CffcWinding::new(&winding(primary_turns, primary_layers))?;
        let secondary = CffcWinding::new(&winding(secondary_turns, secondary_layers))?;

        Ok(Self {
            primary,
            secondary,
            primary_turns,
            secondary_turns,
        })
    }

    /// The primary winding.
    pub fn primary(&self) -> &CffcWinding {
        &self.primary
    }

    /// The secondary winding.
    pub fn secondary(&self) -> &CffcWinding {
        &self.secondary
    }

    /// The primary-to-secondary turns ratio.
    pub fn turns_ratio(&self) -> f64 {
        self.primary_turns as f64 / self.secondary_turns as f64
    }

    /// Estimate the DC resistance of both windings, in ohms.
    ///
    /// The stackups list the copper weight (oz) of each winding's layers,
    /// top to bottom.
    ///
    /// # Errors
    /// Returns an error if a stackup length does not match its winding.
    pub fn estimate_dcr(
        &self,
        primary_stackup: &[f64],
        secondary_stackup: &[f64],
        temperature: f64,
        material: &Conductor,
    ) -> Result<(f64, f64), Error> {
        let primary = self
            .primary
            .estimate_dcr(primary_stackup, temperature, material)?;
        let secondary = self
            .secondary
            .estimate_dcr(secondary_stackup, temperature, material)?;

        Ok((primary, secondary))
    }
}

fn inner_layer(index: usize) -> Layer {
    Layer::InnerCu(u8::try_from(index).expect("layer count is validated above"))
}
