//! This module defines [Via], a plated through-hole connecting copper layers.

use uuid::Uuid;

use super::{Layer, Point};

/// Default via pad diameter, in meters.
pub const DEFAULT_VIA_SIZE: f64 = 0.8e-3;
/// Default via drill diameter, in meters.
pub const DEFAULT_VIA_DRILL: f64 = 0.4e-3;

/// A plated through-hole connecting copper layers.
#[derive(Clone, Debug)]
pub struct Via {
    at: Point,
    size: f64,
    drill: f64,
    layers: Vec<Layer>,
    remove_unused_layers: bool,
    tstamp: Uuid,
}

impl Via {
    /// Create a new [Via] with unused annular rings removed.
    pub fn new(at: Point, size: f64, drill: f64, layers: Vec<Layer>) -> Self {
        Self {
            at,
            size,
            drill,
            layers,
            remove_unused_layers: true,
            tstamp: Uuid::new_v4(),
        }
    }

    /// Keep the annular rings on layers the via does not connect to.
    pub fn keep_unused_layers(mut self) -> Self {
        self.remove_unused_layers = false;
        self
    }

    /// The via position.
    pub fn at(&self) -> Point {
        self.at
    }

    /// The pad diameter.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// The drill diameter.
    pub fn drill(&self) -> f64 {
        self.drill
    }

    /// The copper layers the via connects.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Whether unused annular rings are removed.
    pub fn removes_unused_layers(&self) -> bool {
        self.remove_unused_layers
    }

    /// The unique timestamp identifier of this via.
    pub fn tstamp(&self) -> Uuid {
        self.tstamp
    }
}

#[cfg(test)]
mod test {
    use super::{Via, DEFAULT_VIA_DRILL, DEFAULT_VIA_SIZE};
    use crate::geometry::{Layer, Point};

    #[test]
    fn vias_default_to_removing_unused_rings() {
        let via = Via::new(
            Point::default(),
            DEFAULT_VIA_SIZE,
            DEFAULT_VIA_DRILL,
            vec![Layer::FrontCu, Layer::InnerCu(1)],
        );

        assert!(via.removes_unused_layers());
        assert!(!via.keep_unused_layers().removes_unused_layers());
    }
}
