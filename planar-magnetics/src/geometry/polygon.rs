//! This module defines [Polygon], a closed copper outline on a single layer.

use std::ops::Add;

use uuid::Uuid;

use super::{Arc, Layer, Point};

/// One element of a polygon outline.
///
/// Consecutive elements are connected by straight segments, so an outline
/// may freely mix corner points and arc sections.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathElement {
    /// A corner point
    Point(Point),
    /// A circular arc section
    Arc(Arc),
}

impl From<Point> for PathElement {
    fn from(point: Point) -> Self {
        PathElement::Point(point)
    }
}

impl From<Arc> for PathElement {
    fn from(arc: Arc) -> Self {
        PathElement::Arc(arc)
    }
}

impl Add<Point> for PathElement {
    type Output = PathElement;

    fn add(self, rhs: Point) -> Self::Output {
        match self {
            PathElement::Point(point) => PathElement::Point(point + rhs),
            PathElement::Arc(arc) => PathElement::Arc(arc + rhs),
        }
    }
}

/// Fill mode of a polygon.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Fill {
    /// Solid copper fill
    #[default]
    Solid,
    /// Outline only
    None,
}

/// A closed copper outline on a single layer.
#[derive(Clone, Debug)]
pub struct Polygon {
    elements: Vec<PathElement>,
    layer: Layer,
    width: f64,
    fill: Fill,
    tstamp: Uuid,
}

impl Polygon {
    /// Create a new [Polygon] with zero stroke width and solid fill.
    pub fn new<Elements>(elements: Elements, layer: Layer) -> Self
    where
        Elements: IntoIterator,
        Elements::Item: Into<PathElement>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            layer,
            width: 0.0,
            fill: Fill::Solid,
            tstamp: Uuid::new_v4(),
        }
    }

    /// Use the given stroke width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Use the given fill mode.
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    /// The outline elements, in traversal order.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// The copper layer this outline lives on.
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// The stroke width of the outline.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The fill mode of the outline.
    pub fn fill(&self) -> Fill {
        self.fill
    }

    /// The unique timestamp identifier of this outline.
    pub fn tstamp(&self) -> Uuid {
        self.tstamp
    }

    /// A copy of this polygon with the given outline but all other
    /// properties preserved.
    pub fn with_elements<Elements>(&self, elements: Elements) -> Self
    where
        Elements: IntoIterator,
        Elements::Item: Into<PathElement>,
    {
        Self {
            elements: elements.into_iter().map(Into::into).collect(),
            layer: self.layer,
            width: self.width,
            fill: self.fill,
            tstamp: Uuid::new_v4(),
        }
    }

    /// Flatten the outline into a piecewise-linear path, sampling every arc
    /// with an angular step of at most `max_angle`.
    pub fn to_pwl_path(&self, max_angle: f64) -> Vec<Point> {
        let mut path = Vec::new();

        for element in &self.elements {
            match element {
                PathElement::Point(point) => path.push(*point),
                PathElement::Arc(arc) => path.extend(arc.interpolate(max_angle)),
            }
        }

        path
    }
}

impl Add<Point> for Polygon {
    type Output = Polygon;

    fn add(self, rhs: Point) -> Self::Output {
        Polygon {
            elements: self
                .elements
                .into_iter()
                .map(|element| element + rhs)
                .collect(),
            layer: self.layer,
            width: self.width,
            fill: self.fill,
            tstamp: self.tstamp,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Fill, PathElement, Polygon};
    use crate::geometry::{Arc, Layer, Point, TWO_PI};

    #[test]
    fn outlines_mix_points_and_arcs() {
        let polygon = Polygon::new(
            vec![
                PathElement::from(Point::new(1.0, 0.0)),
                PathElement::from(Arc::new(Point::default(), 1.0, 0.0, TWO_PI / 4.0)),
            ],
            Layer::FrontCu,
        );

        assert_eq!(polygon.elements().len(), 2);
        assert_eq!(polygon.fill(), Fill::Solid);
        assert_eq!(polygon.width(), 0.0);
    }

    #[test]
    fn translation_shifts_every_element() {
        let polygon = Polygon::new(
            vec![PathElement::from(Point::new(1.0, 1.0))],
            Layer::BackCu,
        ) + Point::new(-1.0, 0.0);

        assert_eq!(
            polygon.elements()[0],
            PathElement::Point(Point::new(0.0, 1.0))
        );
    }

    #[test]
    fn flattening_samples_arcs_and_keeps_points() {
        let polygon = Polygon::new(
            vec![
                PathElement::from(Point::new(2.0, 0.0)),
                PathElement::from(Arc::new(Point::default(), 1.0, 0.0, TWO_PI / 2.0)),
            ],
            Layer::FrontCu,
        );

        let path = polygon.to_pwl_path(0.1);

        assert_eq!(path[0], Point::new(2.0, 0.0));
        assert!(path.len() > 2);
        assert!(path.last().unwrap().distance(Point::new(-1.0, 0.0)) < 1e-12);
    }

    #[test]
    fn fill_modes_have_kicad_spellings() {
        assert_eq!(Fill::Solid.to_string(), "solid");
        assert_eq!(Fill::None.to_string(), "none");
    }
}
