//! KiCad S-expression serialization of winding geometry.
//!
//! The fragments produced here can be pasted into a KiCad 6 footprint file
//! and edited further in the footprint editor. KiCad expects millimeters,
//! so coordinates are scaled at this boundary; everywhere else the crate
//! uses meters.

use std::fmt;
use std::io::Write;

use crate::error::Error;
use crate::geometry::{Arc, PathElement, Point, Polygon, Via};
use crate::windings::cffc::Turn;
use crate::windings::{CffcWinding, Spiral, Transformer, ViaStrip};

/// Millimeters per meter; KiCad coordinates are written in millimeters.
const MM_PER_M: f64 = 1e3;

/// Types with a KiCad S-expression rendering.
pub trait ToKicad {
    /// Write the S-expression representation into `out`.
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// The S-expression representation as a string.
    fn to_kicad(&self) -> String {
        let mut out = String::new();
        self.write_kicad(&mut out)
            .expect("writing to a string cannot fail");
        out
    }
}

impl ToKicad for Point {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "{} {}", self.x * MM_PER_M, self.y * MM_PER_M)
    }
}

impl ToKicad for Arc {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "(arc (start {}) (mid {}) (end {}))",
            self.start().to_kicad(),
            self.mid().to_kicad(),
            self.end().to_kicad(),
        )
    }
}

impl ToKicad for PathElement {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            PathElement::Point(point) => write!(out, "(xy {})", point.to_kicad()),
            PathElement::Arc(arc) => arc.write_kicad(out),
        }
    }
}

impl ToKicad for Polygon {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(out, "(gr_poly (pts")?;
        for element in self.elements() {
            write!(out, " ")?;
            element.write_kicad(out)?;
        }
        write!(
            out,
            ") (layer {}) (width {}) (fill {}) (tstamp {}))",
            self.layer(),
            self.width() * MM_PER_M,
            self.fill(),
            self.tstamp(),
        )
    }
}

impl ToKicad for Via {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        write!(
            out,
            "(via (at {}) (size {}) (drill {}) (layers",
            self.at().to_kicad(),
            self.size() * MM_PER_M,
            self.drill() * MM_PER_M,
        )?;
        for layer in self.layers() {
            write!(out, " {layer}")?;
        }
        write!(out, ")")?;
        if self.removes_unused_layers() {
            write!(out, " (remove_unused_layers)")?;
        }
        write!(out, " (free) (net 0) (tstamp {}))", self.tstamp())
    }
}

impl ToKicad for ViaStrip {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for (index, via) in self.vias().iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            via.write_kicad(out)?;
        }
        Ok(())
    }
}

impl ToKicad for Spiral {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.polygon().write_kicad(out)
    }
}

impl ToKicad for Turn {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.polygon().write_kicad(out)
    }
}

impl ToKicad for CffcWinding {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for (index, turn) in self.turns().iter().enumerate() {
            if index > 0 {
                writeln!(out)?;
            }
            turn.write_kicad(out)?;
        }
        for strip in self.via_strips() {
            writeln!(out)?;
            strip.write_kicad(out)?;
        }
        Ok(())
    }
}

impl ToKicad for Transformer {
    fn write_kicad(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.primary().write_kicad(out)?;
        writeln!(out)?;
        self.secondary().write_kicad(out)
    }
}

/// A writer object emitting KiCad S-expressions to an output stream.
pub struct KicadWriter<W: Write> {
    writer: W,
}

impl<W: Write> KicadWriter<W> {
    /// Create a new [KicadWriter] over the given output.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one item followed by a newline.
    pub fn write(&mut self, item: &dyn ToKicad) -> Result<(), Error> {
        writeln!(self.writer, "{}", item.to_kicad())?;
        Ok(())
    }
}

impl<W: Write> fmt::Debug for KicadWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KicadWriter")
            .field("writer", &"<unspecified std::io::Write>")
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::ToKicad;
    use crate::geometry::{Arc, Layer, PathElement, Point, Polygon, Via};

    #[test]
    fn points_are_written_in_millimeters() {
        let point = Point::new(0.25, -0.5);

        assert_eq!(point.to_kicad(), "250 -500");
    }

    #[test]
    fn polygons_carry_layer_fill_and_timestamp() {
        let polygon = Polygon::new(
            vec![
                PathElement::from(Point::new(0.25, 0.0)),
                PathElement::from(Arc::new(Point::default(), 0.25, 0.0, 1.0)),
            ],
            Layer::InnerCu(1),
        );

        let expression = polygon.to_kicad();

        assert!(expression.starts_with("(gr_poly (pts (xy 250 0) (arc (start 250 0)"));
        assert!(expression.contains("(layer In1.Cu)"));
        assert!(expression.contains("(fill solid)"));
        assert!(expression.contains(&format!("(tstamp {})", polygon.tstamp())));
    }

    #[test]
    fn vias_list_their_layers() {
        let via = Via::new(
            Point::default(),
            0.8e-3,
            0.4e-3,
            vec![Layer::FrontCu, Layer::BackCu],
        );

        let expression = via.to_kicad();

        assert!(expression.starts_with("(via (at 0 0)"));
        assert!(expression.contains("(layers F.Cu B.Cu)"));
        assert!(expression.contains("(remove_unused_layers)"));
        assert!(expression.contains("(net 0)"));
    }
}
