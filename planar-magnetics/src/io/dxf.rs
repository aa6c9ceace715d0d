//! Minimal ASCII DXF (R2000) export of winding outlines.
//!
//! Outlines are flattened into piecewise-linear paths and emitted as closed
//! `LWPOLYLINE` entities. Like the KiCad output, coordinates are written in
//! millimeters.

use std::fmt;
use std::io::Write;

use crate::error::Error;
use crate::geometry::Polygon;

/// Millimeters per meter.
const MM_PER_M: f64 = 1e3;

/// Default angular sampling step for arc flattening, radians.
const DEFAULT_MAX_ANGLE: f64 = std::f64::consts::PI / 36.0;

/// A writer object emitting a DXF document to an output stream.
pub struct DxfWriter<W: Write> {
    writer: W,
    max_angle: f64,
}

impl<W: Write> DxfWriter<W> {
    /// Create a new [DxfWriter] over the given output, sampling arcs at 5°.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            max_angle: DEFAULT_MAX_ANGLE,
        }
    }

    /// Use the given angular sampling step for arc flattening.
    pub fn with_max_angle(mut self, max_angle: f64) -> Self {
        self.max_angle = max_angle;
        self
    }

    /// Write a complete DXF document containing the given outlines.
    pub fn write_polygons<'a, Polygons>(mut self, polygons: Polygons) -> Result<(), Error>
    where
        Polygons: IntoIterator<Item = &'a Polygon>,
    {
        self.group(0, "SECTION")?;
        self.group(2, "HEADER")?;
        self.group(9, "$ACADVER")?;
        self.group(1, "AC1015")?;
        self.group(0, "ENDSEC")?;

        self.group(0, "SECTION")?;
        self.group(2, "ENTITIES")?;

        for polygon in polygons {
            let path = polygon.to_pwl_path(self.max_angle);

            self.group(0, "LWPOLYLINE")?;
            self.group(8, &polygon.layer().to_string())?;
            self.group(90, &path.len().to_string())?;
            // flag 1 closes the polyline
            self.group(70, "1")?;
            for point in path {
                self.group(10, &format!("{}", point.x * MM_PER_M))?;
                self.group(20, &format!("{}", point.y * MM_PER_M))?;
            }
        }

        self.group(0, "ENDSEC")?;
        self.group(0, "EOF")?;

        Ok(())
    }

    fn group(&mut self, code: i32, value: &str) -> Result<(), Error> {
        writeln!(self.writer, "{code}")?;
        writeln!(self.writer, "{value}")?;
        Ok(())
    }
}

impl<W: Write> fmt::Debug for DxfWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DxfWriter")
            .field("writer", &"<unspecified std::io::Write>")
            .field("max_angle", &self.max_angle)
            .finish()
    }
}
