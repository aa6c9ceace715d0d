//! Serialization of winding geometry to CAD formats.

pub mod dxf;
pub mod kicad;

pub use dxf::DxfWriter;
pub use kicad::{KicadWriter, ToKicad};
