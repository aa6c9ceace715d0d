//! A design library for planar magnetic windings on printed circuit boards.
//!
//! The library models copper winding shapes (multi-turn spirals on a single
//! layer, stacked one-turn-per-layer windings, planar transformers) as
//! polygons built from circular arcs, estimates their DC resistance from
//! conductor material data, and serializes the results to KiCad
//! S-expressions or DXF. All quantities are SI (meters, ohms, hertz,
//! degrees Celsius for temperatures) unless a serializer states otherwise.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

pub mod changelog;
pub mod conduction;
pub mod creepage;
pub mod error;
pub mod geometry;
pub mod io;
pub mod materials;
pub mod smoothing;
pub mod windings;

pub use error::Error;
