//! Error-handling module for the crate

use thiserror::Error;

use crate::creepage::PollutionDegree;

pub use crate::changelog::ChangelogError;

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum Error {
    /// Circle construction from collinear points
    #[error("cannot construct a circle through three collinear points")]
    CollinearPoints,
    /// Line construction from coincident points
    #[error("a line requires two distinct points")]
    DegenerateLine,
    /// Smoothing radius must be positive
    #[error("the smoothing radius must be positive, got {0}")]
    NonPositiveSmoothingRadius(f64),
    /// Corner smoothing is only defined for outlines built from arcs
    #[error("corner smoothing requires a polygon built entirely from arcs")]
    SmoothingRequiresArcs,
    /// Corner smoothing of an outline with fewer than two arcs
    #[error("corner smoothing requires at least two arcs, got {0}")]
    PolygonTooSmall(usize),
    /// Smoothing corner radius does not fit the junction geometry
    #[error("no tangential corner of radius {radius} fits this junction")]
    CornerDoesNotFit {
        /// The requested corner radius
        radius: f64,
    },
    /// Annulus with outer radius not exceeding the inner radius
    #[error("outer radius ({outer}) must be greater than inner radius ({inner})")]
    InvalidAnnulus {
        /// Inner radius of the annulus
        inner: f64,
        /// Outer radius of the annulus
        outer: f64,
    },
    /// Creepage request for a pollution degree the tables do not cover
    #[error("pollution degree {0} is not covered by the printed wiring creepage tables")]
    CreepageUnsupportedDegree(PollutionDegree),
    /// Creepage request beyond the tabulated working voltages
    #[error("no creepage data for working voltages above 1000 V, got {0}")]
    CreepageVoltageOutOfRange(f64),
    /// Spiral with fewer than one turn
    #[error("a spiral must have at least 1 turn, got {0}")]
    TooFewTurns(f64),
    /// Negative inter-turn spacing
    #[error("the inter-turn spacing must not be negative, got {0}")]
    NegativeSpacing(f64),
    /// Spiral turns too narrow for the requested corner radius
    #[error(
        "this spiral requires a minimum trace width of {width_mm}mm, \
         which is less than twice the corner radius"
    )]
    TraceTooNarrow {
        /// The minimum trace width of the design, in millimeters
        width_mm: f64,
    },
    /// Stacked winding with fewer than two layers
    #[error("a stacked winding needs at least 2 turns, got {0}")]
    StackTooShort(usize),
    /// Stacked winding exceeding the supported layer count
    #[error("a stacked winding supports at most 32 copper layers, got {0} turns")]
    StackTooTall(usize),
    /// Winding gap exceeding the inner radius
    #[error("the winding gap ({gap}) must be smaller than the inner radius ({inner_radius})")]
    GapTooLarge {
        /// The requested gap
        gap: f64,
        /// The inner radius of the winding
        inner_radius: f64,
    },
    /// Termination tab wider than the winding supports
    #[error(
        "the termination width ({termination_width}) must not exceed \
         twice the outer radius ({outer_radius})"
    )]
    TerminationTooWide {
        /// The requested termination width
        termination_width: f64,
        /// The outer radius of the winding
        outer_radius: f64,
    },
    /// Stackup does not match the number of turns
    #[error("stackup specifies {stackup} layers but the winding has {turns} turns")]
    StackupMismatch {
        /// Number of copper weights in the stackup
        stackup: usize,
        /// Number of turns in the winding
        turns: usize,
    },
    /// Explicit layer assignment does not match the number of turns
    #[error("{layers} layers were assigned to a winding with {turns} turns")]
    LayerCountMismatch {
        /// Number of assigned layers
        layers: usize,
        /// Number of turns in the winding
        turns: usize,
    },
    /// Via strip without room for a single via
    #[error("the via strip spans {width_mm}mm, too narrow for a single via")]
    ViaStripTooNarrow {
        /// Arc length of the strip, in millimeters
        width_mm: f64,
    },
    /// Unrecognized copper layer name
    #[error("unknown copper layer \"{0}\"")]
    UnknownLayer(String),
    /// Changelog parsing or validation error
    #[error(transparent)]
    Changelog(#[from] ChangelogError),
    /// IO Error
    #[error(transparent)]
    IO(#[from] std::io::Error),
    /// Error during a Write operation
    #[error("Failed to write \"{filename}\": {error}")]
    IOWriting {
        /// Underlying IO error
        error: std::io::Error,
        /// Name of the file that could not be written
        filename: String,
    },
}
