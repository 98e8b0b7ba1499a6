use thiserror::Error;

use crate::math::Point3;

/// Top-level error type for the Weft mesh kernel.
#[derive(Debug, Error)]
pub enum WeftError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Stitch(#[from] StitchError),
}

/// Errors related to geometric validity of facets and primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("coincident vertices near {0}")]
    CoincidentVertices(Point3),

    #[error("collinear vertices through {0}")]
    CollinearVertices(Point3),

    /// Both ends of a side fall into the same edge-key cell of the mesh.
    #[error("edge {start} -> {end} is shorter than the mesh tolerance {tolerance}")]
    CollapsedEdge {
        start: Point3,
        end: Point3,
        tolerance: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to edge bookkeeping inside a mesh.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// An edge would be shared by a third facet.
    #[error("edge {start} -> {end} would be used by a third facet")]
    EdgeOverflow { start: Point3, end: Point3 },
}

/// Errors raised by the stitching operations when chain lengths are unusable.
#[derive(Debug, Error)]
pub enum StitchError {
    /// The opposite chain of a ladder is too long to fan from a single pair.
    #[error("opposite chain has {count} points, at most {max} can be laddered against a pair")]
    ChainImbalance { count: usize, max: usize },

    #[error("{chain} chain needs at least {min} points, got {actual}")]
    TooFewPoints {
        chain: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("ladder rail must have exactly 2 points, got {actual}")]
    RailLength { actual: usize },

    #[error("outer chain ({outer} points) is shorter than inner chain ({inner} points)")]
    OuterShorterThanInner { inner: usize, outer: usize },

    #[error("strip sides have {port} and {starboard} points, they may differ by at most one")]
    StripSkew { port: usize, starboard: usize },
}

impl StitchError {
    /// Returns whether this error reports an unusable chain count
    /// (as opposed to an imbalanced ladder that needs re-chunking).
    #[must_use]
    pub fn is_chain_count(&self) -> bool {
        !matches!(self, Self::ChainImbalance { .. })
    }
}

/// Convenience type alias for results using [`WeftError`].
pub type Result<T> = std::result::Result<T, WeftError>;
