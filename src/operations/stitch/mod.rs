//! Stitching operations: each consumes one or two point chains and
//! returns a fresh, small [`Mesh`](crate::mesh::Mesh) ready to be absorbed.

mod fan;
mod ladder;
mod quad_split;
mod rings;
mod strip;

pub use fan::FanAroundApex;
pub use ladder::{find_largest_gap, LadderSegment, MAX_OPPOSITE_POINTS};
pub use quad_split::QuadSplit;
pub use rings::StitchRings;
pub use strip::StitchStrip;
