pub mod curve;
pub mod plane;
pub mod transform;

pub use curve::{Arc, ChainParams, Circle, Curve, CurveDomain, LineSeg};
pub use plane::Plane;
pub use transform::Transform;
