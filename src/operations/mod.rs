pub mod stitch;
pub mod transform;
