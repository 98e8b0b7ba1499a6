mod general;
mod mirror;

pub use general::TransformMesh;
pub use mirror::MirrorMesh;
