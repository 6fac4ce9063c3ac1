mod distance;
mod proximity;

pub use distance::{CameraDistance, ChainDistance, CAMERA_DISTANCE, CHAIN_DISTANCE};
pub use proximity::{ClosestApproach, CLOSEST_APPROACH};
