mod frame;
mod source;
mod synthetic;

pub use frame::{BoundingBox, DetectedObject, Frame, ImageData};
pub use source::{open_source, CaptureError, FrameSource};
pub use synthetic::SyntheticSource;
