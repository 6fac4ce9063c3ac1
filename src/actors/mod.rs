mod alert;
mod overlay;
mod recorder;

pub use alert::ProximityAlert;
pub use overlay::{LogSink, OverlayActor, RenderSink};
pub use recorder::RecordActor;
