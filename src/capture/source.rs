use thiserror::Error;

use crate::config::CameraConfig;

use super::synthetic::SyntheticSource;
use super::Frame;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("unknown capture driver '{0}'")]
    UnknownDriver(String),
    #[error("failed to open capture device: {0}")]
    Open(String),
    #[error("frame acquisition failed: {0}")]
    Grab(String),
}

/// A capture device driver. `next_frame` blocks until the device delivers a
/// frame; a `Grab` error covers a single failed acquisition, and the caller
/// decides whether to retry.
pub trait FrameSource: Send {
    /// Open the device. Camera settings are passed through uninterpreted;
    /// `needs_tracking` requests the object-tracking capability.
    fn open(&mut self, config: &CameraConfig, needs_tracking: bool) -> Result<(), CaptureError>;

    fn next_frame(&mut self) -> Result<Frame, CaptureError>;

    fn close(&mut self);
}

/// Open the driver named in the camera config.
pub fn open_source(
    config: &CameraConfig,
    needs_tracking: bool,
) -> Result<Box<dyn FrameSource>, CaptureError> {
    let mut source: Box<dyn FrameSource> = match config.driver.as_str() {
        "synthetic" => Box::new(SyntheticSource::new()),
        other => return Err(CaptureError::UnknownDriver(other.to_string())),
    };

    source.open(config, needs_tracking)?;
    Ok(source)
}
