use std::thread;
use std::time::Duration;

use crate::config::CameraConfig;

use super::source::{CaptureError, FrameSource};
use super::{BoundingBox, DetectedObject, Frame, ImageData};

const IMAGE_WIDTH: u32 = 1280;
const IMAGE_HEIGHT: u32 = 720;

/// In-process capture driver producing two scripted walkers. Used when no
/// physical device is attached; frame pacing follows the configured fps.
pub struct SyntheticSource {
    sequence: u64,
    interval: Duration,
    tracking: bool,
    opened: bool,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self {
            sequence: 0,
            interval: Duration::ZERO,
            tracking: false,
            opened: false,
        }
    }
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSource for SyntheticSource {
    fn open(&mut self, config: &CameraConfig, needs_tracking: bool) -> Result<(), CaptureError> {
        if config.fps == 0 {
            return Err(CaptureError::Open("fps must be nonzero".to_string()));
        }

        self.interval = Duration::from_secs_f64(1.0 / config.fps as f64);
        self.tracking = needs_tracking || config.tracking;
        self.opened = true;

        tracing::info!(
            driver = "synthetic",
            resolution = %config.resolution,
            fps = config.fps,
            confidence_threshold = format!("{:.1}", config.confidence_threshold),
            tracking = self.tracking,
            "capture device opened"
        );

        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame, CaptureError> {
        if !self.opened {
            return Err(CaptureError::Grab("device not open".to_string()));
        }

        thread::sleep(self.interval);

        let sequence = self.sequence;
        self.sequence += 1;

        let objects = if self.tracking {
            vec![
                walker(0, crossing_position(sequence)),
                walker(1, approaching_position(sequence)),
            ]
        } else {
            Vec::new()
        };

        Ok(Frame {
            sequence,
            image: ImageData::new(IMAGE_WIDTH, IMAGE_HEIGHT),
            objects,
        })
    }

    fn close(&mut self) {
        if self.opened {
            self.opened = false;
            tracing::info!(driver = "synthetic", frames = self.sequence, "capture device closed");
        }
    }
}

/// Walks left to right at a fixed 4 m depth.
fn crossing_position(sequence: u64) -> [f32; 3] {
    let step = (sequence % 120) as f32;
    [-3.0 + 0.05 * step, 0.0, 4.0]
}

/// Approaches the camera along the optical axis.
fn approaching_position(sequence: u64) -> [f32; 3] {
    let step = (sequence % 130) as f32;
    [1.0, 0.0, 6.0 - 0.04 * step]
}

fn walker(id: u32, position: [f32; 3]) -> DetectedObject {
    // Crude pinhole projection, just enough to give the overlay a usable box.
    let scale = 500.0 / position[2].max(0.5);
    let center_x = IMAGE_WIDTH as f32 / 2.0 + position[0] * scale;
    let center_y = IMAGE_HEIGHT as f32 / 2.0 + position[1] * scale;
    let half_width = 0.35 * scale;
    let half_height = 0.9 * scale;

    DetectedObject {
        id,
        label: "person".to_string(),
        bounding_box: BoundingBox {
            top_left: [center_x - half_width, center_y - half_height],
            bottom_right: [center_x + half_width, center_y + half_height],
        },
        position,
    }
}
