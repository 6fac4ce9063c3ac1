use crate::capture::Frame;
use crate::pipeline::{Feature, FeatureValues, Value};

pub const CHAIN_DISTANCE: &str = "chain-distance";

/// Distance from each detected object to the previously detected one, in
/// detection order; the first object is measured from the origin. A single
/// O(n) pass, so reordering the detection list changes the result.
pub struct ChainDistance;

impl Feature for ChainDistance {
    fn label(&self) -> &str {
        CHAIN_DISTANCE
    }

    fn requires_tracking(&self) -> bool {
        true
    }

    fn compute(&mut self, frame: &Frame, _upstream: &FeatureValues<'_>) -> Value {
        let mut reference = [0.0f32; 3];
        let mut distances = Vec::with_capacity(frame.objects.len());

        for object in &frame.objects {
            distances.push(euclidean(reference, object.position));
            reference = object.position;
        }

        Value::Series(distances)
    }
}

pub const CAMERA_DISTANCE: &str = "camera-distance";

/// Straight-line distance from the camera origin to each detected object.
pub struct CameraDistance;

impl Feature for CameraDistance {
    fn label(&self) -> &str {
        CAMERA_DISTANCE
    }

    fn requires_tracking(&self) -> bool {
        true
    }

    fn compute(&mut self, frame: &Frame, _upstream: &FeatureValues<'_>) -> Value {
        let distances = frame
            .objects
            .iter()
            .map(|object| euclidean([0.0; 3], object.position))
            .collect();

        Value::Series(distances)
    }
}

fn euclidean(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}
