use crate::capture::Frame;
use crate::pipeline::{Feature, FeatureValues, Value};

use super::distance::CAMERA_DISTANCE;

pub const CLOSEST_APPROACH: &str = "closest-approach";

/// Smallest camera distance in the frame. With no detections the value is
/// +infinity, so downstream alerts never fire on an empty scene.
pub struct ClosestApproach;

impl Feature for ClosestApproach {
    fn label(&self) -> &str {
        CLOSEST_APPROACH
    }

    fn depends_on(&self) -> &[&'static str] {
        &[CAMERA_DISTANCE]
    }

    fn compute(&mut self, _frame: &Frame, upstream: &FeatureValues<'_>) -> Value {
        let distances = match upstream.demand(CLOSEST_APPROACH, CAMERA_DISTANCE) {
            Value::Series(distances) => distances,
            other => panic!("'{CAMERA_DISTANCE}' must be a series, got {other:?}"),
        };

        let closest = distances.iter().copied().fold(f32::INFINITY, f32::min);
        Value::Scalar(closest)
    }
}
