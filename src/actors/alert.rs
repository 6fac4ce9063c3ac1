use crate::capture::Frame;
use crate::features::CLOSEST_APPROACH;
use crate::pipeline::{Actor, Value, ValueCache};

pub const PROXIMITY_ALERT: &str = "proximity-alert";

const EXPECTED: [&str; 1] = [CLOSEST_APPROACH];

/// Warns when the closest detected object comes nearer than the configured
/// distance. Edge-triggered: one warning per approach, cleared when the
/// scene opens up again.
pub struct ProximityAlert {
    min_distance: f32,
    breached: bool,
    values: ValueCache,
}

impl ProximityAlert {
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance,
            breached: false,
            values: ValueCache::new(),
        }
    }
}

impl Actor for ProximityAlert {
    fn label(&self) -> &str {
        PROXIMITY_ALERT
    }

    fn expected_labels(&self) -> &[&'static str] {
        &EXPECTED
    }

    fn supply(&mut self, label: &str, value: Value) {
        self.values.insert(label, value);
    }

    fn update(&mut self, frame: &Frame) {
        let closest = match self.values.demand(PROXIMITY_ALERT, CLOSEST_APPROACH) {
            Value::Scalar(closest) => *closest,
            other => panic!("'{CLOSEST_APPROACH}' must be a scalar, got {other:?}"),
        };

        if closest < self.min_distance && !self.breached {
            self.breached = true;
            tracing::warn!(
                sequence = frame.sequence,
                distance = format!("{closest:.2}"),
                threshold = format!("{:.2}", self.min_distance),
                "object closer than alert threshold"
            );
        } else if closest >= self.min_distance && self.breached {
            self.breached = false;
            tracing::debug!(sequence = frame.sequence, "proximity alert cleared");
        }
    }

    fn stop(&mut self) {
        self.breached = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::ImageData;

    fn frame(sequence: u64) -> Frame {
        Frame {
            sequence,
            image: ImageData::new(1, 1),
            objects: Vec::new(),
        }
    }

    fn step(actor: &mut ProximityAlert, sequence: u64, closest: f32) {
        actor.supply(CLOSEST_APPROACH, Value::Scalar(closest));
        actor.update(&frame(sequence));
    }

    #[test]
    fn breach_is_edge_triggered() {
        let mut actor = ProximityAlert::new(1.5);

        step(&mut actor, 0, 3.0);
        assert!(!actor.breached);

        step(&mut actor, 1, 1.0);
        assert!(actor.breached);

        // Stays breached while close, clears when the object backs off.
        step(&mut actor, 2, 0.9);
        assert!(actor.breached);

        step(&mut actor, 3, 2.0);
        assert!(!actor.breached);
    }

    #[test]
    fn empty_scene_never_breaches() {
        let mut actor = ProximityAlert::new(1.5);
        step(&mut actor, 0, f32::INFINITY);
        assert!(!actor.breached);
    }
}
