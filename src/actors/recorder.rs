use std::io::{BufWriter, Write};

use serde::Serialize;

use crate::capture::Frame;
use crate::features::CAMERA_DISTANCE;
use crate::pipeline::{Actor, Value, ValueCache};

pub const RECORDER: &str = "recorder";

const EXPECTED: [&str; 1] = [CAMERA_DISTANCE];

#[derive(Serialize)]
struct RecordRow<'a> {
    sequence: u64,
    id: u32,
    label: &'a str,
    position: [f32; 3],
    camera_distance: f32,
}

/// Writes one JSON line per recorded object. An empty label filter records
/// every detection; matching ignores ASCII case.
pub struct RecordActor<W: Write + Send> {
    writer: BufWriter<W>,
    labels: Vec<String>,
    values: ValueCache,
}

impl<W: Write + Send> RecordActor<W> {
    pub fn new(writer: W, labels: Vec<String>) -> Self {
        Self {
            writer: BufWriter::new(writer),
            labels,
            values: ValueCache::new(),
        }
    }

    fn records_label(&self, label: &str) -> bool {
        self.labels.is_empty() || self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }

    fn write_row(&mut self, row: &RecordRow<'_>) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, row)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write + Send> Actor for RecordActor<W> {
    fn label(&self) -> &str {
        RECORDER
    }

    fn expected_labels(&self) -> &[&'static str] {
        &EXPECTED
    }

    fn supply(&mut self, label: &str, value: Value) {
        self.values.insert(label, value);
    }

    fn update(&mut self, frame: &Frame) {
        let distances = match self.values.demand(RECORDER, CAMERA_DISTANCE) {
            Value::Series(distances) => distances.clone(),
            other => panic!("'{CAMERA_DISTANCE}' must be a series, got {other:?}"),
        };

        for (object, distance) in frame.objects.iter().zip(distances) {
            if !self.records_label(&object.label) {
                continue;
            }

            let row = RecordRow {
                sequence: frame.sequence,
                id: object.id,
                label: &object.label,
                position: object.position,
                camera_distance: distance,
            };

            if let Err(e) = self.write_row(&row) {
                tracing::error!(error = %e, sequence = frame.sequence, "failed to record row");
            }
        }
    }

    fn stop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::error!(error = %e, "failed to flush record output");
        }
    }
}
