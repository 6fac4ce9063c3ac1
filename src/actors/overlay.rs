use crate::capture::{Frame, ImageData};
use crate::features::CHAIN_DISTANCE;
use crate::pipeline::{Actor, Value, ValueCache};

pub type Color = (u8, u8, u8);

const WHITE: Color = (255, 255, 255);

const ID_COLORS: [Color; 5] = [
    (59, 232, 176),
    (25, 175, 208),
    (105, 102, 205),
    (255, 185, 0),
    (252, 99, 107),
];

fn color_for_id(id: u32) -> Color {
    ID_COLORS[id as usize % ID_COLORS.len()]
}

/// Drawing surface the overlay renders to. Windowing lives outside this
/// crate; implementations receive primitive draw calls and a final present
/// per frame.
pub trait RenderSink: Send {
    fn rect(&mut self, top_left: [f32; 2], bottom_right: [f32; 2], color: Color);

    fn text(&mut self, text: &str, position: [f32; 2], color: Color);

    fn present(&mut self, image: &ImageData);

    fn close(&mut self);
}

/// Sink that summarizes draw calls through tracing. Stands in when no
/// display is attached.
#[derive(Default)]
pub struct LogSink {
    rects: usize,
    texts: usize,
}

impl RenderSink for LogSink {
    fn rect(&mut self, _top_left: [f32; 2], _bottom_right: [f32; 2], _color: Color) {
        self.rects += 1;
    }

    fn text(&mut self, _text: &str, _position: [f32; 2], _color: Color) {
        self.texts += 1;
    }

    fn present(&mut self, image: &ImageData) {
        tracing::debug!(
            width = image.width,
            height = image.height,
            rects = self.rects,
            texts = self.texts,
            "frame presented"
        );
        self.rects = 0;
        self.texts = 0;
    }

    fn close(&mut self) {
        tracing::info!("render sink closed");
    }
}

pub const OVERLAY: &str = "overlay";

const EXPECTED: [&str; 1] = [CHAIN_DISTANCE];

/// Draws each detection's bounding box (color cycled by object id), its label
/// and its chain distance, then presents the frame.
pub struct OverlayActor {
    sink: Box<dyn RenderSink>,
    values: ValueCache,
}

impl OverlayActor {
    pub fn new(sink: Box<dyn RenderSink>) -> Self {
        Self {
            sink,
            values: ValueCache::new(),
        }
    }
}

impl Actor for OverlayActor {
    fn label(&self) -> &str {
        OVERLAY
    }

    fn expected_labels(&self) -> &[&'static str] {
        &EXPECTED
    }

    fn supply(&mut self, label: &str, value: Value) {
        self.values.insert(label, value);
    }

    fn update(&mut self, frame: &Frame) {
        let distances = match self.values.demand(OVERLAY, CHAIN_DISTANCE) {
            Value::Series(distances) => distances.clone(),
            other => panic!("'{CHAIN_DISTANCE}' must be a series, got {other:?}"),
        };

        for (object, distance) in frame.objects.iter().zip(distances) {
            let color = color_for_id(object.id);
            self.sink.rect(
                object.bounding_box.top_left,
                object.bounding_box.bottom_right,
                color,
            );

            let [x, y] = object.bounding_box.top_left;
            self.sink.text(&object.label, [x, y - 30.0], WHITE);
            self.sink.text(&format!("{distance:.2} m"), [x, y - 10.0], WHITE);
        }

        self.sink.present(&frame.image);
    }

    fn stop(&mut self) {
        self.sink.close();
    }
}
