/// Image payload of a single capture cycle. The synthetic driver delivers
/// frames with an empty pixel buffer; a real driver fills it.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: Vec::new(),
        }
    }
}

/// Axis-aligned 2-D box in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub top_left: [f32; 2],
    pub bottom_right: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct DetectedObject {
    pub id: u32,
    pub label: String,
    pub bounding_box: BoundingBox,
    /// 3-D position in meters, camera at the origin.
    pub position: [f32; 3],
}

/// One capture cycle: image plus the detected objects, in the order the
/// device reported them. Delivered read-only, consumed within one iteration.
#[derive(Debug, Clone)]
pub struct Frame {
    pub sequence: u64,
    pub image: ImageData,
    pub objects: Vec<DetectedObject>,
}
