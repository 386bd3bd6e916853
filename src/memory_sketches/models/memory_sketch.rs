use serde::Serialize;

use super::sketch_reference::SketchReference;

#[derive(Debug, Serialize)]
pub struct MemorySketch {
    pub sketch_url: SketchReference,
    pub backstory: String,
    pub mode: String,
}
