use std::{fmt, str::FromStr};

use crate::memory_sketches::errors::SketchApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchStyle {
    PoliceComposite,
    ChildSketch,
    LineArt,
    PencilSketch,
}

impl SketchStyle {
    pub const ALL: [SketchStyle; 4] = [
        Self::PoliceComposite,
        Self::ChildSketch,
        Self::LineArt,
        Self::PencilSketch,
    ];

    pub fn value(&self) -> &'static str {
        match *self {
            Self::PoliceComposite => "police_composite",
            Self::ChildSketch => "child_sketch",
            Self::LineArt => "line_art",
            Self::PencilSketch => "pencil_sketch",
        }
    }
}

impl FromStr for SketchStyle {
    type Err = SketchApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");

        Self::ALL
            .into_iter()
            .find(|style| style.value() == normalized)
            .ok_or_else(|| SketchApiError::UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for SketchStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
