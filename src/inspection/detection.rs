//! Per-frame detections as emitted by the vision model.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as top-left corner plus size.
///
/// Location is carried for logging and display only; counting ignores it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single topping observed in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Category label reported by the model
    pub label: String,
    /// Bounding box in TLWH format
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
}

impl Detection {
    /// Create a new detection from a label, box and score.
    pub fn new(label: impl Into<String>, bbox: Rect, score: f32) -> Self {
        Self {
            label: label.into(),
            bbox,
            score,
        }
    }

    /// Detection with only a label, for sources that carry no geometry.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self::new(label, Rect::default(), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_has_empty_box() {
        let det = Detection::labelled("papri");
        assert_eq!(det.label, "papri");
        assert_eq!(det.bbox, Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(det.score, 1.0);
    }
}
