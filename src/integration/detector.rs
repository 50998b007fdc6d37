//! Trait for the upstream vision pipeline producing per-frame detections.

use std::collections::{BTreeMap, VecDeque};

use crate::inspection::Detection;

/// Output of the vision model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    /// Object detection output; drives counting.
    BoundingBoxes(Vec<Detection>),
    /// Whole-image classification scores per label; logged only.
    Classification(BTreeMap<String, f32>),
}

/// Time spent by the runner on one frame, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    pub dsp: u32,
    pub classification: u32,
}

impl Timing {
    /// Preprocessing plus inference time, clamped at `u32::MAX`.
    pub fn total_ms(&self) -> u32 {
        self.dsp.saturating_add(self.classification)
    }
}

/// One camera frame as delivered by the vision source.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Position in the stream, starting at 0
    pub index: u64,
    pub result: InferenceResult,
    pub timing: Timing,
    /// Raw image bytes for display; not used by inspection
    pub image: Option<Vec<u8>>,
}

impl Frame {
    /// Bounding-box frame with no timing or image attached.
    pub fn detections(index: u64, detections: Vec<Detection>) -> Self {
        Self {
            index,
            result: InferenceResult::BoundingBoxes(detections),
            timing: Timing::default(),
            image: None,
        }
    }
}

/// Lazy, non-restartable stream of inferred frames.
///
/// # Example
///
/// ```ignore
/// use topping_inspect::{Frame, VisionSource};
///
/// struct MyCamera {
///     // Your runner handle here
/// }
///
/// impl VisionSource for MyCamera {
///     type Error = std::io::Error;
///
///     fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
///         // Grab a frame, run inference, return the detections
///         Ok(None)
///     }
/// }
/// ```
pub trait VisionSource {
    /// Error type for capture or inference failures.
    type Error;

    /// Block until the next frame is available.
    ///
    /// `Ok(None)` means the stream has ended.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;
}

/// In-memory source replaying prepared detection lists.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    frames: VecDeque<Frame>,
}

impl VecSource {
    /// Source yielding `frames` in order, then ending.
    pub fn new(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// One bounding-box frame per label list.
    pub fn from_labels<I, F, S>(frames: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(frames.into_iter().enumerate().map(|(i, labels)| {
            Frame::detections(i as u64, labels.into_iter().map(Detection::labelled).collect())
        }))
    }
}

impl VisionSource for VecSource {
    type Error = std::convert::Infallible;

    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
        Ok(self.frames.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_ms_saturates() {
        let timing = Timing {
            dsp: u32::MAX,
            classification: 1,
        };
        assert_eq!(timing.total_ms(), u32::MAX);
        assert_eq!(Timing { dsp: 2, classification: 11 }.total_ms(), 13);
    }

    #[test]
    fn test_vec_source_ends() {
        let mut source = VecSource::from_labels([vec!["mush"], vec![]]);
        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(
            first.result,
            InferenceResult::BoundingBoxes(vec![Detection::labelled("mush")])
        );
        assert_eq!(source.next_frame().unwrap().unwrap().index, 1);
        assert!(source.next_frame().unwrap().is_none());
    }
}
