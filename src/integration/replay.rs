//! Replay of recorded runner responses, one JSON object per line.
//!
//! Each line has the shape the Linux runner prints for a frame:
//!
//! ```text
//! {"result":{"bounding_boxes":[{"label":"mush","x":24,"y":40,"width":8,"height":8,"value":0.91}]},"timing":{"dsp":2,"classification":11}}
//! {"result":{"classification":{"mush":0.12,"papri":0.80,"roni":0.08}},"timing":{"dsp":2,"classification":9}}
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use super::{DetectionBuilder, Frame, InferenceResult, Timing, VisionSource};
use crate::error::ReplayError;

#[derive(Debug, Deserialize)]
struct RunnerResponse {
    result: RunnerResult,
    #[serde(default)]
    timing: RunnerTiming,
}

#[derive(Debug, Deserialize)]
struct RunnerResult {
    bounding_boxes: Option<Vec<RunnerBox>>,
    classification: Option<BTreeMap<String, f32>>,
}

#[derive(Debug, Deserialize)]
struct RunnerBox {
    label: String,
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    value: f32,
}

#[derive(Debug, Default, Deserialize)]
struct RunnerTiming {
    #[serde(default)]
    dsp: u32,
    #[serde(default)]
    classification: u32,
}

impl RunnerResponse {
    fn into_frame(self, index: u64) -> Frame {
        // Bounding boxes win when a response carries both.
        let result = match (self.result.bounding_boxes, self.result.classification) {
            (Some(boxes), _) => InferenceResult::BoundingBoxes(
                boxes
                    .into_iter()
                    .map(|b| {
                        DetectionBuilder::new()
                            .label(b.label)
                            .tlwh(b.x, b.y, b.width, b.height)
                            .score(b.value)
                            .build()
                    })
                    .collect(),
            ),
            (None, Some(scores)) => InferenceResult::Classification(scores),
            (None, None) => InferenceResult::BoundingBoxes(Vec::new()),
        };
        Frame {
            index,
            result,
            timing: Timing {
                dsp: self.timing.dsp,
                classification: self.timing.classification,
            },
            image: None,
        }
    }
}

/// `VisionSource` reading runner responses from any buffered reader.
pub struct JsonLinesSource<R> {
    reader: R,
    line: usize,
    next_index: u64,
    buf: String,
}

impl JsonLinesSource<BufReader<File>> {
    /// Replay a recorded file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Replay from any reader, e.g. stdin piped from a live runner.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            next_index: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> VisionSource for JsonLinesSource<R> {
    type Error = ReplayError;

    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = self.buf.trim();
            if text.is_empty() {
                continue;
            }

            let response: RunnerResponse =
                serde_json::from_str(text).map_err(|source| ReplayError::Parse {
                    line: self.line,
                    source,
                })?;
            let frame = response.into_frame(self.next_index);
            self.next_index += 1;
            return Ok(Some(frame));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::Rect;

    #[test]
    fn test_reads_bounding_boxes() {
        let input = concat!(
            r#"{"result":{"bounding_boxes":[{"label":"mush","x":24,"y":40,"width":8,"height":6,"value":0.91}]},"timing":{"dsp":2,"classification":11}}"#,
            "\n\n",
            r#"{"result":{"bounding_boxes":[]}}"#,
            "\n",
        );
        let mut source = JsonLinesSource::new(input.as_bytes());

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.timing.total_ms(), 13);
        let InferenceResult::BoundingBoxes(dets) = first.result else {
            panic!("expected bounding boxes");
        };
        assert_eq!(dets.len(), 1);
        assert_eq!(dets[0].label, "mush");
        assert_eq!(dets[0].bbox, Rect::new(24.0, 40.0, 8.0, 6.0));

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.result, InferenceResult::BoundingBoxes(vec![]));

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_reads_classification() {
        let input = r#"{"result":{"classification":{"mush":0.25,"roni":0.75}}}"#;
        let mut source = JsonLinesSource::new(input.as_bytes());
        let frame = source.next_frame().unwrap().unwrap();
        let InferenceResult::Classification(scores) = frame.result else {
            panic!("expected classification");
        };
        assert_eq!(scores["roni"], 0.75);
    }

    #[test]
    fn test_oversized_timing_does_not_overflow() {
        let input = r#"{"result":{"bounding_boxes":[]},"timing":{"dsp":4294967295,"classification":1}}"#;
        let mut source = JsonLinesSource::new(input.as_bytes());
        let frame = source.next_frame().unwrap().unwrap();
        assert_eq!(frame.timing.total_ms(), u32::MAX);
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let input = "\n{\"result\":{}}\nnot json\n";
        let mut source = JsonLinesSource::new(input.as_bytes());
        assert!(source.next_frame().unwrap().is_some());
        let err = source.next_frame().unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 3, .. }));
    }
}
