//! InspectionPipeline: the per-frame loop combining counting with transit tracking.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use super::{Frame, InferenceResult, VerdictSink, VisionSource};
use crate::config::InspectionConfig;
use crate::error::{InspectError, RunError};
use crate::inspection::{Detection, FrameCounter, TransitTracker, Verdict};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The vision source produced no more frames
    Exhausted,
    /// The cancel flag was raised between frames
    Cancelled,
}

/// Totals for one run of the frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames received from the source
    pub frames: u64,
    /// Frames dropped for carrying an unknown label
    pub rejected_frames: u64,
    /// Pizzas classified `Ok`
    pub ok: u64,
    /// Pizzas classified `Bad`
    pub bad: u64,
    pub stop: StopReason,
}

/// Frame Counter plus Transit Tracker for a single camera lane.
pub struct InspectionPipeline {
    counter: FrameCounter,
    tracker: TransitTracker,
    frame_interval: Duration,
    strict: bool,
}

impl InspectionPipeline {
    /// Validate `config` and build the counter and tracker for one lane.
    pub fn new(config: &InspectionConfig) -> Result<Self, InspectError> {
        config.validate()?;
        let categories = Arc::new(config.category_set()?);
        Ok(Self {
            counter: FrameCounter::new(Arc::clone(&categories)),
            tracker: TransitTracker::new(categories, config.good_vector())?,
            frame_interval: config.frame_interval(),
            strict: config.strict,
        })
    }

    /// Count one frame's detections and advance the tracker.
    ///
    /// An unknown label rejects the whole frame and leaves the tracker untouched.
    pub fn process_detections(
        &mut self,
        detections: &[Detection],
    ) -> Result<Option<Verdict>, InspectError> {
        let counts = self.counter.count(detections)?;
        debug!(counts = ?counts.as_slice(), phase = ?self.tracker.phase(), "frame counts");
        Ok(self.tracker.observe(counts))
    }

    /// Process a frame from a vision source.
    ///
    /// Classification-only results are logged and do not affect tracking.
    pub fn process_frame(&mut self, frame: &Frame) -> Result<Option<Verdict>, InspectError> {
        match &frame.result {
            InferenceResult::BoundingBoxes(detections) => self.process_detections(detections),
            InferenceResult::Classification(scores) => {
                info!(
                    frame = frame.index,
                    ms = frame.timing.total_ms(),
                    scores = ?scores,
                    "classification result"
                );
                Ok(None)
            }
        }
    }

    /// Drive the pipeline until the source ends or `cancel` is raised.
    ///
    /// `cancel` is checked before each frame request. A call to
    /// `VisionSource::next_frame` that is already blocked is not interrupted;
    /// callers that need a hard stop must abandon the loop themselves. A pizza
    /// still in view when the loop stops gets no verdict.
    pub fn run<S, K>(
        &mut self,
        source: &mut S,
        sink: &mut K,
        cancel: &AtomicBool,
    ) -> Result<RunSummary, RunError<S::Error>>
    where
        S: VisionSource,
        S::Error: std::error::Error + 'static,
        K: VerdictSink,
    {
        let mut summary = RunSummary {
            frames: 0,
            rejected_frames: 0,
            ok: 0,
            bad: 0,
            stop: StopReason::Exhausted,
        };
        let mut next_due = Instant::now();

        loop {
            let now = Instant::now();
            if next_due > now {
                std::thread::sleep(next_due - now);
            }
            if cancel.load(Ordering::Relaxed) {
                summary.stop = StopReason::Cancelled;
                break;
            }

            let Some(frame) = source.next_frame().map_err(RunError::Source)? else {
                break;
            };
            next_due = Instant::now() + self.frame_interval;
            summary.frames += 1;

            match self.process_frame(&frame) {
                Ok(Some(verdict)) => {
                    if verdict.is_ok() {
                        summary.ok += 1;
                    } else {
                        summary.bad += 1;
                    }
                    sink.emit(&verdict);
                }
                Ok(None) => {}
                Err(source) if self.strict => {
                    return Err(RunError::Inspect {
                        frame: frame.index,
                        source,
                    });
                }
                Err(err) => {
                    summary.rejected_frames += 1;
                    error!(frame = frame.index, error = %err, "frame rejected");
                }
            }
        }

        if self.tracker.has_pizza_in_flight() {
            debug!(
                frame = self.tracker.frame_id(),
                counts = ?self.tracker.previous_counts().as_slice(),
                "dropping in-flight pizza"
            );
        }
        info!(
            frames = summary.frames,
            rejected = summary.rejected_frames,
            ok = summary.ok,
            bad = summary.bad,
            stop = ?summary.stop,
            "inspection run finished"
        );
        Ok(summary)
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &TransitTracker {
        &self.tracker
    }
}
