//! Integration layer between the upstream vision pipeline and the inspection core.
//!
//! This module provides the `VisionSource` trait for frame producers, a replay
//! source for recorded runner output, verdict sinks, and the frame loop that
//! ties them to the counter and tracker.

mod builder;
mod detector;
mod pipeline;
mod replay;
mod sink;

pub use builder::DetectionBuilder;
pub use detector::{Frame, InferenceResult, Timing, VecSource, VisionSource};
pub use pipeline::{InspectionPipeline, RunSummary, StopReason};
pub use replay::JsonLinesSource;
pub use sink::{CollectingSink, ConsoleSink, LogSink, VerdictSink};
