//! Conveyor pizza inspection.
//!
//! Per-frame topping detections are tallied by a [`FrameCounter`] and fed to a
//! [`TransitTracker`], which finds the moment each pizza starts leaving the
//! camera view and classifies it against the reference composition.

pub mod config;
pub mod error;
pub mod inspection;
pub mod integration;

pub use config::InspectionConfig;
pub use error::{InspectError, ReplayError, RunError};
pub use inspection::{
    CategorySet, Classification, CountVector, Detection, FrameCounter, Rect, TransitPhase,
    TransitTracker, Verdict,
};
pub use integration::{
    CollectingSink, ConsoleSink, DetectionBuilder, Frame, InferenceResult, InspectionPipeline,
    JsonLinesSource, LogSink, RunSummary, StopReason, Timing, VecSource, VerdictSink,
    VisionSource,
};
