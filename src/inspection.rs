mod category;
mod count_vector;
mod detection;
mod frame_counter;
mod transit_phase;
mod transit_tracker;
mod verdict;

pub use category::CategorySet;
pub use count_vector::CountVector;
pub use detection::{Detection, Rect};
pub use frame_counter::FrameCounter;
pub use transit_phase::TransitPhase;
pub use transit_tracker::TransitTracker;
pub use verdict::{Classification, Verdict};
