//! Transit Tracker: detects pizza boundaries across frames and emits verdicts.

use std::sync::Arc;

use tracing::debug;

use crate::error::InspectError;
use crate::inspection::category::CategorySet;
use crate::inspection::count_vector::CountVector;
use crate::inspection::transit_phase::TransitPhase;
use crate::inspection::verdict::Verdict;

/// Cross-frame state for one camera lane.
///
/// Owned by a single frame loop; lanes never share a tracker.
#[derive(Debug, Clone)]
pub struct TransitTracker {
    previous_counts: CountVector,
    phase: TransitPhase,
    good_counts: CountVector,
    categories: Arc<CategorySet>,
    frame_id: u64,
}

impl TransitTracker {
    /// Create a tracker in `MovingIn` with all-zero previous counts.
    ///
    /// `good_counts` must have one entry per category.
    pub fn new(
        categories: Arc<CategorySet>,
        good_counts: CountVector,
    ) -> Result<Self, InspectError> {
        if good_counts.len() != categories.len() {
            return Err(InspectError::InvalidConfig(format!(
                "{} reference counts given for {} categories",
                good_counts.len(),
                categories.len()
            )));
        }
        Ok(Self {
            previous_counts: CountVector::zeros(categories.len()),
            phase: TransitPhase::MovingIn,
            good_counts,
            categories,
            frame_id: 0,
        })
    }

    /// Feed one frame's counts, in arrival order.
    ///
    /// Returns a verdict only on the MovingIn -> MovingOut boundary, judged on
    /// the counts of the frame before the first decrease.
    ///
    /// # Panics
    ///
    /// Panics if `current` does not have one slot per category. Vectors built
    /// by `FrameCounter` for the same `CategorySet` always do.
    pub fn observe(&mut self, current: CountVector) -> Option<Verdict> {
        assert_eq!(
            current.len(),
            self.categories.len(),
            "count vector length does not match the category set"
        );
        self.frame_id += 1;

        let switch = match self.phase {
            TransitPhase::MovingIn => current.any_decrease_from(&self.previous_counts),
            TransitPhase::MovingOut => current.is_clear(),
        };

        let verdict = (switch && self.phase.is_moving_in()).then(|| {
            Verdict::judge(
                self.previous_counts.clone(),
                &self.good_counts,
                Arc::clone(&self.categories),
            )
        });

        if switch {
            let next = self.phase.flipped();
            debug!(frame = self.frame_id, from = ?self.phase, to = ?next, "transit phase switch");
            self.phase = next;
        }

        // Must stay last: an interrupted observe leaves no partial state.
        self.previous_counts = current;
        verdict
    }

    /// Current movement phase.
    pub fn phase(&self) -> TransitPhase {
        self.phase
    }

    /// Counts of the most recently observed frame.
    pub fn previous_counts(&self) -> &CountVector {
        &self.previous_counts
    }

    /// Number of frames observed so far.
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// True while a pizza has been seen entering but has not started leaving.
    pub fn has_pizza_in_flight(&self) -> bool {
        self.phase.is_moving_in() && !self.previous_counts.is_clear()
    }
}
