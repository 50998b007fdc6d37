//! Frame Counter: turns one frame's detections into a count vector.

use std::sync::Arc;

use crate::error::InspectError;
use crate::inspection::category::CategorySet;
use crate::inspection::count_vector::CountVector;
use crate::inspection::detection::Detection;

/// Stateless per-frame tally over a fixed category set.
#[derive(Debug, Clone)]
pub struct FrameCounter {
    categories: Arc<CategorySet>,
}

impl FrameCounter {
    /// Create a counter sharing the lane's category set.
    pub fn new(categories: Arc<CategorySet>) -> Self {
        Self { categories }
    }

    /// Count detections per category.
    ///
    /// Fails on the first label outside the category set; no partial vector
    /// is returned in that case.
    pub fn count(&self, detections: &[Detection]) -> Result<CountVector, InspectError> {
        let mut counts = CountVector::zeros(self.categories.len());
        for det in detections {
            counts.increment(self.categories.index_of(&det.label)?);
        }
        Ok(counts)
    }
}
