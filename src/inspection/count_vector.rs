//! Per-frame topping tallies, index-aligned with a `CategorySet`.

/// How many objects of each category are visible in one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CountVector(Vec<u32>);

impl CountVector {
    /// All-zero vector with one slot per category.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    /// Number of category slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the vector has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when no topping of any category is visible.
    pub fn is_clear(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// True if any category holds fewer objects here than in `previous`.
    ///
    /// Both vectors must have the same length.
    pub fn any_decrease_from(&self, previous: &CountVector) -> bool {
        previous.0.iter().zip(&self.0).any(|(prev, cur)| prev > cur)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.0.iter()
    }

    pub(crate) fn increment(&mut self, index: usize) {
        self.0[index] += 1;
    }
}

impl From<Vec<u32>> for CountVector {
    fn from(counts: Vec<u32>) -> Self {
        Self(counts)
    }
}

impl<const N: usize> From<[u32; N]> for CountVector {
    fn from(counts: [u32; N]) -> Self {
        Self(counts.to_vec())
    }
}
