//! Once-per-pizza Ok/Bad classification.

use std::fmt;
use std::sync::Arc;

use crate::inspection::category::CategorySet;
use crate::inspection::count_vector::CountVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Every category matched the reference count exactly
    Ok,
    Bad,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("Ok"),
            Self::Bad => f.write_str("Bad"),
        }
    }
}

/// Classification of one pizza together with the counts it was judged on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub classification: Classification,
    /// Counts of the last frame before the pizza started leaving
    pub counts: CountVector,
    categories: Arc<CategorySet>,
}

impl Verdict {
    /// Compare `counts` against the reference composition element-wise.
    pub fn judge(counts: CountVector, good: &CountVector, categories: Arc<CategorySet>) -> Self {
        let classification = if &counts == good {
            Classification::Ok
        } else {
            Classification::Bad
        };
        Self {
            classification,
            counts,
            categories,
        }
    }

    /// True when the pizza matched the reference composition.
    pub fn is_ok(&self) -> bool {
        self.classification == Classification::Ok
    }

    /// `(name, count)` pairs in category order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, u32)> {
        self.categories
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

/// `Ok: mush: 3, papri: 3, roni: 3`
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.classification)?;
        for (i, (name, count)) in self.entries().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {name}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Arc<CategorySet> {
        Arc::new(CategorySet::new(["mush", "papri", "roni"]).unwrap())
    }

    #[test]
    fn test_exact_match_is_ok() {
        let good = CountVector::from([3, 3, 3]);
        let verdict = Verdict::judge(good.clone(), &good, categories());
        assert!(verdict.is_ok());
        assert_eq!(verdict.to_string(), "Ok: mush: 3, papri: 3, roni: 3");
    }

    #[test]
    fn test_any_difference_is_bad() {
        let good = CountVector::from([3, 3, 3]);
        let verdict = Verdict::judge(CountVector::from([3, 4, 3]), &good, categories());
        assert_eq!(verdict.classification, Classification::Bad);
        assert_eq!(verdict.to_string(), "Bad: mush: 3, papri: 4, roni: 3");
    }
}
