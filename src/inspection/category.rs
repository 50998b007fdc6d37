//! Ordered topping categories and the label-to-index map built from them.

use std::collections::HashMap;

use crate::error::InspectError;

/// Fixed, ordered list of tracked topping names.
///
/// Index `i` of every count vector refers to `names()[i]`. The lookup table is
/// built once here and reused for every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategorySet {
    /// Build the set and its lookup table.
    ///
    /// Fails on an empty list or a repeated name.
    pub fn new<I, S>(names: I) -> Result<Self, InspectError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(InspectError::InvalidConfig(
                "at least one category is required".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(InspectError::InvalidConfig(format!(
                    "duplicate category {name:?}"
                )));
            }
        }

        Ok(Self { names, index })
    }

    /// Slot of `label` in count vectors.
    pub fn index_of(&self, label: &str) -> Result<usize, InspectError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| InspectError::UnknownCategory {
                label: label.to_string(),
            })
    }

    /// Number of categories, and so the length of every count vector.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Category names in count order.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_follows_configured_order() {
        let categories = CategorySet::new(["mush", "papri", "roni"]).unwrap();
        assert_eq!(categories.len(), 3);
        assert_eq!(categories.index_of("mush").unwrap(), 0);
        assert_eq!(categories.index_of("roni").unwrap(), 2);
        assert_eq!(categories.names()[1], "papri");
    }

    #[test]
    fn test_unknown_label() {
        let categories = CategorySet::new(["mush"]).unwrap();
        let err = categories.index_of("olive").unwrap_err();
        assert!(matches!(err, InspectError::UnknownCategory { label } if label == "olive"));
    }

    #[test]
    fn test_rejects_empty_and_duplicates() {
        assert!(CategorySet::new(Vec::<String>::new()).is_err());
        assert!(matches!(
            CategorySet::new(["mush", "mush"]),
            Err(InspectError::InvalidConfig(_))
        ));
    }
}
