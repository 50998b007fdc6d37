//! Startup configuration: categories, reference counts and loop pacing.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InspectError;
use crate::inspection::{CategorySet, CountVector};

/// Inspection settings, loadable from TOML.
///
/// ```toml
/// categories = ["mush", "papri", "roni"]
/// good_counts = [3, 3, 3]
/// frame_interval_ms = 100
/// strict = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectionConfig {
    /// Ordered topping names; fixes the index of every count
    pub categories: Vec<String>,
    /// Expected count per category for a conforming pizza
    pub good_counts: Vec<u32>,
    /// Minimum spacing between frame requests; 0 disables pacing
    pub frame_interval_ms: u64,
    /// Abort the run on a frame with an unknown label instead of skipping it
    pub strict: bool,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            categories: vec!["mush".into(), "papri".into(), "roni".into()],
            good_counts: vec![3, 3, 3],
            frame_interval_ms: 100,
            strict: false,
        }
    }
}

impl InspectionConfig {
    /// Parse without validating; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, InspectError> {
        let text = std::fs::read_to_string(path).map_err(|source| InspectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| InspectError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the categories and that there is one reference count per category.
    pub fn validate(&self) -> Result<(), InspectError> {
        self.category_set()?;
        if self.good_counts.len() != self.categories.len() {
            return Err(InspectError::InvalidConfig(format!(
                "good_counts has {} entries but {} categories are configured",
                self.good_counts.len(),
                self.categories.len()
            )));
        }
        Ok(())
    }

    pub fn category_set(&self) -> Result<CategorySet, InspectError> {
        CategorySet::new(self.categories.iter().cloned())
    }

    /// Reference counts as a count vector.
    pub fn good_vector(&self) -> CountVector {
        CountVector::from(self.good_counts.clone())
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}
