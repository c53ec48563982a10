//! Engine configuration.
//!
//! Limits and institutional defaults, loadable from TOML. Every field has
//! a default so a partial file (or none at all) is valid.
//!
//! ```toml
//! max_page_size = 200
//! default_page_size = 50
//! allow_unscheduled = false
//!
//! [default_credit_range]
//! min = 12.0
//! max = 18.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ScheduleError};
use crate::models::CreditRange;

/// Engine-wide settings shared by search, validation, and generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on `limit` for catalog search.
    pub max_page_size: usize,
    /// `limit` used when a search omits it.
    pub default_page_size: usize,
    /// Credit window for generation when preferences give none.
    pub default_credit_range: CreditRange,
    /// Whether generation may add unscheduled sections for credit.
    pub allow_unscheduled: bool,
    /// Whether generation skips administrative placeholder sections.
    pub exclude_placeholders: bool,
    /// Title fragments marking a placeholder section (lowercase).
    pub placeholder_keywords: Vec<String>,
    /// Weekly work hours at which a flexible student leans toward evening classes.
    pub evening_work_hours: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_page_size: 200,
            default_page_size: 50,
            default_credit_range: CreditRange {
                min: 12.0,
                max: 18.0,
            },
            allow_unscheduled: false,
            exclude_placeholders: true,
            placeholder_keywords: vec![
                "extended continuous enrollment".into(),
                "continuous enrollment".into(),
                "extended enrollment".into(),
            ],
            evening_work_hours: 20,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.max_page_size == 0 {
            return Err(ScheduleError::config("max_page_size must be positive"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ScheduleError::config(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        self.default_credit_range
            .check()
            .map_err(|e| ScheduleError::config(format!("default_credit_range: {e}")))
    }

    /// Whether a title/number marks an administrative placeholder.
    ///
    /// Placeholders are continuous-enrollment style titles and course numbers
    /// ending in `B` (administrative variants such as "698B").
    pub fn is_placeholder(&self, title: &str, number: &str) -> bool {
        let title = title.to_lowercase();
        self.placeholder_keywords
            .iter()
            .any(|k| title.contains(k.as_str()))
            || number.ends_with(['B', 'b'])
    }
}
