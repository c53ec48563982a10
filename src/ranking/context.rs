//! Ranking context for rule evaluation.

use std::collections::BTreeMap;

use crate::models::{DegreeRequirementCategory, PreferenceRecord, TimeOfDay};

/// Per-student state passed to ranking rules.
///
/// Built once per generation call from the requirement snapshot and the
/// preference record.
#[derive(Debug, Clone, Default)]
pub struct RankingContext {
    /// Remaining need per category key.
    pub remaining_need: BTreeMap<String, f64>,
    /// Effective time-of-day preference.
    pub time_of_day: TimeOfDay,
    /// Category keys matching the priority focus.
    pub focus_keys: Vec<String>,
    /// Lowercase interest tags.
    pub interests: Vec<String>,
}

impl RankingContext {
    /// Builds a context from categories and preferences.
    ///
    /// The priority focus matches a category by key or by label
    /// (case-insensitive). `evening_work_hours` is the work-week threshold
    /// for the evening bias, see [`PreferenceRecord::effective_time_of_day`].
    pub fn build(
        categories: &[DegreeRequirementCategory],
        preferences: &PreferenceRecord,
        evening_work_hours: u32,
    ) -> Self {
        let focus_keys = match preferences.priority_focus.as_deref().map(str::trim) {
            Some(focus) if !focus.is_empty() => categories
                .iter()
                .filter(|c| {
                    c.key.eq_ignore_ascii_case(focus) || c.label.eq_ignore_ascii_case(focus)
                })
                .map(|c| c.key.clone())
                .collect(),
            _ => Vec::new(),
        };

        Self {
            remaining_need: categories
                .iter()
                .map(|c| (c.key.clone(), c.needed()))
                .collect(),
            time_of_day: preferences.effective_time_of_day(evening_work_hours),
            focus_keys,
            interests: preferences
                .interest_tags
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Sets remaining need for a category.
    pub fn with_need(mut self, key: impl Into<String>, needed: f64) -> Self {
        self.remaining_need.insert(key.into(), needed);
        self
    }

    /// Sets the time-of-day preference.
    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = time_of_day;
        self
    }

    /// Adds a focus category key.
    pub fn with_focus(mut self, key: impl Into<String>) -> Self {
        self.focus_keys.push(key.into());
        self
    }

    /// Adds an interest tag.
    pub fn with_interest(mut self, tag: impl Into<String>) -> Self {
        self.interests.push(tag.into().to_lowercase());
        self
    }
}
