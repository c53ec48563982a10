//! Schedule selections and their validation results.
//!
//! A selection is an ordered list of section ids. Order is kept for the
//! caller's display (color assignment); conflict logic treats it as a set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Weekday;

/// An ordered, caller-owned list of selected section ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleSelection {
    ids: Vec<String>,
}

impl ScheduleSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a selection from ids, preserving order and duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends an id.
    pub fn push(&mut self, id: impl Into<String>) {
        self.ids.push(id.into());
    }

    /// Ids as given, duplicates included.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Ids with later duplicates removed, first-occurrence order kept.
    pub fn unique_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.ids
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Ids that appear more than once, in first-repeat order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.ids
            .iter()
            .map(String::as_str)
            .filter(|id| !seen.insert(*id) && reported.insert(*id))
            .collect()
    }

    /// Number of ids (duplicates included).
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// A time conflict between two sections.
///
/// Each unordered pair is reported once, with `section_id_1 < section_id_2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictInfo {
    pub section_id_1: String,
    pub section_id_2: String,
    /// First day (week order) where the sections overlap.
    pub day: Weekday,
    /// Overlapping interval, e.g. "9:30 AM - 9:50 AM".
    pub time_range: String,
    pub message: String,
}

/// Result of validating a selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// `true` iff there are no conflicts.
    pub valid: bool,
    pub conflicts: Vec<ConflictInfo>,
    /// Credits of every resolved section, unscheduled ones included.
    pub total_credits: f64,
    /// Non-fatal advisories.
    pub warnings: Vec<String>,
    /// Resolved sections with no meeting times (kept off the calendar).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unscheduled: Vec<String>,
}

impl ValidationReport {
    /// Report for an empty selection.
    pub fn empty() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    /// Number of conflicts.
    pub fn conflict_count(&self) -> usize {
        self.conflicts.len()
    }

    /// Conflicts involving a given section.
    pub fn conflicts_for(&self, section_id: &str) -> Vec<&ConflictInfo> {
        self.conflicts
            .iter()
            .filter(|c| c.section_id_1 == section_id || c.section_id_2 == section_id)
            .collect()
    }
}

/// A named, saved schedule as handed to the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSnapshot {
    pub name: String,
    pub class_ids: Vec<String>,
    pub total_credits: f64,
}

impl ScheduleSnapshot {
    /// Builds a snapshot from a selection and its validation report.
    pub fn new(
        name: impl Into<String>,
        selection: &ScheduleSelection,
        report: &ValidationReport,
    ) -> Self {
        Self {
            name: name.into().trim().to_string(),
            class_ids: selection.unique_ids().into_iter().map(String::from).collect(),
            total_credits: report.total_credits,
        }
    }
}
