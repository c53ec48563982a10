//! Catalog ingestion checks.
//!
//! Malformed section data is rejected once, when a catalog is built, so the
//! conflict and generation algorithms can assume well-formed input.
//! Detects:
//! - Empty or duplicate section ids
//! - Negative or non-finite credits
//! - Malformed time slots (`start >= end`, or past midnight)
//! - Out-of-range instructor ratings
//! - Entries that do not deserialize as a section at all
//!
//! Overlapping slots on the same day are legal data (the conflict checks
//! handle them) and are not reported.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::ClassSection;

/// Ingestion result for a batch of sections.
pub type IngestResult = Result<(), Vec<IngestAnomaly>>;

/// A problem found in a catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestAnomaly {
    /// Offending section id (may be empty).
    pub section_id: String,
    /// Anomaly category.
    pub kind: AnomalyKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of ingestion anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Section id is blank.
    MissingId,
    /// Two entries share an id; the later one is dropped.
    DuplicateId,
    /// Credits are negative, NaN, or infinite.
    InvalidCredits,
    /// A slot has `start >= end` or ends after midnight.
    InvalidTimeSlot,
    /// Rating is negative or non-finite.
    InvalidRating,
    /// Raw entry could not be read as a section (wrong types, out-of-range values).
    Unparseable,
}

impl IngestAnomaly {
    pub(crate) fn new(section_id: &str, kind: AnomalyKind, message: impl Into<String>) -> Self {
        Self {
            section_id: section_id.to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// Checks a single section in isolation.
///
/// # Returns
/// Every anomaly found; empty if the section is well-formed.
pub fn check_section(section: &ClassSection) -> Vec<IngestAnomaly> {
    let mut anomalies = Vec::new();
    let id = section.id.as_str();

    if id.trim().is_empty() {
        anomalies.push(IngestAnomaly::new(
            id,
            AnomalyKind::MissingId,
            format!("Section '{}' has no id", section.code()),
        ));
    }

    if !section.credits.is_finite() || section.credits < 0.0 {
        anomalies.push(IngestAnomaly::new(
            id,
            AnomalyKind::InvalidCredits,
            format!("Section '{id}' has invalid credits {}", section.credits),
        ));
    }

    for (day, slot) in section.pattern.iter() {
        if !slot.is_well_formed() {
            anomalies.push(IngestAnomaly::new(
                id,
                AnomalyKind::InvalidTimeSlot,
                format!(
                    "Section '{id}' has malformed slot on {day}: {}..{}",
                    slot.start_minute, slot.end_minute
                ),
            ));
        }
    }

    if let Some(rating) = section.instructor_rating {
        if !rating.is_finite() || rating < 0.0 {
            anomalies.push(IngestAnomaly::new(
                id,
                AnomalyKind::InvalidRating,
                format!("Section '{id}' has invalid instructor rating {rating}"),
            ));
        }
    }

    anomalies
}

/// Splits a batch into well-formed sections and anomalies.
///
/// Sections failing [`check_section`] are dropped. A repeated id keeps the
/// first entry. Every anomaly is logged at `warn`.
pub fn screen_sections(
    sections: impl IntoIterator<Item = ClassSection>,
) -> (Vec<ClassSection>, Vec<IngestAnomaly>) {
    let mut accepted = Vec::new();
    let mut anomalies = Vec::new();
    let mut ids = HashSet::new();

    for section in sections {
        let mut problems = check_section(&section);
        if problems.is_empty() && !ids.insert(section.id.clone()) {
            problems.push(IngestAnomaly::new(
                &section.id,
                AnomalyKind::DuplicateId,
                format!("Duplicate section ID: {}", section.id),
            ));
        }
        if problems.is_empty() {
            accepted.push(section);
            continue;
        }
        for p in &problems {
            warn!(
                section_id = %p.section_id,
                kind = ?p.kind,
                "rejected catalog entry: {}",
                p.message
            );
        }
        anomalies.extend(problems);
    }

    (accepted, anomalies)
}

/// Validates a batch of sections.
///
/// Checks:
/// 1. Every section passes [`check_section`]
/// 2. No two sections share an id
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(anomalies)` with all detected issues.
pub fn validate_sections(sections: &[ClassSection]) -> IngestResult {
    let (_, anomalies) = screen_sections(sections.iter().cloned());
    if anomalies.is_empty() {
        Ok(())
    } else {
        Err(anomalies)
    }
}
