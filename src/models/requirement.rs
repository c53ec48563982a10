//! Degree requirement categories.
//!
//! A category is a degree bucket ("Major Core", "GE - Written Inquiry")
//! with a credit target. Remaining need is always derived from the
//! stored totals so it cannot drift when in-progress credits change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of degree requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    MajorCore,
    MajorElective,
    #[serde(rename = "ge")]
    GeneralEducation,
    Minor,
    Concentration,
    #[default]
    Other,
}

impl RequirementType {
    /// Short badge label.
    pub fn short_label(self) -> &'static str {
        match self {
            RequirementType::MajorCore => "Core",
            RequirementType::MajorElective => "Elective",
            RequirementType::GeneralEducation => "GE",
            RequirementType::Minor => "Minor",
            RequirementType::Concentration => "Conc",
            RequirementType::Other => "Req",
        }
    }

    /// Wire name ("major_core", "ge", ...).
    pub fn as_str(self) -> &'static str {
        match self {
            RequirementType::MajorCore => "major_core",
            RequirementType::MajorElective => "major_elective",
            RequirementType::GeneralEducation => "ge",
            RequirementType::Minor => "minor",
            RequirementType::Concentration => "concentration",
            RequirementType::Other => "other",
        }
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which sections a category accepts.
///
/// Every populated field must match. An entirely empty criteria matches
/// nothing, so categories without criteria rely on tags declared in the
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchCriteria {
    /// Exact course codes ("CPSC 350"). A lab variant ("350L") matches "350".
    pub courses: Vec<String>,
    /// Accepted subject codes.
    pub subjects: Vec<String>,
    /// Minimum numeric course level (e.g. 500 for graduate work).
    pub min_level: Option<u32>,
    /// Any of these words must appear in the section title.
    pub title_keywords: Vec<String>,
}

impl MatchCriteria {
    /// Whether no field is populated.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
            && self.subjects.is_empty()
            && self.min_level.is_none()
            && self.title_keywords.is_empty()
    }
}

/// A degree-requirement category with its credit progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeRequirementCategory {
    /// Stable key; section tags reference it.
    pub key: String,
    /// Display label.
    pub label: String,
    #[serde(default, rename = "type")]
    pub requirement_type: RequirementType,
    /// Total credits the degree requires in this category.
    pub credits_required: f64,
    /// Credits completed.
    #[serde(default)]
    pub credits_earned: f64,
    /// Credits currently being taken.
    #[serde(default)]
    pub credits_in_progress: f64,
    /// Section acceptance rule, used when tagging a catalog.
    #[serde(default, skip_serializing_if = "MatchCriteria::is_empty")]
    pub criteria: MatchCriteria,
}

impl DegreeRequirementCategory {
    /// Creates a category with nothing earned.
    pub fn new(key: impl Into<String>, label: impl Into<String>, credits_required: f64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            requirement_type: RequirementType::Other,
            credits_required,
            credits_earned: 0.0,
            credits_in_progress: 0.0,
            criteria: MatchCriteria::default(),
        }
    }

    /// Sets the requirement type.
    pub fn with_type(mut self, requirement_type: RequirementType) -> Self {
        self.requirement_type = requirement_type;
        self
    }

    /// Sets earned credits.
    pub fn with_earned(mut self, credits: f64) -> Self {
        self.credits_earned = credits;
        self
    }

    /// Sets in-progress credits.
    pub fn with_in_progress(mut self, credits: f64) -> Self {
        self.credits_in_progress = credits;
        self
    }

    /// Sets the match criteria.
    pub fn with_criteria(mut self, criteria: MatchCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Credits still needed: `max(0, required - earned - in_progress)`.
    pub fn needed(&self) -> f64 {
        (self.credits_required - self.credits_earned - self.credits_in_progress).max(0.0)
    }

    /// Whether nothing more is needed.
    pub fn is_complete(&self) -> bool {
        self.needed() <= f64::EPSILON
    }

    /// Fraction completed (earned + in progress), clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.credits_required <= 0.0 {
            return 1.0;
        }
        ((self.credits_earned + self.credits_in_progress) / self.credits_required).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needed_is_derived() {
        let c = DegreeRequirementCategory::new("core", "Major Core", 30.0)
            .with_earned(18.0)
            .with_in_progress(6.0);
        assert!((c.needed() - 6.0).abs() < 1e-10);

        let bumped = c.clone().with_in_progress(9.0);
        assert!((bumped.needed() - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_needed_clamped_at_zero() {
        let c = DegreeRequirementCategory::new("ge", "GE", 6.0).with_earned(9.0);
        assert_eq!(c.needed(), 0.0);
        assert!(c.is_complete());
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn test_progress() {
        let c = DegreeRequirementCategory::new("minor", "Minor", 20.0).with_earned(5.0);
        assert!((c.progress() - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_requirement_type_wire_names() {
        let t: RequirementType = serde_json::from_str("\"ge\"").unwrap();
        assert_eq!(t, RequirementType::GeneralEducation);
        assert_eq!(
            serde_json::to_string(&RequirementType::MajorElective).unwrap(),
            "\"major_elective\""
        );
        assert_eq!(RequirementType::Concentration.short_label(), "Conc");
    }

    #[test]
    fn test_category_json_defaults() {
        let c: DegreeRequirementCategory = serde_json::from_str(
            r#"{"key": "ethics", "label": "Ethics Core",
                "type": "major_core", "creditsRequired": 3}"#,
        )
        .unwrap();
        assert_eq!(c.requirement_type, RequirementType::MajorCore);
        assert_eq!(c.needed(), 3.0);
        assert!(c.criteria.is_empty());
    }
}
