//! Class section model.
//!
//! A section is one offered instance of a course for a term: a specific
//! weekly meeting pattern, instructor, and room. Sections are immutable
//! catalog entities; the engine never edits them, it derives new values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Weekday, WeeklyPattern};

/// A degree-requirement category a section counts toward.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementTag {
    /// Category identifier (matches `DegreeRequirementCategory::key`).
    pub category_key: String,
    /// Display label.
    pub category_label: String,
}

impl RequirementTag {
    /// Creates a tag.
    pub fn new(category_key: impl Into<String>, category_label: impl Into<String>) -> Self {
        Self {
            category_key: category_key.into(),
            category_label: category_label.into(),
        }
    }
}

/// A class section offered in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    /// Stable unique identifier (e.g. "CPSC-350-03").
    pub id: String,
    /// Subject code (e.g. "CPSC").
    pub subject: String,
    /// Course number (e.g. "350", "350L").
    pub number: String,
    /// Section code (e.g. "03").
    pub section: String,
    /// Course title.
    #[serde(default)]
    pub title: String,
    /// Credit hours.
    pub credits: f64,
    /// Weekly meeting pattern. Empty = unscheduled.
    #[serde(default)]
    pub pattern: WeeklyPattern,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
    /// Instructor rating, when known.
    #[serde(default)]
    pub instructor_rating: Option<f64>,
    /// Term identifier (e.g. "spring2026").
    #[serde(default)]
    pub term: String,
    /// Requirement categories this section satisfies.
    #[serde(default)]
    pub requirements: BTreeSet<RequirementTag>,
}

impl ClassSection {
    /// Creates a section with no meeting times and zero credits.
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        number: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            number: number.into(),
            section: section.into(),
            title: String::new(),
            credits: 0.0,
            pattern: WeeklyPattern::new(),
            location: String::new(),
            instructor: String::new(),
            instructor_rating: None,
            term: String::new(),
            requirements: BTreeSet::new(),
        }
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the credit count.
    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    /// Sets the weekly pattern.
    pub fn with_pattern(mut self, pattern: WeeklyPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the instructor rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.instructor_rating = Some(rating);
        self
    }

    /// Sets the term.
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Adds a requirement tag.
    pub fn with_requirement(mut self, tag: RequirementTag) -> Self {
        self.requirements.insert(tag);
        self
    }

    /// Whether the section has no meeting times.
    pub fn is_unscheduled(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Course code without section ("CPSC 350").
    pub fn course_code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    /// Display code with section ("CPSC 350-03").
    pub fn code(&self) -> String {
        format!("{} {}-{}", self.subject, self.number, self.section)
    }

    /// Numeric course level ("350L" → 350). `None` if the number has no digits.
    pub fn level(&self) -> Option<u32> {
        course_level(&self.number)
    }

    /// Days this section meets, Monday first.
    pub fn meeting_days(&self) -> Vec<Weekday> {
        self.pattern.meeting_days().collect()
    }

    /// Earliest meeting start in minutes from midnight, any day.
    pub fn earliest_start(&self) -> Option<u16> {
        self.pattern.earliest_start()
    }

    /// Whether the section carries a tag for the given category key.
    pub fn satisfies(&self, category_key: &str) -> bool {
        self.requirements
            .iter()
            .any(|t| t.category_key == category_key)
    }

    /// Whether this section's meetings overlap `other`'s on any shared day.
    ///
    /// Unscheduled sections never conflict.
    pub fn conflicts_with(&self, other: &ClassSection) -> bool {
        self.pattern.conflicts_with(&other.pattern)
    }
}

/// Whether two sections have a time conflict.
///
/// True iff there is a shared day where some slot of `x` overlaps some slot
/// of `y` (half-open). A section with an empty pattern never conflicts.
pub fn sections_conflict(x: &ClassSection, y: &ClassSection) -> bool {
    x.conflicts_with(y)
}

/// Leading numeric value of a course number ("101L" → 101, "698B" → 698).
pub(crate) fn course_level(number: &str) -> Option<u32> {
    let digits: String = number
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
