//! Built-in ranking rules.
//!
//! # Categories
//!
//! - **Requirement-driven**: NEAREST_COMPLETION, PRIORITY_FOCUS
//! - **Preference-driven**: TIME_OF_DAY_FIT, INTEREST_MATCH
//! - **Quality**: INSTRUCTOR_RATING
//!
//! # Score Convention
//! All rules return lower scores for sections that should be tried first.

use super::{RankScore, RankingContext, RankingRule};
use crate::models::{ClassSection, EPSILON};

/// Nearest completion first.
///
/// Scores a section by the smallest nonzero remaining need among the
/// categories it satisfies, so nearly finished categories are closed out
/// before large ones. Sections with no needy tag score `f64::MAX`.
#[derive(Debug, Clone, Copy)]
pub struct NearestCompletion;

impl RankingRule for NearestCompletion {
    fn name(&self) -> &'static str {
        "NEAREST_COMPLETION"
    }

    fn evaluate(&self, section: &ClassSection, context: &RankingContext) -> RankScore {
        section
            .requirements
            .iter()
            .filter_map(|tag| context.remaining_need.get(&tag.category_key))
            .copied()
            .filter(|need| *need > EPSILON)
            .fold(f64::MAX, f64::min)
    }

    fn description(&self) -> &'static str {
        "Smallest Remaining Need"
    }
}

/// Preferred time-of-day fit.
///
/// 0 when every meeting starts inside the preferred bucket, 1 otherwise.
/// A flexible preference scores every section 0.
#[derive(Debug, Clone, Copy)]
pub struct TimeOfDayFit;

impl RankingRule for TimeOfDayFit {
    fn name(&self) -> &'static str {
        "TIME_OF_DAY_FIT"
    }

    fn evaluate(&self, section: &ClassSection, context: &RankingContext) -> RankScore {
        if context.time_of_day.fits(&section.pattern) {
            0.0
        } else {
            1.0
        }
    }

    fn description(&self) -> &'static str {
        "Preferred Time Of Day"
    }
}

/// Priority focus category.
///
/// 0 when the section satisfies a focus category, 1 otherwise.
#[derive(Debug, Clone, Copy)]
pub struct PriorityFocus;

impl RankingRule for PriorityFocus {
    fn name(&self) -> &'static str {
        "PRIORITY_FOCUS"
    }

    fn evaluate(&self, section: &ClassSection, context: &RankingContext) -> RankScore {
        if context.focus_keys.iter().any(|k| section.satisfies(k)) {
            0.0
        } else {
            1.0
        }
    }

    fn description(&self) -> &'static str {
        "Priority Focus Category"
    }
}

/// Interest tags.
///
/// Negated count of interest tags found in the section's subject or title.
#[derive(Debug, Clone, Copy)]
pub struct InterestMatch;

impl RankingRule for InterestMatch {
    fn name(&self) -> &'static str {
        "INTEREST_MATCH"
    }

    fn evaluate(&self, section: &ClassSection, context: &RankingContext) -> RankScore {
        if context.interests.is_empty() {
            return 0.0;
        }
        let haystack = format!("{} {}", section.subject, section.title).to_lowercase();
        let hits = context
            .interests
            .iter()
            .filter(|t| haystack.contains(t.as_str()))
            .count();
        -(hits as f64)
    }

    fn description(&self) -> &'static str {
        "Interest Tag Match"
    }
}

/// Highest instructor rating first. Unrated sections score as 0.
#[derive(Debug, Clone, Copy)]
pub struct InstructorRating;

impl RankingRule for InstructorRating {
    fn name(&self) -> &'static str {
        "INSTRUCTOR_RATING"
    }

    fn evaluate(&self, section: &ClassSection, _context: &RankingContext) -> RankScore {
        -section.instructor_rating.unwrap_or(0.0)
    }

    fn description(&self) -> &'static str {
        "Instructor Rating"
    }
}
