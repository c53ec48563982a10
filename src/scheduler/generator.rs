//! Requirement-directed greedy schedule generator.
//!
//! # Algorithm
//!
//! 1. Build the candidate pool: scheduled sections that avoid every
//!    `days_to_avoid` day, are not administrative placeholders, and whose
//!    course is not already completed.
//! 2. Order candidates with the ranking engine.
//! 3. Single greedy pass: accept a candidate when credits stay within the
//!    ceiling, it conflicts with nothing accepted so far, and its course is
//!    not already in the schedule.
//! 4. Optionally top up with unscheduled sections (`allow_unscheduled`).
//! 5. An empty result or a total below the credit floor yields no ids and
//!    an explanatory message.
//!
//! # Complexity
//! O(n log n) for ordering plus O(n · k) conflict tests, k = accepted sections.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::models::{
    sections_conflict, ClassSection, CreditRange, DegreeRequirementCategory, PreferenceRecord,
    EPSILON,
};
use crate::ranking::{RankingContext, RankingEngine, TieBreaker};

const NO_SCHEDULE: &str =
    "No classes could be generated; try widening your time-of-day preference or credit range";

/// Input for schedule generation.
///
/// Requirements and preferences are resolved by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    /// Degree-requirement categories with current progress.
    pub categories: Vec<DegreeRequirementCategory>,
    pub preferences: PreferenceRecord,
    /// Course codes already completed ("CPSC 350").
    pub completed_courses: BTreeSet<String>,
}

impl GenerateRequest {
    /// Creates a request for the given categories.
    pub fn new(categories: Vec<DegreeRequirementCategory>) -> Self {
        Self {
            categories,
            ..Self::default()
        }
    }

    /// Sets preferences.
    pub fn with_preferences(mut self, preferences: PreferenceRecord) -> Self {
        self.preferences = preferences;
        self
    }

    /// Marks a course as completed.
    pub fn with_completed(mut self, course_code: impl Into<String>) -> Self {
        self.completed_courses.insert(course_code.into());
        self
    }
}

/// Outcome of generation.
///
/// Infeasibility is a value: `section_ids` is empty and `message` explains why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSchedule {
    #[serde(rename = "classIds", alias = "class_ids")]
    pub section_ids: Vec<String>,
    #[serde(default)]
    pub total_credits: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GeneratedSchedule {
    fn infeasible(message: impl Into<String>) -> Self {
        Self {
            section_ids: Vec::new(),
            total_credits: 0.0,
            message: Some(message.into()),
        }
    }

    /// Whether a schedule was produced.
    pub fn is_empty(&self) -> bool {
        self.section_ids.is_empty()
    }
}

/// Greedy, requirement-directed schedule generator.
///
/// # Example
///
/// ```
/// use course_schedule::catalog::Catalog;
/// use course_schedule::scheduler::{GenerateRequest, ScheduleGenerator};
///
/// let result = ScheduleGenerator::new()
///     .generate(&Catalog::default(), &GenerateRequest::default())
///     .unwrap();
/// assert!(result.section_ids.is_empty());
/// assert!(result.message.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: EngineConfig,
    ranking: RankingEngine,
    seed: Option<u64>,
}

/// Why candidates were dropped from the pool.
#[derive(Debug, Default)]
struct Exclusions {
    avoided_days: usize,
    placeholders: usize,
    completed: usize,
}

impl ScheduleGenerator {
    /// Creates a generator with default configuration and ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the ranking engine.
    pub fn with_ranking(mut self, ranking: RankingEngine) -> Self {
        self.ranking = ranking;
        self
    }

    /// Shuffles ranking ties with a seed, for variety between runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generates a conflict-free schedule.
    ///
    /// # Errors
    /// `InvalidInput` when the preference record is malformed. An infeasible
    /// request is not an error.
    pub fn generate(
        &self,
        catalog: &Catalog,
        request: &GenerateRequest,
    ) -> Result<GeneratedSchedule> {
        let prefs = &request.preferences;
        prefs.check()?;

        if catalog.is_empty() {
            info!("generation skipped: empty catalog");
            return Ok(GeneratedSchedule::infeasible(
                "No classes are available in the catalog",
            ));
        }

        let window = prefs.credit_range.unwrap_or(self.config.default_credit_range);
        let completed: HashSet<String> = request
            .completed_courses
            .iter()
            .map(|c| normalize_course(c))
            .collect();

        let mut exclusions = Exclusions::default();
        let mut scheduled: Vec<&ClassSection> = Vec::new();
        let mut unscheduled: Vec<&ClassSection> = Vec::new();
        for section in catalog {
            if section.pattern.meeting_days().any(|d| prefs.days_to_avoid.contains(&d)) {
                exclusions.avoided_days += 1;
            } else if self.config.exclude_placeholders
                && self.config.is_placeholder(&section.title, &section.number)
            {
                exclusions.placeholders += 1;
            } else if completed.contains(&normalize_course(&section.course_code())) {
                exclusions.completed += 1;
            } else if section.is_unscheduled() {
                unscheduled.push(section);
            } else {
                scheduled.push(section);
            }
        }

        debug!(
            candidates = scheduled.len(),
            unscheduled = unscheduled.len(),
            avoided_days = exclusions.avoided_days,
            placeholders = exclusions.placeholders,
            completed = exclusions.completed,
            "candidate pool built"
        );

        let allow_unscheduled = self.config.allow_unscheduled;
        if scheduled.is_empty() && (!allow_unscheduled || unscheduled.is_empty()) {
            return Ok(GeneratedSchedule::infeasible(no_candidates_message(
                &exclusions,
                prefs,
            )));
        }

        let context =
            RankingContext::build(&request.categories, prefs, self.config.evening_work_hours);
        let mut plan = Plan::new(window);

        for idx in self.rank(&scheduled, &context) {
            plan.offer(scheduled[idx]);
        }
        if allow_unscheduled {
            for idx in self.rank(&unscheduled, &context) {
                plan.offer(unscheduled[idx]);
            }
        }

        if plan.accepted.is_empty() {
            info!("generation produced no sections");
            return Ok(GeneratedSchedule::infeasible(NO_SCHEDULE));
        }
        if plan.total + EPSILON < window.min {
            info!(total_credits = plan.total, floor = window.min, "generation below credit floor");
            return Ok(GeneratedSchedule::infeasible(format!(
                "Only {} credits could be scheduled without conflicts, \
                 below the minimum of {}. {NO_SCHEDULE}",
                plan.total, window.min
            )));
        }

        info!(
            sections = plan.accepted.len(),
            total_credits = plan.total,
            "generated schedule"
        );

        Ok(GeneratedSchedule {
            section_ids: plan.accepted.iter().map(|s| s.id.clone()).collect(),
            total_credits: plan.total,
            message: None,
        })
    }

    fn rank(&self, sections: &[&ClassSection], context: &RankingContext) -> Vec<usize> {
        match self.seed {
            Some(seed) => self
                .ranking
                .clone()
                .with_tie_breaker(TieBreaker::Seeded(seed))
                .sort_indices(sections, context),
            None => self.ranking.sort_indices(sections, context),
        }
    }
}

/// Greedy accumulator.
struct Plan<'a> {
    window: CreditRange,
    accepted: Vec<&'a ClassSection>,
    courses: HashSet<String>,
    total: f64,
}

impl<'a> Plan<'a> {
    fn new(window: CreditRange) -> Self {
        Self {
            window,
            accepted: Vec::new(),
            courses: HashSet::new(),
            total: 0.0,
        }
    }

    /// Accepts `section` if it fits the ceiling, the course is new, and it
    /// conflicts with nothing accepted.
    fn offer(&mut self, section: &'a ClassSection) {
        if self.total + section.credits > self.window.max + EPSILON {
            return;
        }
        let course = normalize_course(&section.course_code());
        if self.courses.contains(&course)
            || self.accepted.iter().any(|a| sections_conflict(a, section))
        {
            return;
        }
        self.courses.insert(course);
        self.total += section.credits;
        self.accepted.push(section);
    }
}

/// Upper-cased, whitespace-collapsed course code.
fn normalize_course(code: &str) -> String {
    code.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

fn no_candidates_message(exclusions: &Exclusions, prefs: &PreferenceRecord) -> String {
    let mut reasons = Vec::new();
    if exclusions.avoided_days > 0 {
        let days: Vec<&str> = prefs.days_to_avoid.iter().map(|d| d.name()).collect();
        reasons.push(format!(
            "{} meet on days you avoid ({})",
            exclusions.avoided_days,
            days.join(", ")
        ));
    }
    if exclusions.placeholders > 0 {
        reasons.push(format!("{} are enrollment placeholders", exclusions.placeholders));
    }
    if exclusions.completed > 0 {
        reasons.push(format!("{} are for courses already completed", exclusions.completed));
    }

    if reasons.is_empty() {
        "No classes with scheduled meeting times are available".to_string()
    } else {
        format!("No eligible classes found: {}", reasons.join("; "))
    }
}
