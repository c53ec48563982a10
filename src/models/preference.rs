//! Student scheduling preferences.
//!
//! Every field is optional. A missing field means "no preference" and never
//! removes an otherwise valid section from consideration. The only
//! exclusionary field is `days_to_avoid`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{TimeOfDay, Weekday};
use crate::error::{Result, ScheduleError};

/// Inclusive credit-load window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CreditRange {
    pub min: f64,
    pub max: f64,
}

impl CreditRange {
    /// Creates a window, rejecting negative bounds and `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.check()?;
        Ok(range)
    }

    /// Validates bounds.
    pub fn check(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min < 0.0 || self.max < 0.0 {
            return Err(ScheduleError::invalid(format!(
                "Credit range bounds must be non-negative: [{}, {}]",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(ScheduleError::invalid(format!(
                "Credit range minimum {} exceeds maximum {}",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Whether `credits` lies inside the window.
    pub fn contains(&self, credits: f64) -> bool {
        credits >= self.min - EPSILON && credits <= self.max + EPSILON
    }
}

/// Tolerance for credit comparisons.
pub(crate) const EPSILON: f64 = 1e-9;

/// A student's stated scheduling preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceRecord {
    /// Acceptable total credit load.
    pub credit_range: Option<CreditRange>,
    /// Preferred time-of-day bucket (soft).
    pub time_of_day: Option<TimeOfDay>,
    /// Days on which no class may meet (hard).
    pub days_to_avoid: BTreeSet<Weekday>,
    /// Weekly work hours. Soft signal only.
    pub work_hours_per_week: Option<u32>,
    /// Category key or label to favor.
    pub priority_focus: Option<String>,
    /// Topics of interest, matched against subject and title.
    pub interest_tags: Vec<String>,
}

impl PreferenceRecord {
    /// Creates an empty record (no preferences).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the credit window.
    pub fn with_credit_range(mut self, range: CreditRange) -> Self {
        self.credit_range = Some(range);
        self
    }

    /// Sets the time-of-day preference.
    pub fn with_time_of_day(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    /// Adds a day to avoid.
    pub fn avoiding(mut self, day: Weekday) -> Self {
        self.days_to_avoid.insert(day);
        self
    }

    /// Sets weekly work hours.
    pub fn with_work_hours(mut self, hours: u32) -> Self {
        self.work_hours_per_week = Some(hours);
        self
    }

    /// Sets the priority focus category.
    pub fn with_priority_focus(mut self, focus: impl Into<String>) -> Self {
        self.priority_focus = Some(focus.into());
        self
    }

    /// Adds an interest tag.
    pub fn with_interest(mut self, tag: impl Into<String>) -> Self {
        self.interest_tags.push(tag.into());
        self
    }

    /// Rejects malformed fields (currently only the credit window).
    pub fn check(&self) -> Result<()> {
        match &self.credit_range {
            Some(range) => range.check(),
            None => Ok(()),
        }
    }

    /// Effective time-of-day bias.
    ///
    /// An explicit non-flexible choice wins. Otherwise a heavy work week
    /// (`work_hours_per_week >= evening_work_hours`) leans toward evening.
    pub fn effective_time_of_day(&self, evening_work_hours: u32) -> TimeOfDay {
        match self.time_of_day {
            Some(t) if t != TimeOfDay::Flexible => t,
            _ => match self.work_hours_per_week {
                Some(h) if h >= evening_work_hours => TimeOfDay::Evening,
                _ => TimeOfDay::Flexible,
            },
        }
    }
}
