//! Filtered, paginated catalog search.
//!
//! All filters are conjunctive. The time-window filter uses the same
//! half-open overlap rule as conflict detection: a section matches when any
//! of its slots overlaps `[time_start, time_end)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use tracing::debug;

use super::Catalog;
use crate::config::EngineConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{ClassSection, TimeSlot, Weekday, MINUTES_PER_DAY};

/// Search filters and pagination. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    /// Case-insensitive substring over subject, number, code, title, instructor.
    pub query: Option<String>,
    /// Subject code (case-insensitive equality).
    pub subject: Option<String>,
    /// Section must meet on at least one of these days.
    pub days: BTreeSet<Weekday>,
    /// Window start (minutes from midnight, inclusive).
    pub time_start: Option<i64>,
    /// Window end (minutes from midnight, exclusive).
    pub time_end: Option<i64>,
    /// Minimum credits (inclusive).
    pub credits_min: Option<f64>,
    /// Maximum credits (inclusive).
    pub credits_max: Option<f64>,
    /// Page size; capped at the configured maximum.
    pub limit: Option<i64>,
    /// Number of matches to skip.
    pub offset: Option<i64>,
}

impl SearchParams {
    /// Creates empty params (match everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the subject filter.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Adds a day to the day filter.
    pub fn on_day(mut self, day: Weekday) -> Self {
        self.days.insert(day);
        self
    }

    /// Sets the time window.
    pub fn with_time_window(mut self, start: i64, end: i64) -> Self {
        self.time_start = Some(start);
        self.time_end = Some(end);
        self
    }

    /// Sets the credit range.
    pub fn with_credits(mut self, min: f64, max: f64) -> Self {
        self.credits_min = Some(min);
        self.credits_max = Some(max);
        self
    }

    /// Sets pagination.
    pub fn with_page(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Rejects malformed parameters instead of silently correcting them.
    pub fn check(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.credits_min, self.credits_max) {
            if min > max {
                return Err(ScheduleError::invalid(format!(
                    "creditsMin ({min}) exceeds creditsMax ({max})"
                )));
            }
        }
        for (name, value) in [("creditsMin", self.credits_min), ("creditsMax", self.credits_max)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ScheduleError::invalid(format!(
                        "{name} must be non-negative, got {v}"
                    )));
                }
            }
        }
        for (name, value) in [("limit", self.limit), ("offset", self.offset)] {
            if let Some(v) = value {
                if v < 0 {
                    return Err(ScheduleError::invalid(format!(
                        "{name} must be non-negative, got {v}"
                    )));
                }
            }
        }
        let day = i64::from(MINUTES_PER_DAY);
        for (name, value) in [("timeStart", self.time_start), ("timeEnd", self.time_end)] {
            if let Some(v) = value {
                if !(0..=day).contains(&v) {
                    return Err(ScheduleError::invalid(format!(
                        "{name} must be within 0..={day} minutes, got {v}"
                    )));
                }
            }
        }
        if let (Some(start), Some(end)) = (self.time_start, self.time_end) {
            if start >= end {
                return Err(ScheduleError::invalid(format!(
                    "timeStart ({start}) must be before timeEnd ({end})"
                )));
            }
        }
        Ok(())
    }

    /// The time window, if either bound is set.
    fn time_window(&self) -> Option<TimeSlot> {
        if self.time_start.is_none() && self.time_end.is_none() {
            return None;
        }
        // Bounds were range-checked, so the casts are lossless.
        let start = self.time_start.unwrap_or(0) as u16;
        let end = self.time_end.unwrap_or(i64::from(MINUTES_PER_DAY)) as u16;
        Some(TimeSlot::new(start, end))
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub classes: Vec<ClassSection>,
    /// Total matches before pagination.
    pub total: usize,
    /// Effective page size.
    pub limit: usize,
    pub offset: usize,
}

/// Compiled filter; built once per search.
struct Filter<'p> {
    query: Option<String>,
    subject: Option<String>,
    days: &'p BTreeSet<Weekday>,
    window: Option<TimeSlot>,
    credits_min: Option<f64>,
    credits_max: Option<f64>,
}

impl<'p> Filter<'p> {
    fn new(params: &'p SearchParams) -> Self {
        Self {
            query: params
                .query
                .as_deref()
                .map(|q| q.trim().to_lowercase())
                .filter(|q| !q.is_empty()),
            subject: params
                .subject
                .as_deref()
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty()),
            days: &params.days,
            window: params.time_window(),
            credits_min: params.credits_min,
            credits_max: params.credits_max,
        }
    }

    fn matches(&self, s: &ClassSection) -> bool {
        if let Some(q) = &self.query {
            let haystack = format!(
                "{} {} {} {} {}",
                s.subject,
                s.number,
                s.code(),
                s.title,
                s.instructor
            )
            .to_lowercase();
            if !haystack.contains(q.as_str()) {
                return false;
            }
        }

        if let Some(subject) = &self.subject {
            if !s.subject.eq_ignore_ascii_case(subject) {
                return false;
            }
        }

        if self.credits_min.is_some_and(|min| s.credits < min) {
            return false;
        }
        if self.credits_max.is_some_and(|max| s.credits > max) {
            return false;
        }

        if !self.days.is_empty() && !self.days.iter().any(|&d| s.pattern.meets_on(d)) {
            return false;
        }

        if let Some(window) = &self.window {
            if !s.pattern.iter().any(|(_, slot)| slot.overlaps(window)) {
                return false;
            }
        }

        true
    }
}

pub(super) fn run(
    catalog: &Catalog,
    params: &SearchParams,
    config: &EngineConfig,
) -> Result<SearchResult> {
    params.check()?;

    let limit = params
        .limit
        .map_or(config.default_page_size, |l| l as usize)
        .min(config.max_page_size);
    let offset = params.offset.unwrap_or(0) as usize;

    let filter = Filter::new(params);
    let matched: Vec<&ClassSection> = catalog.iter().filter(|s| filter.matches(s)).collect();
    let total = matched.len();

    let classes = matched
        .into_iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect::<Vec<_>>();

    debug!(total, returned = classes.len(), limit, offset, "catalog search");

    Ok(SearchResult {
        classes,
        total,
        limit,
        offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeeklyPattern;

    fn catalog() -> Catalog {
        let mwf = [Weekday::Mon, Weekday::Wed, Weekday::Fri];
        let tth = [Weekday::Tue, Weekday::Thu];
        Catalog::new(vec![
            ClassSection::new("CPSC-350-01", "CPSC", "350", "01")
                .with_title("Data Structures and Algorithms")
                .with_instructor("Ada Lovelace")
                .with_credits(3.0)
                .with_pattern(WeeklyPattern::new().with_days(&mwf, TimeSlot::hm(9, 0, 9, 50))),
            ClassSection::new("CPSC-350-02", "CPSC", "350", "02")
                .with_title("Data Structures and Algorithms")
                .with_instructor("Alan Turing")
                .with_credits(3.0)
                .with_pattern(WeeklyPattern::new().with_days(&tth, TimeSlot::hm(13, 0, 14, 15))),
            ClassSection::new("MATH-210-01", "MATH", "210", "01")
                .with_title("Linear Algebra")
                .with_credits(4.0)
                .with_pattern(WeeklyPattern::new().with_days(&mwf, TimeSlot::hm(18, 0, 19, 15))),
            ClassSection::new("CPSC-698-01", "CPSC", "698", "01")
                .with_title("Thesis")
                .with_credits(1.0),
        ])
    }

    fn ids(r: &SearchResult) -> Vec<&str> {
        r.classes.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_match_all() {
        let r = catalog().search(&SearchParams::new()).unwrap();
        assert_eq!(r.total, 4);
        assert_eq!(r.limit, 50);
        assert_eq!(r.offset, 0);
    }

    #[test]
    fn test_text_query_case_insensitive() {
        let c = catalog();
        let r = c.search(&SearchParams::new().with_query("TURING")).unwrap();
        assert_eq!(ids(&r), vec!["CPSC-350-02"]);

        let r = c.search(&SearchParams::new().with_query("cpsc 350")).unwrap();
        assert_eq!(r.total, 2);

        let r = c.search(&SearchParams::new().with_query("algebra")).unwrap();
        assert_eq!(ids(&r), vec!["MATH-210-01"]);
    }

    #[test]
    fn test_subject_filter() {
        let r = catalog().search(&SearchParams::new().with_subject("math")).unwrap();
        assert_eq!(ids(&r), vec!["MATH-210-01"]);
    }

    #[test]
    fn test_day_filter() {
        let r = catalog().search(&SearchParams::new().on_day(Weekday::Thu)).unwrap();
        assert_eq!(ids(&r), vec!["CPSC-350-02"]);

        let r = catalog()
            .search(&SearchParams::new().on_day(Weekday::Thu).on_day(Weekday::Fri))
            .unwrap();
        assert_eq!(r.total, 3);
    }

    #[test]
    fn test_time_window_overlap() {
        let c = catalog();
        // 9:30-13:00 overlaps the 9:00 MWF class, touches but misses the 13:00 class
        let r = c.search(&SearchParams::new().with_time_window(570, 780)).unwrap();
        assert_eq!(ids(&r), vec!["CPSC-350-01"]);

        // Only an end bound: everything starting before 10:00
        let r = c
            .search(&SearchParams {
                time_end: Some(600),
                ..SearchParams::new()
            })
            .unwrap();
        assert_eq!(ids(&r), vec!["CPSC-350-01"]);

        // Unscheduled sections never match a time window
        let r = c.search(&SearchParams::new().with_time_window(0, 1440)).unwrap();
        assert!(!ids(&r).contains(&"CPSC-698-01"));
    }

    #[test]
    fn test_credit_range_inclusive() {
        let r = catalog().search(&SearchParams::new().with_credits(3.0, 3.0)).unwrap();
        assert_eq!(r.total, 2);
        let r = catalog().search(&SearchParams::new().with_credits(3.5, 10.0)).unwrap();
        assert_eq!(ids(&r), vec!["MATH-210-01"]);
    }

    #[test]
    fn test_pagination_is_stable() {
        let c = catalog();
        let p1 = c.search(&SearchParams::new().with_page(2, 0)).unwrap();
        let p2 = c.search(&SearchParams::new().with_page(2, 2)).unwrap();
        assert_eq!(p1.total, 4);
        assert_eq!(ids(&p1), vec!["CPSC-350-01", "CPSC-350-02"]);
        assert_eq!(ids(&p2), vec!["CPSC-698-01", "MATH-210-01"]);

        let past_end = c.search(&SearchParams::new().with_page(2, 10)).unwrap();
        assert!(past_end.classes.is_empty());
        assert_eq!(past_end.total, 4);
    }

    #[test]
    fn test_limit_capped() {
        let r = catalog().search(&SearchParams::new().with_page(10_000, 0)).unwrap();
        assert_eq!(r.limit, 200);

        let config = EngineConfig {
            max_page_size: 1,
            default_page_size: 1,
            ..EngineConfig::default()
        };
        let r = catalog().search_with(&SearchParams::new(), &config).unwrap();
        assert_eq!(r.classes.len(), 1);
        assert_eq!(r.total, 4);
    }

    #[test]
    fn test_zero_limit() {
        let r = catalog().search(&SearchParams::new().with_page(0, 0)).unwrap();
        assert!(r.classes.is_empty());
        assert_eq!(r.total, 4);
    }

    #[test]
    fn test_invalid_input() {
        let c = catalog();
        let cases = [
            SearchParams::new().with_credits(5.0, 3.0),
            SearchParams::new().with_page(10, -1),
            SearchParams::new().with_page(-5, 0),
            SearchParams::new().with_time_window(600, 600),
            SearchParams::new().with_time_window(-10, 600),
            SearchParams::new().with_time_window(0, 2000),
            SearchParams {
                credits_min: Some(-1.0),
                ..SearchParams::new()
            },
        ];
        for params in cases {
            assert!(
                matches!(c.search(&params), Err(ScheduleError::InvalidInput { .. })),
                "expected InvalidInput for {params:?}"
            );
        }
    }

    #[test]
    fn test_params_json() {
        let params: SearchParams = serde_json::from_str(
            r#"{"query": "data", "days": ["M", "W"],
                "timeStart": 480, "timeEnd": 720, "limit": 20}"#,
        )
        .unwrap();
        assert_eq!(params.days.len(), 2);
        let r = catalog().search(&params).unwrap();
        assert_eq!(ids(&r), vec!["CPSC-350-01"]);
        assert_eq!(r.limit, 20);
    }
}
