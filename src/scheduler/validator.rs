//! Selection validation.
//!
//! # Algorithm
//!
//! 1. De-duplicate the requested ids (first occurrence kept, duplicates warned).
//! 2. Resolve each id against the catalog; unresolved ids become warnings.
//! 3. Test every unordered pair of scheduled sections for overlap.
//! 4. Sum credits and collect advisories.
//!
//! # Complexity
//! O(n² · d · s²) where n=sections, d=shared days, s=slots per day.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::models::{
    ClassSection, ConflictInfo, CreditRange, PreferenceRecord, ScheduleSelection, ValidationReport,
};

/// Validates section selections against a catalog.
///
/// # Example
///
/// ```
/// use course_schedule::catalog::Catalog;
/// use course_schedule::models::{ClassSection, TimeSlot, Weekday, WeeklyPattern};
/// use course_schedule::scheduler::ConflictValidator;
///
/// let mwf = WeeklyPattern::new().with_days(
///     &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
///     TimeSlot::hm(9, 0, 9, 50),
/// );
/// let catalog = Catalog::new(vec![
///     ClassSection::new("A", "CPSC", "350", "01").with_credits(3.0).with_pattern(mwf.clone()),
///     ClassSection::new("B", "MATH", "210", "01").with_credits(3.0).with_pattern(mwf),
/// ]);
///
/// let report = ConflictValidator::new(&catalog).validate(&["A", "B"]);
/// assert!(!report.valid);
/// assert_eq!(report.conflicts.len(), 1);
/// assert_eq!(report.total_credits, 6.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConflictValidator<'a> {
    catalog: &'a Catalog,
    preferences: Option<&'a PreferenceRecord>,
    default_credit_range: CreditRange,
}

impl<'a> ConflictValidator<'a> {
    /// Creates a validator over a catalog snapshot.
    ///
    /// The credit warning uses the default configuration window (12 to 18)
    /// until preferences or a config say otherwise.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            preferences: None,
            default_credit_range: EngineConfig::default().default_credit_range,
        }
    }

    /// Takes the fallback credit window from `config`.
    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.default_credit_range = config.default_credit_range;
        self
    }

    /// Supplies preferences; a preferred credit window overrides the default.
    pub fn with_preferences(mut self, preferences: &'a PreferenceRecord) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Credit window the selection is checked against.
    pub fn credit_window(&self) -> CreditRange {
        self.preferences
            .and_then(|p| p.credit_range)
            .unwrap_or(self.default_credit_range)
    }

    /// Validates a list of section ids.
    pub fn validate<S: AsRef<str>>(&self, ids: &[S]) -> ValidationReport {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();
        let mut warned_duplicate = HashSet::new();
        let mut unique: Vec<&str> = Vec::with_capacity(ids.len());

        for id in ids.iter().map(AsRef::as_ref) {
            if seen.insert(id) {
                unique.push(id);
            } else if warned_duplicate.insert(id) {
                warnings.push(format!("Section {id} was selected more than once"));
            }
        }

        let mut resolved: Vec<&ClassSection> = Vec::with_capacity(unique.len());
        for id in unique {
            match self.catalog.get(id) {
                Some(section) => resolved.push(section),
                None => {
                    warn!(section_id = id, "selected section not in catalog");
                    warnings.push(format!("Section {id} is no longer available"));
                }
            }
        }

        if resolved.is_empty() && warnings.is_empty() {
            return ValidationReport::empty();
        }

        // Canonical order keeps the report independent of input order.
        resolved.sort_by(|a, b| a.id.cmp(&b.id));

        let conflicts = find_conflicts(&resolved);
        let total_credits: f64 = resolved.iter().map(|s| s.credits).sum();
        let unscheduled: Vec<String> = resolved
            .iter()
            .filter(|s| s.is_unscheduled())
            .map(|s| s.id.clone())
            .collect();

        for section in resolved.iter().filter(|s| s.requirements.is_empty()) {
            warnings.push(format!(
                "Section {} does not count toward any degree requirement",
                section.id
            ));
        }

        let range = self.credit_window();
        if !resolved.is_empty() && !range.contains(total_credits) {
            warnings.push(format!(
                "Total credits {total_credits} are outside the recommended range of {} to {}",
                range.min, range.max
            ));
        }

        debug!(
            sections = resolved.len(),
            conflicts = conflicts.len(),
            total_credits,
            warnings = warnings.len(),
            "validated selection"
        );

        ValidationReport {
            valid: conflicts.is_empty(),
            conflicts,
            total_credits,
            warnings,
            unscheduled,
        }
    }

    /// Validates a [`ScheduleSelection`].
    pub fn validate_selection(&self, selection: &ScheduleSelection) -> ValidationReport {
        self.validate(selection.ids())
    }
}

/// Pairwise conflicts among sections already sorted by id.
fn find_conflicts(sections: &[&ClassSection]) -> Vec<ConflictInfo> {
    let mut conflicts = Vec::new();
    for (i, a) in sections.iter().enumerate() {
        for b in &sections[i + 1..] {
            if let Some((day, overlap)) = a.pattern.first_overlap(&b.pattern) {
                conflicts.push(ConflictInfo {
                    section_id_1: a.id.clone(),
                    section_id_2: b.id.clone(),
                    day,
                    time_range: overlap.to_string(),
                    message: format!("{} conflicts with {} on {}", a.code(), b.code(), day.name()),
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RequirementTag, TimeSlot, Weekday, WeeklyPattern};
    use proptest::prelude::*;

    fn mwf(start_hour: u16, start_min: u16, end_hour: u16, end_min: u16) -> WeeklyPattern {
        WeeklyPattern::new().with_days(
            &[Weekday::Mon, Weekday::Wed, Weekday::Fri],
            TimeSlot::hm(start_hour, start_min, end_hour, end_min),
        )
    }

    fn section(id: &str, number: &str, pattern: WeeklyPattern) -> ClassSection {
        ClassSection::new(id, "CPSC", number, "01")
            .with_credits(3.0)
            .with_pattern(pattern)
            .with_requirement(RequirementTag::new("major_core", "Major Core"))
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            section("A", "350", mwf(9, 0, 9, 50)),
            section("B", "351", mwf(9, 30, 10, 20)),
            section("C", "352", mwf(10, 0, 10, 50)),
            section("D", "353", WeeklyPattern::new()),
            ClassSection::new("E", "ART", "100", "01")
                .with_credits(1.0)
                .with_pattern(
                    WeeklyPattern::new().with_slot(Weekday::Sat, TimeSlot::hm(9, 0, 12, 0)),
                ),
        ])
    }

    #[test]
    fn test_empty_selection() {
        let catalog = catalog();
        let report = ConflictValidator::new(&catalog).validate::<&str>(&[]);
        assert_eq!(report, ValidationReport::empty());
        assert!(report.valid);
        assert_eq!(report.total_credits, 0.0);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_overlapping_pair() {
        let catalog = catalog();
        let report = ConflictValidator::new(&catalog).validate(&["A", "B"]);
        assert!(!report.valid);
        assert_eq!(report.conflicts.len(), 1);
        let c = &report.conflicts[0];
        assert_eq!((c.section_id_1.as_str(), c.section_id_2.as_str()), ("A", "B"));
        assert_eq!(c.day, Weekday::Mon);
        assert_eq!(c.time_range, "9:30 AM - 9:50 AM");
        assert_eq!(c.message, "CPSC 350-01 conflicts with CPSC 351-01 on Monday");
        assert_eq!(report.total_credits, 6.0);
    }

    #[test]
    fn test_adjacent_sections_do_not_conflict() {
        let catalog = Catalog::new(vec![
            section("A", "350", mwf(9, 0, 9, 50)),
            section("C", "352", mwf(9, 50, 10, 40)),
        ]);
        let report = ConflictValidator::new(&catalog).validate(&["A", "C"]);
        assert!(report.valid);
        assert!(report.conflicts.is_empty());
        assert_eq!(report.total_credits, 6.0);
    }

    #[test]
    fn test_order_independence() {
        let catalog = catalog();
        let validator = ConflictValidator::new(&catalog);
        let forward = validator.validate(&["A", "B", "C", "D"]);
        let reverse = validator.validate(&["D", "C", "B", "A"]);
        assert_eq!(forward.conflicts, reverse.conflicts);
        assert_eq!(forward.total_credits, reverse.total_credits);
        assert_eq!(forward.valid, reverse.valid);
    }

    #[test]
    fn test_unresolved_and_duplicate_ids() {
        let catalog = catalog();
        let report = ConflictValidator::new(&catalog).validate(&["A", "GONE", "A", "A"]);
        assert!(report.valid);
        assert_eq!(report.total_credits, 3.0);
        assert_eq!(
            report.warnings[..2],
            [
                "Section A was selected more than once".to_string(),
                "Section GONE is no longer available".to_string(),
            ]
        );
        // Plus the light-load advisory
        assert_eq!(report.warnings.len(), 3);
    }

    #[test]
    fn test_unscheduled_counts_credits_without_conflicts() {
        let catalog = catalog();
        let report = ConflictValidator::new(&catalog).validate(&["A", "D"]);
        assert!(report.valid);
        assert_eq!(report.total_credits, 6.0);
        assert_eq!(report.unscheduled, vec!["D".to_string()]);
    }

    #[test]
    fn test_untagged_section_warning() {
        let catalog = catalog();
        let report = ConflictValidator::new(&catalog).validate(&["E"]);
        assert!(report.warnings[0].contains("Section E"));
        assert!(report.warnings[0].contains("degree requirement"));
    }

    #[test]
    fn test_credit_window_warning() {
        let catalog = catalog();
        let prefs = PreferenceRecord::new().with_credit_range(CreditRange { min: 12.0, max: 18.0 });
        let validator = ConflictValidator::new(&catalog).with_preferences(&prefs);

        let report = validator.validate(&["A", "C"]);
        assert!(report.warnings.iter().any(|w| w.contains("outside the recommended range")));

        // No warnings for an empty selection
        assert!(validator.validate::<&str>(&[]).warnings.is_empty());
    }

    #[test]
    fn test_default_credit_window_without_preferences() {
        let sections: Vec<ClassSection> = (0..8)
            .map(|i| {
                let day = Weekday::ALL[i % 5];
                let hour = 8 + (i / 5) as u16 * 2;
                section(
                    &format!("S{i}"),
                    &format!("{}", 400 + i),
                    WeeklyPattern::new().with_slot(day, TimeSlot::hm(hour, 0, hour, 50)),
                )
            })
            .collect();
        let ids: Vec<String> = sections.iter().map(|s| s.id.clone()).collect();
        let catalog = Catalog::new(sections);

        let report = ConflictValidator::new(&catalog).validate(&ids);
        assert!(report.valid);
        assert_eq!(report.total_credits, 24.0);
        assert_eq!(
            report.warnings,
            vec!["Total credits 24 are outside the recommended range of 12 to 18".to_string()]
        );

        let config = EngineConfig {
            default_credit_range: CreditRange { min: 12.0, max: 24.0 },
            ..EngineConfig::default()
        };
        let report = ConflictValidator::new(&catalog).with_config(&config).validate(&ids);
        assert!(report.warnings.is_empty());

        // A preferred window beats the configured one
        let prefs = PreferenceRecord::new().with_credit_range(CreditRange { min: 3.0, max: 9.0 });
        let validator = ConflictValidator::new(&catalog)
            .with_config(&config)
            .with_preferences(&prefs);
        assert_eq!(validator.credit_window().max, 9.0);
        assert_eq!(validator.validate(&ids).warnings.len(), 1);
    }

    #[test]
    fn test_validate_selection_and_json_shape() {
        let catalog = catalog();
        let selection = ScheduleSelection::from_ids(["B", "A"]);
        let report = ConflictValidator::new(&catalog).validate_selection(&selection);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["totalCredits"], 6.0);
        assert_eq!(json["conflicts"][0]["sectionId1"], "A");
        assert_eq!(json["conflicts"][0]["timeRange"], "9:30 AM - 9:50 AM");
        assert!(json.get("unscheduled").is_none());
    }

    fn arb_slots() -> impl Strategy<Value = Vec<(usize, u16, u16)>> {
        prop::collection::vec((0usize..5, 7 * 60u16..20 * 60, 30u16..180), 1..12)
    }

    fn build_catalog(slots: &[(usize, u16, u16)]) -> (Catalog, Vec<String>) {
        let sections: Vec<ClassSection> = slots
            .iter()
            .enumerate()
            .map(|(i, &(day, start, len))| {
                section(
                    &format!("S{i:02}"),
                    &format!("{}", 100 + i),
                    WeeklyPattern::new()
                        .with_slot(Weekday::ALL[day], TimeSlot::new(start, start + len)),
                )
            })
            .collect();
        let ids = sections.iter().map(|s| s.id.clone()).collect();
        (Catalog::new(sections), ids)
    }

    proptest! {
        #[test]
        fn test_validation_order_independent_for_any_selection(
            (slots, order) in arb_slots().prop_flat_map(|slots| {
                let n = slots.len();
                (Just(slots), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
            })
        ) {
            let (catalog, ids) = build_catalog(&slots);
            let shuffled: Vec<&str> = order.iter().map(|&i| ids[i].as_str()).collect();

            let validator = ConflictValidator::new(&catalog);
            let forward = validator.validate(ids.as_slice());
            let permuted = validator.validate(shuffled.as_slice());
            prop_assert_eq!(&forward.conflicts, &permuted.conflicts);
            prop_assert_eq!(forward.total_credits, permuted.total_credits);
            prop_assert_eq!(forward.valid, permuted.valid);

            let mut expected = 0;
            for (i, a) in catalog.iter().enumerate() {
                for b in catalog.sections()[i + 1..].iter() {
                    if a.conflicts_with(b) {
                        expected += 1;
                    }
                }
            }
            prop_assert_eq!(forward.conflicts.len(), expected);
            for c in &forward.conflicts {
                prop_assert!(c.section_id_1 < c.section_id_2);
            }
        }
    }
}
