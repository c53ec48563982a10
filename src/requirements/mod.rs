//! Requirement matching and progress projection.
//!
//! Maps sections to the degree-requirement categories they satisfy and
//! projects how a selection changes each category's remaining need.
//!
//! # Overlap Policy
//! A section contributes its full credit value to *every* category whose
//! tag it carries. One class can fill several degree buckets at once.

mod matcher;

pub use matcher::RequirementMatcher;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::models::{ClassSection, DegreeRequirementCategory, RequirementType};

/// Remaining need per category key.
pub fn remaining_need(categories: &[DegreeRequirementCategory]) -> BTreeMap<String, f64> {
    categories
        .iter()
        .map(|c| (c.key.clone(), c.needed()))
        .collect()
}

/// Projected effect of a selection on one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryImpact {
    pub key: String,
    pub label: String,
    /// Need before the selection.
    pub needed: f64,
    /// Credits the selection adds to this category.
    pub contributed: f64,
    /// `max(0, needed - contributed)`.
    pub remaining_needed: f64,
}

/// Per-category impact of a selection.
///
/// Ordered with contributing categories first, then by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactReport {
    pub categories: Vec<CategoryImpact>,
}

impl ImpactReport {
    /// Impact entry for a category key.
    pub fn get(&self, key: &str) -> Option<&CategoryImpact> {
        self.categories.iter().find(|c| c.key == key)
    }

    /// Sum of remaining need across categories.
    pub fn total_remaining(&self) -> f64 {
        self.categories.iter().map(|c| c.remaining_needed).sum()
    }

    /// Categories the selection contributes to.
    pub fn contributing(&self) -> impl Iterator<Item = &CategoryImpact> {
        self.categories.iter().filter(|c| c.contributed > 0.0)
    }
}

/// Distinct sections, first occurrence wins.
fn distinct<'a>(sections: &[&'a ClassSection]) -> Vec<&'a ClassSection> {
    let mut seen = HashSet::new();
    sections
        .iter()
        .copied()
        .filter(|s| seen.insert(s.id.as_str()))
        .collect()
}

/// Credits each category receives from the given sections.
fn contributions(sections: &[&ClassSection], categories: &[DegreeRequirementCategory]) -> Vec<f64> {
    let sections = distinct(sections);
    categories
        .iter()
        .map(|c| {
            sections
                .iter()
                .filter(|s| s.satisfies(&c.key))
                .map(|s| s.credits)
                .sum()
        })
        .collect()
}

/// Projects the effect of adding `sections` to the student's progress.
///
/// Duplicate sections (same id) count once. Adding a section never lowers
/// any category's contribution nor raises its remaining need.
pub fn projected_impact(
    sections: &[&ClassSection],
    categories: &[DegreeRequirementCategory],
) -> ImpactReport {
    let contributed = contributions(sections, categories);

    let mut entries: Vec<CategoryImpact> = categories
        .iter()
        .zip(contributed)
        .map(|(c, contributed)| {
            let needed = c.needed();
            CategoryImpact {
                key: c.key.clone(),
                label: c.label.clone(),
                needed,
                contributed,
                remaining_needed: (needed - contributed).max(0.0),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        let a_zero = a.contributed <= 0.0;
        let b_zero = b.contributed <= 0.0;
        a_zero.cmp(&b_zero).then_with(|| a.key.cmp(&b.key))
    });

    ImpactReport { categories: entries }
}

/// Returns new categories with the selection counted as in progress.
///
/// Each category's `needed()` therefore reflects the selection.
pub fn apply_selection(
    sections: &[&ClassSection],
    categories: &[DegreeRequirementCategory],
) -> Vec<DegreeRequirementCategory> {
    let contributed = contributions(sections, categories);
    categories
        .iter()
        .zip(contributed)
        .map(|(c, extra)| {
            let in_progress = c.credits_in_progress + extra;
            c.clone().with_in_progress(in_progress)
        })
        .collect()
}

/// Requirements overview for display (`getUserRequirements`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsSummary {
    /// Number of categories.
    pub total: usize,
    /// Category count per requirement type.
    pub by_type: BTreeMap<RequirementType, usize>,
    pub requirements: Vec<DegreeRequirementCategory>,
}

/// Summarizes categories by type.
pub fn summarize(categories: &[DegreeRequirementCategory]) -> RequirementsSummary {
    let mut by_type = BTreeMap::new();
    for c in categories {
        *by_type.entry(c.requirement_type).or_insert(0) += 1;
    }
    RequirementsSummary {
        total: categories.len(),
        by_type,
        requirements: categories.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequirementTag;
    use proptest::prelude::*;

    fn categories() -> Vec<DegreeRequirementCategory> {
        vec![
            DegreeRequirementCategory::new("major_core", "Major Core", 12.0)
                .with_type(RequirementType::MajorCore)
                .with_earned(6.0),
            DegreeRequirementCategory::new("ge_quant", "GE - Quantitative Inquiry", 3.0)
                .with_type(RequirementType::GeneralEducation),
            DegreeRequirementCategory::new("minor", "Minor", 18.0)
                .with_type(RequirementType::Minor)
                .with_earned(18.0),
        ]
    }

    fn tagged(id: &str, credits: f64, keys: &[&str]) -> ClassSection {
        keys.iter().fold(
            ClassSection::new(id, "MATH", "210", "01").with_credits(credits),
            |s, k| s.with_requirement(RequirementTag::new(*k, *k)),
        )
    }

    #[test]
    fn test_remaining_need() {
        let need = remaining_need(&categories());
        assert_eq!(need["major_core"], 6.0);
        assert_eq!(need["ge_quant"], 3.0);
        assert_eq!(need["minor"], 0.0);
    }

    #[test]
    fn test_overlap_allowed() {
        let s = tagged("A", 3.0, &["major_core", "ge_quant"]);
        let report = projected_impact(&[&s], &categories());
        assert_eq!(report.get("major_core").unwrap().contributed, 3.0);
        assert_eq!(report.get("ge_quant").unwrap().contributed, 3.0);
        assert_eq!(report.get("ge_quant").unwrap().remaining_needed, 0.0);
        assert_eq!(report.get("major_core").unwrap().remaining_needed, 3.0);
    }

    #[test]
    fn test_remaining_clamped() {
        let a = tagged("A", 4.0, &["ge_quant"]);
        let report = projected_impact(&[&a], &categories());
        assert_eq!(report.get("ge_quant").unwrap().remaining_needed, 0.0);
    }

    #[test]
    fn test_ordering_contributors_first() {
        let s = tagged("A", 3.0, &["minor"]);
        let report = projected_impact(&[&s], &categories());
        let keys: Vec<_> = report.categories.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["minor", "ge_quant", "major_core"]);
        assert_eq!(report.contributing().count(), 1);
    }

    #[test]
    fn test_duplicates_count_once() {
        let s = tagged("A", 3.0, &["major_core"]);
        let report = projected_impact(&[&s, &s], &categories());
        assert_eq!(report.get("major_core").unwrap().contributed, 3.0);
    }

    #[test]
    fn test_impact_is_monotonic() {
        let cats = categories();
        let pool = [
            tagged("A", 3.0, &["major_core"]),
            tagged("B", 3.0, &["ge_quant", "major_core"]),
            tagged("C", 4.0, &[]),
            tagged("D", 1.0, &["minor", "ge_quant"]),
        ];
        let mut selected: Vec<&ClassSection> = Vec::new();
        let mut previous = projected_impact(&selected, &cats);
        for s in &pool {
            selected.push(s);
            let next = projected_impact(&selected, &cats);
            for before in &previous.categories {
                let after = next.get(&before.key).unwrap();
                assert!(after.contributed >= before.contributed);
                assert!(after.remaining_needed <= before.remaining_needed);
            }
            previous = next;
        }
    }

    #[test]
    fn test_apply_selection_recomputes_need() {
        let cats = categories();
        let s = tagged("A", 3.0, &["major_core"]);
        let updated = apply_selection(&[&s], &cats);
        assert_eq!(updated[0].credits_in_progress, 3.0);
        assert_eq!(updated[0].needed(), 3.0);
        // Source values untouched
        assert_eq!(cats[0].needed(), 6.0);
    }

    #[test]
    fn test_summary() {
        let summary = summarize(&categories());
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_type[&RequirementType::MajorCore], 1);
        assert_eq!(summary.by_type[&RequirementType::Minor], 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["byType"]["ge"], 1);
        assert_eq!(json["requirements"][0]["creditsRequired"], 12.0);
    }

    const KEYS: [&str; 3] = ["major_core", "ge_quant", "minor"];

    fn arb_sections() -> impl Strategy<Value = Vec<ClassSection>> {
        prop::collection::vec((1u8..=5, 0u8..8), 0..12).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (credits, mask))| {
                    let keys: Vec<&str> = KEYS
                        .iter()
                        .enumerate()
                        .filter(|(k, _)| mask & (1 << k) != 0)
                        .map(|(_, key)| *key)
                        .collect();
                    tagged(&format!("S{i}"), f64::from(credits), &keys)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn test_impact_monotonic_for_any_selection(pool in arb_sections()) {
            let cats = categories();
            let mut selected: Vec<&ClassSection> = Vec::new();
            let mut previous = projected_impact(&selected, &cats);
            for s in &pool {
                selected.push(s);
                let next = projected_impact(&selected, &cats);
                for before in &previous.categories {
                    let after = next.get(&before.key).unwrap();
                    prop_assert!(after.contributed >= before.contributed);
                    prop_assert!(after.remaining_needed <= before.remaining_needed);
                    prop_assert!(after.remaining_needed >= 0.0);
                }
                previous = next;
            }
        }
    }
}
