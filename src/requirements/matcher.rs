//! Derives requirement tags from category match criteria.
//!
//! Catalog data may already carry tags. Categories with [`MatchCriteria`]
//! add tags on top: exact course codes (a lab variant such as "350L" counts
//! for "350"), subject lists, minimum course level, and title keywords.

use crate::catalog::Catalog;
use crate::models::{
    course_level, ClassSection, DegreeRequirementCategory, MatchCriteria, RequirementTag,
};

/// Tags sections with the categories whose criteria they meet.
#[derive(Debug, Clone)]
pub struct RequirementMatcher<'a> {
    categories: &'a [DegreeRequirementCategory],
}

impl<'a> RequirementMatcher<'a> {
    /// Creates a matcher over the given categories.
    pub fn new(categories: &'a [DegreeRequirementCategory]) -> Self {
        Self { categories }
    }

    /// Tags derived for a section from category criteria.
    pub fn derived_tags(&self, section: &ClassSection) -> Vec<RequirementTag> {
        self.categories
            .iter()
            .filter(|c| criteria_match(&c.criteria, section))
            .map(|c| RequirementTag::new(&c.key, &c.label))
            .collect()
    }

    /// A copy of `section` with derived tags added to its declared ones.
    pub fn tag_section(&self, section: &ClassSection) -> ClassSection {
        self.derived_tags(section)
            .into_iter()
            .fold(section.clone(), ClassSection::with_requirement)
    }

    /// Tagged copies of `sections`, in input order.
    pub fn tag_sections(&self, sections: &[ClassSection]) -> Vec<ClassSection> {
        sections.iter().map(|s| self.tag_section(s)).collect()
    }

    /// A copy of the catalog with every section tagged.
    pub fn tag_catalog(&self, catalog: &Catalog) -> Catalog {
        catalog.map_sections(|s| self.tag_section(s))
    }
}

fn criteria_match(criteria: &MatchCriteria, section: &ClassSection) -> bool {
    if criteria.is_empty() {
        return false;
    }

    if !criteria.courses.is_empty()
        && !criteria.courses.iter().any(|c| course_matches(c, section))
    {
        return false;
    }

    if !criteria.subjects.is_empty()
        && !criteria
            .subjects
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&section.subject))
    {
        return false;
    }

    if let Some(min) = criteria.min_level {
        if section.level().map_or(true, |level| level < min) {
            return false;
        }
    }

    if !criteria.title_keywords.is_empty() {
        let title = section.title.to_lowercase();
        if !criteria
            .title_keywords
            .iter()
            .any(|k| title.contains(&k.to_lowercase()))
        {
            return false;
        }
    }

    true
}

/// Whether a course code such as "CPSC 350" names this section's course.
fn course_matches(code: &str, section: &ClassSection) -> bool {
    let mut parts = code.split_whitespace();
    let (Some(subject), Some(number)) = (parts.next(), parts.next()) else {
        return false;
    };
    if !subject.eq_ignore_ascii_case(&section.subject) {
        return false;
    }
    if number.eq_ignore_ascii_case(&section.number) {
        return true;
    }
    match (course_level(number), section.level()) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(key: &str, criteria: MatchCriteria) -> DegreeRequirementCategory {
        DegreeRequirementCategory::new(key, key.to_uppercase(), 3.0).with_criteria(criteria)
    }

    fn section(subject: &str, number: &str, title: &str) -> ClassSection {
        ClassSection::new(format!("{subject}-{number}-01"), subject, number, "01")
            .with_title(title)
            .with_credits(3.0)
    }

    #[test]
    fn test_exact_course_and_lab_variant() {
        let cats = vec![category(
            "core",
            MatchCriteria {
                courses: vec!["CPSC 350".into()],
                ..Default::default()
            },
        )];
        let m = RequirementMatcher::new(&cats);
        assert_eq!(m.derived_tags(&section("CPSC", "350", "DS")).len(), 1);
        assert_eq!(m.derived_tags(&section("CPSC", "350L", "DS Lab")).len(), 1);
        assert!(m.derived_tags(&section("CPSC", "351", "OS")).is_empty());
        assert!(m.derived_tags(&section("MATH", "350", "Analysis")).is_empty());
    }

    #[test]
    fn test_subject_with_level() {
        let cats = vec![category(
            "tech",
            MatchCriteria {
                subjects: vec!["CPSC".into(), "EENG".into()],
                min_level: Some(500),
                ..Default::default()
            },
        )];
        let m = RequirementMatcher::new(&cats);
        assert_eq!(m.derived_tags(&section("EENG", "511", "Signals")).len(), 1);
        assert!(m.derived_tags(&section("CPSC", "350", "DS")).is_empty());
        assert!(m.derived_tags(&section("PHYS", "520", "Quantum")).is_empty());
    }

    #[test]
    fn test_title_keywords() {
        let cats = vec![category(
            "ethics",
            MatchCriteria {
                title_keywords: vec!["Ethics".into()],
                ..Default::default()
            },
        )];
        let m = RequirementMatcher::new(&cats);
        assert_eq!(m.derived_tags(&section("PHIL", "210", "Engineering ethics")).len(), 1);
        assert!(m.derived_tags(&section("PHIL", "110", "Logic")).is_empty());
    }

    #[test]
    fn test_empty_criteria_matches_nothing() {
        let cats = vec![category("other", MatchCriteria::default())];
        let m = RequirementMatcher::new(&cats);
        assert!(m.derived_tags(&section("CPSC", "350", "DS")).is_empty());
    }

    #[test]
    fn test_tag_sections_preserves_order() {
        let cats = vec![category(
            "writing",
            MatchCriteria {
                subjects: vec!["ENG".into()],
                ..Default::default()
            },
        )];
        let input = vec![
            section("MATH", "210", "Linear Algebra"),
            section("ENG", "103", "Writing"),
        ];
        let tagged = RequirementMatcher::new(&cats).tag_sections(&input);
        assert_eq!(tagged[0].id, "MATH-210-01");
        assert!(!tagged[0].satisfies("writing"));
        assert!(tagged[1].satisfies("writing"));
    }

    #[test]
    fn test_tag_catalog_keeps_declared_tags() {
        let cats = vec![category(
            "quant",
            MatchCriteria {
                subjects: vec!["MATH".into()],
                ..Default::default()
            },
        )];
        let declared = section("MATH", "210", "Linear Algebra")
            .with_requirement(RequirementTag::new("major_core", "Major Core"));
        let catalog = Catalog::new(vec![declared, section("ENG", "103", "Writing")]);

        let tagged = RequirementMatcher::new(&cats).tag_catalog(&catalog);
        let math = tagged.get("MATH-210-01").unwrap();
        assert!(math.satisfies("major_core"));
        assert!(math.satisfies("quant"));
        assert!(tagged.get("ENG-103-01").unwrap().requirements.is_empty());
        // Source catalog unchanged
        assert!(!catalog.get("MATH-210-01").unwrap().satisfies("quant"));
    }
}
