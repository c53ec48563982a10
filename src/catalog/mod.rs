//! Catalog index.
//!
//! An immutable snapshot of class sections with id lookup and filtered,
//! paginated search. A catalog is built once from ingested data and passed
//! explicitly to every engine call; nothing is cached across calls.
//!
//! # Ordering
//! Sections are kept sorted by `(subject, number, section, id)` so search
//! pages are stable across calls.

mod search;

pub use search::{SearchParams, SearchResult};

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Result, ScheduleError};
use crate::models::ClassSection;
use crate::validation::{screen_sections, AnomalyKind, IngestAnomaly};

/// Catalog summary (`totalClasses`, `subjects`, `avgCredits`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_classes: usize,
    /// Number of distinct subjects.
    pub subjects: usize,
    /// Mean credits per section, rounded to two decimals. 0 when empty.
    pub avg_credits: f64,
}

/// An immutable, queryable set of class sections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    sections: Vec<ClassSection>,
    index: HashMap<String, usize>,
    anomalies: Vec<IngestAnomaly>,
}

impl Catalog {
    /// Builds a catalog, rejecting malformed sections.
    ///
    /// Sections failing [`check_section`](crate::validation::check_section)
    /// are dropped and recorded as anomalies. A repeated id keeps the first
    /// entry.
    pub fn new(sections: impl IntoIterator<Item = ClassSection>) -> Self {
        Self::build(sections, Vec::new())
    }

    fn build(
        sections: impl IntoIterator<Item = ClassSection>,
        mut anomalies: Vec<IngestAnomaly>,
    ) -> Self {
        let (mut accepted, rejected) = screen_sections(sections);
        anomalies.extend(rejected);

        accepted.sort_by(|a, b| {
            (&a.subject, &a.number, &a.section, &a.id)
                .cmp(&(&b.subject, &b.number, &b.section, &b.id))
        });

        let index = accepted
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        debug!(
            sections = accepted.len(),
            rejected = anomalies.len(),
            "catalog built"
        );

        Self {
            sections: accepted,
            index,
            anomalies,
        }
    }

    /// Builds a catalog from a JSON array of sections.
    ///
    /// Entries are read one at a time: an entry that does not deserialize is
    /// recorded as an [`AnomalyKind::Unparseable`] anomaly and skipped.
    ///
    /// # Errors
    /// `Json` only when the document itself is not a JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let mut sections = Vec::with_capacity(entries.len());
        let mut anomalies = Vec::new();

        for (position, entry) in entries.into_iter().enumerate() {
            let id = entry
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            match serde_json::from_value::<ClassSection>(entry) {
                Ok(section) => sections.push(section),
                Err(e) => {
                    warn!(section_id = %id, position, "unparseable catalog entry: {e}");
                    anomalies.push(IngestAnomaly::new(
                        &id,
                        AnomalyKind::Unparseable,
                        format!("Catalog entry {position} ('{id}') is unreadable: {e}"),
                    ));
                }
            }
        }

        Ok(Self::build(sections, anomalies))
    }

    /// Looks up a section by id.
    pub fn get_by_id(&self, id: &str) -> Result<&ClassSection> {
        self.get(id).ok_or_else(|| ScheduleError::NotFound { id: id.to_string() })
    }

    /// Looks up a section by id, `None` if absent.
    pub fn get(&self, id: &str) -> Option<&ClassSection> {
        self.index.get(id).map(|&i| &self.sections[i])
    }

    /// Stable catalog position of a section.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Whether the id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All sections in stable order.
    pub fn sections(&self) -> &[ClassSection] {
        &self.sections
    }

    /// Iterates sections in stable order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassSection> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Entries rejected during ingestion.
    pub fn anomalies(&self) -> &[IngestAnomaly] {
        &self.anomalies
    }

    /// Sorted unique subject codes.
    pub fn subjects(&self) -> Vec<&str> {
        self.sections
            .iter()
            .map(|s| s.subject.as_str())
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Section count, subject count, and mean credits.
    pub fn stats(&self) -> CatalogStats {
        let total_classes = self.sections.len();
        let avg_credits = if total_classes == 0 {
            0.0
        } else {
            let mean = self.sections.iter().map(|s| s.credits).sum::<f64>() / total_classes as f64;
            (mean * 100.0).round() / 100.0
        };
        CatalogStats {
            total_classes,
            subjects: self.subjects().len(),
            avg_credits,
        }
    }

    /// Searches with default limits.
    pub fn search(&self, params: &SearchParams) -> Result<SearchResult> {
        self.search_with(params, &EngineConfig::default())
    }

    /// Searches using the page limits from `config`.
    pub fn search_with(
        &self,
        params: &SearchParams,
        config: &EngineConfig,
    ) -> Result<SearchResult> {
        search::run(self, params, config)
    }

    /// Returns a catalog whose sections were transformed by `f`.
    ///
    /// Used to attach derived requirement tags without mutating the source.
    pub fn map_sections<F>(&self, f: F) -> Self
    where
        F: FnMut(&ClassSection) -> ClassSection,
    {
        let mut mapped = Self::new(self.sections.iter().map(f));
        let mut anomalies = self.anomalies.clone();
        anomalies.append(&mut mapped.anomalies);
        mapped.anomalies = anomalies;
        mapped
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ClassSection;
    type IntoIter = std::slice::Iter<'a, ClassSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
