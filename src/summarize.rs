// src/summarize.rs
//! Contracts for the external summarization collaborators.
//!
//! The LLM side lives outside this crate; these traits and wire shapes are
//! the whole interface. The daily contract must cover every allowed category
//! for a source (empty string / 0 / empty list when nothing matched), which
//! is what keeps the three hierarchies shape-uniform downstream.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::{filter_hierarchy, Hierarchy};
use crate::ingest::types::CanonicalArticle;

/// One source's summary for one day: per-category text, counts and
/// referenced article ids. All three maps share the same category key set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceDaySummary {
    pub summaries: BTreeMap<String, String>,
    pub categories: BTreeMap<String, i64>,
    pub references: BTreeMap<String, Vec<i64>>,
}

impl SourceDaySummary {
    /// The uniform-shape fallback: every allowed category present with
    /// empty string / zero / empty list. Used when a source has no articles
    /// or its summarizer call failed.
    pub fn zero_filled(all_categories: &[String]) -> Self {
        let mut summaries = BTreeMap::new();
        let mut categories = BTreeMap::new();
        let mut references = BTreeMap::new();
        for cat in all_categories {
            summaries.insert(cat.clone(), String::new());
            categories.insert(cat.clone(), 0);
            references.insert(cat.clone(), Vec::new());
        }
        Self {
            summaries,
            categories,
            references,
        }
    }
}

/// One day's aggregate across all sources: three parallel
/// Source -> Category hierarchies plus the day they describe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub summaries: Hierarchy<String>,
    pub categories: Hierarchy<i64>,
    pub references: Hierarchy<Vec<i64>>,
}

impl DailyAggregate {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            summaries: Hierarchy::new(),
            categories: Hierarchy::new(),
            references: Hierarchy::new(),
        }
    }

    /// Merge one source's day summary under `source`.
    pub fn insert_source(&mut self, source: &str, day: SourceDaySummary) {
        self.summaries.insert(source.to_string(), day.summaries);
        self.categories.insert(source.to_string(), day.categories);
        self.references.insert(source.to_string(), day.references);
    }

    /// Project all three hierarchies onto the allow-lists (pure filtering,
    /// no zero-filling).
    pub fn filtered(&self, allowed_sources: &[String], allowed_categories: &[String]) -> Self {
        Self {
            date: self.date,
            summaries: filter_hierarchy(&self.summaries, allowed_sources, allowed_categories),
            categories: filter_hierarchy(&self.categories, allowed_sources, allowed_categories),
            references: filter_hierarchy(&self.references, allowed_sources, allowed_categories),
        }
    }
}

/// A day-bounded timeline entry: per-category counts flattened next to the
/// date, matching the external `{"date": "...", "Technology": 50, ...}` shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counts: BTreeMap<String, i64>,
}

/// Rising / declining / emerging topic lists over a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trends {
    #[serde(default)]
    pub rising: Vec<String>,
    #[serde(default)]
    pub declining: Vec<String>,
    #[serde(default)]
    pub emerging: Vec<String>,
}

/// What the periodic-summary collaborator returns: possibly sparse in both
/// timelines, counts still raw. Normalization and completion happen here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodicSummaryDraft {
    pub main_summary: String,
    #[serde(default)]
    pub categories_timeline: Vec<TimelinePoint>,
    #[serde(default)]
    pub category_totals: BTreeMap<String, i64>,
    #[serde(default)]
    pub trends: Trends,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub source_highlights: BTreeMap<String, String>,
    #[serde(default)]
    pub event_timeline: BTreeMap<NaiveDate, String>,
    #[serde(default)]
    pub references: BTreeMap<String, Vec<i64>>,
}

/// Per-source daily summarization collaborator.
#[async_trait]
pub trait DailySummarizer: Send + Sync {
    /// Summarize one source's articles for one day across the allowed
    /// categories. The result must contain every allowed category.
    async fn summarize_day(
        &self,
        source: &str,
        articles: &[CanonicalArticle],
        all_categories: &[String],
        date: NaiveDate,
    ) -> anyhow::Result<SourceDaySummary>;
}

/// Whole-period summarization collaborator.
#[async_trait]
pub trait PeriodicSummarizer: Send + Sync {
    async fn summarize_period(
        &self,
        daily: &[DailyAggregate],
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<PeriodicSummaryDraft>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_filled_covers_every_category_uniformly() {
        let cats = vec!["Politics".to_string(), "Sport".to_string()];
        let day = SourceDaySummary::zero_filled(&cats);
        for cat in &cats {
            assert_eq!(day.summaries[cat], "");
            assert_eq!(day.categories[cat], 0);
            assert!(day.references[cat].is_empty());
        }
        assert_eq!(day.summaries.len(), day.categories.len());
        assert_eq!(day.categories.len(), day.references.len());
    }

    #[test]
    fn timeline_point_flattens_counts_next_to_date() {
        let point = TimelinePoint {
            date: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            counts: BTreeMap::from([("Technology".to_string(), 50)]),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2026-01-02");
        assert_eq!(json["Technology"], 50);
    }
}
