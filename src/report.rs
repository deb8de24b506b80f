// src/report.rs
//! Periodic report assembly: allow-list filtering, collaborator invocation,
//! percentage normalization and calendar completion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::aggregate::{
    fill_category_timeline, fill_event_timeline, hierarchy_to_percentages,
    timeline_to_percentages, to_percentages,
};
use crate::error::ReportError;
use crate::summarize::{DailyAggregate, PeriodicSummarizer, TimelinePoint, Trends};

/// The finished periodic report. `categories_timeline` holds exactly one
/// entry per calendar day in `[start_date, end_date]`, ascending;
/// `event_timeline` likewise has one key per day. All count maps are
/// percentage-normalized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodicReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub main_summary: String,
    pub categories_timeline: Vec<TimelinePoint>,
    pub category_totals: BTreeMap<String, i64>,
    pub trends: Trends,
    pub key_insights: Vec<String>,
    pub source_highlights: BTreeMap<String, String>,
    pub event_timeline: BTreeMap<NaiveDate, String>,
    pub references: BTreeMap<String, Vec<i64>>,
}

/// Build the periodic report for `[start, end]`.
///
/// Daily aggregates are projected onto the allow-lists (pure filtering, no
/// zero-filling) before the collaborator sees them; the draft's counts are
/// then normalized to percentages and both timelines completed into a
/// gap-free calendar range. An inverted range or an empty daily set are the
/// only call-wide failures.
pub async fn build_periodic_report<S>(
    summarizer: &S,
    daily: &[DailyAggregate],
    allowed_sources: &[String],
    allowed_categories: &[String],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PeriodicReport, ReportError>
where
    S: PeriodicSummarizer + ?Sized,
{
    if start > end {
        return Err(ReportError::InvalidRange { start, end });
    }
    if daily.is_empty() {
        return Err(ReportError::NoDailyData);
    }

    let filtered: Vec<DailyAggregate> = daily
        .iter()
        .map(|day| day.filtered(allowed_sources, allowed_categories))
        .collect();

    let draft = summarizer
        .summarize_period(&filtered, start, end)
        .await
        .map_err(ReportError::Summarizer)?;

    let categories_timeline = fill_category_timeline(
        &timeline_to_percentages(&draft.categories_timeline),
        start,
        end,
        allowed_categories,
    );
    let event_timeline = fill_event_timeline(&draft.event_timeline, start, end);

    Ok(PeriodicReport {
        start_date: start,
        end_date: end,
        main_summary: draft.main_summary,
        categories_timeline,
        category_totals: to_percentages(&draft.category_totals),
        trends: draft.trends,
        key_insights: draft.key_insights,
        source_highlights: draft.source_highlights,
        event_timeline,
        references: draft.references,
    })
}

/// One day of the recent-daily dashboard view: present days carry their
/// summaries and percentage-normalized per-source categories, absent days a
/// placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyOverview {
    pub date: NaiveDate,
    pub has_data: bool,
    pub summaries: crate::aggregate::Hierarchy<String>,
    pub categories: crate::aggregate::Hierarchy<i64>,
}

/// Walk the trailing `days`-day window ending at `end`, newest first,
/// synthesizing `has_data = false` placeholders for days without an
/// aggregate.
pub fn recent_overview(
    daily_by_date: &BTreeMap<NaiveDate, DailyAggregate>,
    end: NaiveDate,
    days: u32,
) -> Vec<DailyOverview> {
    let mut out = Vec::with_capacity(days as usize);
    let mut current = end;
    for _ in 0..days {
        match daily_by_date.get(&current) {
            Some(day) => out.push(DailyOverview {
                date: current,
                has_data: true,
                summaries: day.summaries.clone(),
                categories: hierarchy_to_percentages(&day.categories),
            }),
            None => out.push(DailyOverview {
                date: current,
                has_data: false,
                summaries: Default::default(),
                categories: Default::default(),
            }),
        }
        let Some(prev) = current.pred_opt() else {
            break;
        };
        current = prev;
    }
    out
}

/// Swap per-source article-id reference lists for URLs using a
/// caller-supplied lookup (persistence stays outside this crate). Unknown
/// ids are dropped with a warning.
pub fn resolve_references(
    references: &BTreeMap<String, Vec<i64>>,
    id_to_url: &BTreeMap<i64, String>,
) -> BTreeMap<String, Vec<String>> {
    references
        .iter()
        .map(|(source, ids)| {
            let urls = ids
                .iter()
                .filter_map(|id| match id_to_url.get(id) {
                    Some(url) => Some(url.clone()),
                    None => {
                        tracing::warn!(source = %source, id, "reference id has no known url");
                        None
                    }
                })
                .collect();
            (source.clone(), urls)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::SourceDaySummary;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn aggregate(date: NaiveDate, count: i64) -> DailyAggregate {
        let mut day = DailyAggregate::new(date);
        let mut summary = SourceDaySummary::zero_filled(&["Technology".to_string()]);
        summary.categories.insert("Technology".to_string(), count);
        day.insert_source("Pulse", summary);
        day
    }

    #[test]
    fn recent_overview_walks_newest_first_with_placeholders() {
        let by_date = BTreeMap::from([(d("2026-01-02"), aggregate(d("2026-01-02"), 4))]);
        let out = recent_overview(&by_date, d("2026-01-03"), 3);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].date, d("2026-01-03"));
        assert!(!out[0].has_data);
        assert!(out[1].has_data);
        assert_eq!(out[1].categories["Pulse"]["Technology"], 100);
        assert_eq!(out[2].date, d("2026-01-01"));
        assert!(!out[2].has_data);
    }

    #[test]
    fn references_resolve_known_ids_and_drop_unknown() {
        let references = BTreeMap::from([("Pulse".to_string(), vec![1, 2, 99])]);
        let id_to_url = BTreeMap::from([
            (1, "https://example.test/1".to_string()),
            (2, "https://example.test/2".to_string()),
        ]);
        let out = resolve_references(&references, &id_to_url);
        assert_eq!(
            out["Pulse"],
            vec!["https://example.test/1", "https://example.test/2"]
        );
    }
}
