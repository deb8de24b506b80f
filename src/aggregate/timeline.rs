// src/aggregate/timeline.rs
//! Calendar completion for sparse date-keyed series.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::summarize::TimelinePoint;

/// Walk every day in `[start, end]` inclusive, ascending.
fn days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Complete a sparse per-day category series into a gap-free range.
///
/// Days present in `sparse` are kept verbatim; missing days are synthesized
/// with every category in `categories` at 0. The output has exactly
/// `(end - start).num_days() + 1` entries, strictly ascending by date.
pub fn fill_category_timeline(
    sparse: &[TimelinePoint],
    start: NaiveDate,
    end: NaiveDate,
    categories: &[String],
) -> Vec<TimelinePoint> {
    let by_date: BTreeMap<NaiveDate, &TimelinePoint> =
        sparse.iter().map(|p| (p.date, p)).collect();

    days(start, end)
        .map(|date| match by_date.get(&date) {
            Some(point) => (*point).clone(),
            None => TimelinePoint {
                date,
                counts: categories.iter().map(|c| (c.clone(), 0)).collect(),
            },
        })
        .collect()
}

/// Complete a sparse per-day event-text map: one key per day in range,
/// missing days get an empty string.
pub fn fill_event_timeline(
    sparse: &BTreeMap<NaiveDate, String>,
    start: NaiveDate,
    end: NaiveDate,
) -> BTreeMap<NaiveDate, String> {
    days(start, end)
        .map(|date| (date, sparse.get(&date).cloned().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn cats() -> Vec<String> {
        vec!["Technology".to_string(), "Politics".to_string()]
    }

    #[test]
    fn gaps_are_zero_filled_and_present_days_kept_verbatim() {
        let sparse = vec![TimelinePoint {
            date: d("2026-01-02"),
            counts: BTreeMap::from([
                ("Technology".to_string(), 50),
                ("Politics".to_string(), 50),
            ]),
        }];
        let out = fill_category_timeline(&sparse, d("2026-01-01"), d("2026-01-03"), &cats());

        assert_eq!(out.len(), 3);
        assert!(out.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(out[0].counts.values().sum::<i64>(), 0);
        assert_eq!(out[1].counts["Technology"], 50);
        assert_eq!(out[2].counts["Politics"], 0);
    }

    #[test]
    fn output_length_is_inclusive_day_count() {
        let out = fill_category_timeline(&[], d("2026-02-26"), d("2026-03-02"), &cats());
        assert_eq!(out.len(), 5); // Feb 26..Mar 2, non-leap year
        assert_eq!(out.first().unwrap().date, d("2026-02-26"));
        assert_eq!(out.last().unwrap().date, d("2026-03-02"));
    }

    #[test]
    fn single_day_range_yields_one_entry() {
        let out = fill_category_timeline(&[], d("2026-01-05"), d("2026-01-05"), &cats());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn event_timeline_has_one_key_per_day() {
        let sparse = BTreeMap::from([(d("2026-01-02"), "rate decision".to_string())]);
        let out = fill_event_timeline(&sparse, d("2026-01-01"), d("2026-01-03"));
        assert_eq!(out.len(), 3);
        assert_eq!(out[&d("2026-01-01")], "");
        assert_eq!(out[&d("2026-01-02")], "rate decision");
        assert_eq!(out[&d("2026-01-03")], "");
    }
}
