// src/aggregate/percentages.rs
//! Count -> percentage normalization that always sums to exactly 100.

use std::collections::BTreeMap;

use crate::aggregate::Hierarchy;
use crate::summarize::TimelinePoint;

/// Convert a count map to integer percentages summing to exactly 100.
///
/// Rounding is half-up (`f64::round` on non-negative ratios). The rounding
/// residual `100 - Σ` is added to the first key (ascending key order)
/// holding the maximum rounded value, so no other entry is perturbed and
/// ties break deterministically. A zero total maps every key to 0.
///
/// Negative inputs are clamped to zero and logged; they never abort the
/// report.
pub fn to_percentages(counts: &BTreeMap<String, i64>) -> BTreeMap<String, i64> {
    let mut clamped: BTreeMap<String, i64> = BTreeMap::new();
    for (key, &value) in counts {
        if value < 0 {
            tracing::warn!(key = %key, value, "negative count clamped to zero");
        }
        clamped.insert(key.clone(), value.max(0));
    }

    let total: i64 = clamped.values().sum();
    if total == 0 {
        return clamped.keys().map(|k| (k.clone(), 0)).collect();
    }

    let mut percentages: BTreeMap<String, i64> = clamped
        .iter()
        .map(|(key, &value)| {
            let pct = (value as f64 / total as f64 * 100.0).round() as i64;
            (key.clone(), pct)
        })
        .collect();

    let residual: i64 = 100 - percentages.values().sum::<i64>();
    if residual != 0 {
        let max_key = percentages
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(k, _)| k.clone())
            .expect("non-empty map with non-zero total");
        *percentages.get_mut(&max_key).expect("key exists") += residual;
    }

    percentages
}

/// Apply [`to_percentages`] to every source's category-count map.
pub fn hierarchy_to_percentages(categories: &Hierarchy<i64>) -> Hierarchy<i64> {
    categories
        .iter()
        .map(|(source, counts)| (source.clone(), to_percentages(counts)))
        .collect()
}

/// Apply [`to_percentages`] to each day's counts, leaving dates untouched.
pub fn timeline_to_percentages(timeline: &[TimelinePoint]) -> Vec<TimelinePoint> {
    timeline
        .iter()
        .map(|point| TimelinePoint {
            date: point.date,
            counts: to_percentages(&point.counts),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn percentages_sum_to_exactly_100() {
        let out = to_percentages(&counts(&[
            ("Technology", 10),
            ("Politics", 30),
            ("Sport", 60),
        ]));
        assert_eq!(out.values().sum::<i64>(), 100);
        assert!(out["Sport"] >= 60);
    }

    #[test]
    fn residual_goes_to_the_largest_entry_only() {
        // 1/3 each rounds to 33+33+33 = 99; the residual lands on the max.
        let out = to_percentages(&counts(&[("A", 1), ("B", 1), ("C", 1)]));
        assert_eq!(out.values().sum::<i64>(), 100);
        // Tie on the maximum: first key in ascending order wins.
        assert_eq!(out["A"], 34);
        assert_eq!(out["B"], 33);
        assert_eq!(out["C"], 33);
    }

    #[test]
    fn zero_total_maps_every_key_to_zero() {
        let out = to_percentages(&counts(&[("A", 0), ("B", 0)]));
        assert_eq!(out, counts(&[("A", 0), ("B", 0)]));
    }

    #[test]
    fn negative_counts_are_clamped_not_fatal() {
        let out = to_percentages(&counts(&[("A", -5), ("B", 10)]));
        assert_eq!(out["A"], 0);
        assert_eq!(out["B"], 100);
    }

    #[test]
    fn empty_map_stays_empty() {
        assert!(to_percentages(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn hierarchy_conversion_is_per_source() {
        let mut hierarchy = Hierarchy::new();
        hierarchy.insert("Pulse".to_string(), counts(&[("Tech", 1), ("Sport", 3)]));
        hierarchy.insert("Times".to_string(), counts(&[("Tech", 0)]));
        let out = hierarchy_to_percentages(&hierarchy);
        assert_eq!(out["Pulse"].values().sum::<i64>(), 100);
        assert_eq!(out["Times"]["Tech"], 0);
    }

    #[test]
    fn timeline_conversion_keeps_dates() {
        let day = TimelinePoint {
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            counts: counts(&[("Tech", 2), ("Sport", 2)]),
        };
        let out = timeline_to_percentages(&[day.clone()]);
        assert_eq!(out[0].date, day.date);
        assert_eq!(out[0].counts.values().sum::<i64>(), 100);
    }
}
