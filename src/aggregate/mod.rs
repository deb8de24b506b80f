// src/aggregate/mod.rs
//! Aggregation/normalization engine: hierarchical filtering, percentage
//! normalization and calendar timeline completion.

pub mod filter;
pub mod percentages;
pub mod timeline;

use std::collections::BTreeMap;

/// Two-level Source -> Category -> V mapping, used uniformly for summaries
/// (text), counts and references. BTreeMap keeps iteration deterministic,
/// which the percentage residual tie-break relies on.
pub type Hierarchy<V> = BTreeMap<String, BTreeMap<String, V>>;

pub use filter::filter_hierarchy;
pub use percentages::{hierarchy_to_percentages, timeline_to_percentages, to_percentages};
pub use timeline::{fill_category_timeline, fill_event_timeline};
