// src/aggregate/filter.rs
use crate::aggregate::Hierarchy;

/// Project a hierarchy onto allow-lists: sources outside `allowed_sources`
/// are dropped entirely, and within retained sources only
/// `allowed_categories` survive.
///
/// This is a pure projection, not a completion: absent keys stay absent and
/// no key is ever introduced. Output keys ⊆ input keys ∩ allow-lists.
pub fn filter_hierarchy<V: Clone>(
    map: &Hierarchy<V>,
    allowed_sources: &[String],
    allowed_categories: &[String],
) -> Hierarchy<V> {
    map.iter()
        .filter(|(source, _)| allowed_sources.iter().any(|s| s == *source))
        .map(|(source, inner)| {
            let kept = inner
                .iter()
                .filter(|(category, _)| allowed_categories.iter().any(|c| c == *category))
                .map(|(category, value)| (category.clone(), value.clone()))
                .collect();
            (source.clone(), kept)
        })
        .collect()
}
