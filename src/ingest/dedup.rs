// src/ingest/dedup.rs
use std::collections::HashSet;

/// Seen-URL set scoping deduplication to one harvest session.
///
/// Owned exclusively by a single scraper instance; the set lives exactly as
/// long as one "collect everything for source X" call sequence and is never
/// shared across concurrent units of work, so no locking is needed.
#[derive(Debug, Default)]
pub struct UrlDedup {
    seen: HashSet<String>,
}

impl UrlDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url`; returns `true` if it was not seen before in this session.
    pub fn record(&mut self, url: &str) -> bool {
        self.seen.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_record_of_same_url_is_rejected() {
        let mut dedup = UrlDedup::new();
        assert!(dedup.record("https://example.test/a"));
        assert!(!dedup.record("https://example.test/a"));
        assert!(dedup.record("https://example.test/b"));
        assert_eq!(dedup.len(), 2);
    }
}
