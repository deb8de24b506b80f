// src/ingest/types.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ScrapeError;

/// A validated, deduplicated news item, irrespective of the source format.
///
/// Invariants: `title`, `description` and `url` are non-empty; within one
/// harvest session the `url` is unique. `categories` keeps first-seen order
/// with duplicates removed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct CanonicalArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub source: String,
    pub categories: Vec<String>,
}

/// An extracted-but-unchecked candidate, as pulled out of one raw feed item.
/// Turned into a [`CanonicalArticle`] (or skipped) by
/// [`validate_candidate`](crate::ingest::validate_candidate).
#[derive(Debug, Clone, Default)]
pub struct RawCandidate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub categories: Vec<String>,
}

/// One source's scraper. A scraper instance owns its session dedup set, so
/// `collect` takes `&mut self`; the harvester builds a fresh instance per
/// unit of work and never shares one across tasks.
#[async_trait]
pub trait Scraper: Send {
    /// Collect articles for one category, or the whole feed when `None`.
    ///
    /// Fails with [`ScrapeError::Fetch`] on transport problems and
    /// [`ScrapeError::Parse`] on malformed payloads. Individual malformed
    /// or duplicate items are dropped, not errors.
    async fn collect(
        &mut self,
        category: Option<&str>,
    ) -> Result<Vec<CanonicalArticle>, ScrapeError>;

    fn source_name(&self) -> &str;
}
