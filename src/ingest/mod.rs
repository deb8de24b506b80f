// src/ingest/mod.rs
//! Source-ingestion pipeline: canonical article shape, shared candidate
//! validation, per-session URL dedup and the scraper variants.

pub mod config;
pub mod dedup;
pub mod scrapers;
pub mod types;

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

use crate::error::SkipReason;
use crate::ingest::dedup::UrlDedup;
use crate::ingest::types::{CanonicalArticle, RawCandidate};

/// One-time metrics registration (so series show up once an exporter is wired).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "harvest_articles_total",
            "Canonical articles produced by scrapers."
        );
        describe_counter!(
            "harvest_skipped_total",
            "Candidates dropped by validation or session dedup."
        );
        describe_counter!(
            "harvest_source_errors_total",
            "Per-source fetch/parse/config failures isolated by the harvester."
        );
        describe_counter!(
            "daily_fallback_total",
            "Sources that received the zero-filled daily summary fallback."
        );
    });
}

/// Strip HTML tags and entities from scraped text, collapse whitespace, trim.
pub fn clean_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Deduplicate while keeping first-seen order.
fn unique_in_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|c| !c.trim().is_empty() && seen.insert(c.clone()))
        .collect()
}

/// Turn a raw candidate into a canonical article, or say why it was dropped.
///
/// The skip outcome is not an error: callers filter skipped candidates out
/// and the surrounding `collect` call still succeeds. On success the URL is
/// recorded in the session's dedup set before the article is returned.
pub fn validate_candidate(
    raw: RawCandidate,
    source: &str,
    dedup: &mut UrlDedup,
) -> Result<CanonicalArticle, SkipReason> {
    let title = clean_text(raw.title.as_deref().unwrap_or_default());
    if title.is_empty() {
        return Err(SkipReason::MissingTitle);
    }

    let description = clean_text(raw.description.as_deref().unwrap_or_default());
    if description.is_empty() {
        return Err(SkipReason::MissingDescription);
    }

    let url = raw.url.as_deref().unwrap_or_default().trim().to_string();
    if url.is_empty() {
        return Err(SkipReason::MissingUrl);
    }

    let published_at = raw.published_at.ok_or(SkipReason::BadPublicationDate)?;

    if !dedup.record(&url) {
        return Err(SkipReason::DuplicateUrl);
    }

    Ok(CanonicalArticle {
        title,
        description,
        url,
        published_at,
        source: source.to_string(),
        categories: unique_in_order(raw.categories),
    })
}

/// Validate a batch of candidates, logging and counting every skip.
pub(crate) fn validate_all(
    raws: Vec<RawCandidate>,
    source: &str,
    dedup: &mut UrlDedup,
) -> Vec<CanonicalArticle> {
    ensure_metrics_described();
    let mut out = Vec::with_capacity(raws.len());
    for raw in raws {
        match validate_candidate(raw, source, dedup) {
            Ok(article) => out.push(article),
            Err(reason) => {
                tracing::debug!(source, reason = reason.as_str(), "candidate skipped");
                counter!("harvest_skipped_total").increment(1);
            }
        }
    }
    counter!("harvest_articles_total").increment(out.len() as u64);
    out
}
