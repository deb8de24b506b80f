// src/error.rs
//! Error taxonomy, split by failure scope: per-source scrape and config
//! failures are isolated by the harvester, harvest/report errors fail the
//! whole call, and a [`SkipReason`] is a dropped candidate, not an error.

use chrono::NaiveDate;
use std::fmt::Display;
use thiserror::Error;

/// A whole `collect` call failed for one source.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("malformed payload from {url}: {reason}")]
    Parse { url: String, reason: String },
}

impl ScrapeError {
    pub fn fetch(url: impl Into<String>, reason: impl Display) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(url: impl Into<String>, reason: impl Display) -> Self {
        Self::Parse {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("source {source_name} has no base_url configured")]
    MissingBaseUrl { source_name: String },

    #[error("unknown source {source_name}")]
    UnknownSource { source_name: String },

    #[error("source {source_name} does not declare category {category}")]
    UnknownCategory { source_name: String, category: String },

    #[error("no scraper registered for kind {kind}")]
    UnknownKind { kind: String },

    #[error("cannot read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("cannot parse {path}: {reason}")]
    Format { path: String, reason: String },
}

/// The harvester runs best-effort per source; only this fails the call.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("no sources configured")]
    NoSources,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid period: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("no daily aggregates in the requested period")]
    NoDailyData,

    #[error("periodic summarizer failed: {0}")]
    Summarizer(anyhow::Error),
}

/// Why one candidate was dropped during validation. Skips are counted and
/// logged but never fail the surrounding `collect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingTitle,
    MissingDescription,
    MissingUrl,
    DuplicateUrl,
    BadPublicationDate,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::MissingTitle => "missing_title",
            SkipReason::MissingDescription => "missing_description",
            SkipReason::MissingUrl => "missing_url",
            SkipReason::DuplicateUrl => "duplicate_url",
            SkipReason::BadPublicationDate => "bad_publication_date",
        }
    }
}
