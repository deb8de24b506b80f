// src/lib.rs
//! # newsbrief
//!
//! Ingestion and aggregation core for a news-summary pipeline: pluggable
//! scrapers over heterogeneous sources (RSS feeds, JSON APIs) with
//! per-session URL dedup, a concurrent harvester with per-source failure
//! isolation, and the aggregation engine that turns per-source/per-category
//! daily summaries into percentage-normalized, gap-free periodic reports.
//!
//! Summarization (LLM), persistence, scheduling and the HTTP surface are
//! external collaborators; see [`summarize`] for their contracts.

pub mod aggregate;
pub mod error;
pub mod harvest;
pub mod ingest;
pub mod report;
pub mod summarize;

// ---- Re-exports for the stable public surface ----
pub use crate::error::{ConfigError, HarvestError, ReportError, ScrapeError, SkipReason};
pub use crate::harvest::{harvest_daily_per_source, Harvester, HARVEST_CONCURRENCY};
pub use crate::ingest::config::{SourceKind, SourceSpec, SourcesConfig};
pub use crate::ingest::scrapers::ScraperRegistry;
pub use crate::ingest::types::{CanonicalArticle, Scraper};
pub use crate::report::{build_periodic_report, PeriodicReport};
pub use crate::summarize::{DailyAggregate, DailySummarizer, PeriodicSummarizer};
