// src/harvest.rs
//! Concurrent harvester: one unit of work per configured source, bounded
//! fan-out, per-source failure isolation.

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use metrics::counter;
use std::collections::BTreeMap;

use crate::error::HarvestError;
use crate::ingest::config::{SourceSpec, SourcesConfig};
use crate::ingest::ensure_metrics_described;
use crate::ingest::scrapers::ScraperRegistry;
use crate::ingest::types::CanonicalArticle;
use crate::summarize::{DailyAggregate, DailySummarizer, SourceDaySummary};

/// Bound on concurrent units of work per harvesting call.
pub const HARVEST_CONCURRENCY: usize = 8;

/// Fans work out across the configured sources and joins best-effort
/// results. Built once at startup and passed by reference to call sites.
pub struct Harvester {
    registry: ScraperRegistry,
    config: SourcesConfig,
}

impl Harvester {
    pub fn new(registry: ScraperRegistry, config: SourcesConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &SourcesConfig {
        &self.config
    }

    /// Collect articles from every configured source.
    ///
    /// Each source is one unit of work: a fresh scraper instance (one
    /// harvest session, so URL dedup spans the source's categories), one
    /// `collect(category)` per declared category — or a single whole-feed
    /// `collect()` — each truncated to `limit_per_source`. A failing source
    /// is logged and contributes nothing; siblings are unaffected. Only an
    /// empty configuration fails the whole call.
    pub async fn harvest_all(
        &self,
        limit_per_source: Option<usize>,
    ) -> Result<Vec<CanonicalArticle>, HarvestError> {
        ensure_metrics_described();
        if self.config.is_empty() {
            return Err(HarvestError::NoSources);
        }

        let per_source: Vec<Vec<CanonicalArticle>> = stream::iter(self.config.iter())
            .map(|(name, spec)| self.harvest_source(name, spec, limit_per_source))
            .buffer_unordered(HARVEST_CONCURRENCY)
            .collect()
            .await;

        let articles: Vec<CanonicalArticle> = per_source.into_iter().flatten().collect();
        tracing::info!(count = articles.len(), "harvest_all finished");
        Ok(articles)
    }

    /// One source's unit of work, with the failure isolated here.
    async fn harvest_source(
        &self,
        name: &str,
        spec: &SourceSpec,
        limit: Option<usize>,
    ) -> Vec<CanonicalArticle> {
        match self.try_harvest_source(name, spec, limit).await {
            Ok(articles) => {
                tracing::debug!(source = name, count = articles.len(), "source harvested");
                articles
            }
            Err(e) => {
                tracing::warn!(source = name, error = %e, "source failed; skipping");
                counter!("harvest_source_errors_total").increment(1);
                Vec::new()
            }
        }
    }

    async fn try_harvest_source(
        &self,
        name: &str,
        spec: &SourceSpec,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<CanonicalArticle>> {
        spec.validate(name, None)?;
        let mut scraper = self.registry.build(name, spec)?;

        let mut out = Vec::new();
        if spec.endpoint.categories.is_empty() {
            let mut batch = scraper.collect(None).await?;
            truncate(&mut batch, limit);
            out.extend(batch);
        } else {
            for category in &spec.endpoint.categories {
                let mut batch = scraper.collect(Some(category)).await?;
                truncate(&mut batch, limit);
                out.extend(batch);
            }
        }
        Ok(out)
    }
}

fn truncate(batch: &mut Vec<CanonicalArticle>, limit: Option<usize>) {
    if let Some(limit) = limit {
        batch.truncate(limit);
    }
}

/// Fan the daily per-source summarization out across sources and join the
/// results into one day's aggregate.
///
/// Every source is an independent unit: a summarizer failure — or a source
/// with zero articles — yields the zero-filled per-category fallback, so
/// the three hierarchies keep a uniform shape regardless of partial
/// failure. Results are merged by source name; ordering is not observable.
pub async fn harvest_daily_per_source<S>(
    summarizer: &S,
    articles_by_source: &BTreeMap<String, Vec<CanonicalArticle>>,
    all_categories: &[String],
    date: NaiveDate,
) -> DailyAggregate
where
    S: DailySummarizer + ?Sized,
{
    ensure_metrics_described();

    let results: Vec<(String, SourceDaySummary)> = stream::iter(articles_by_source.iter())
        .map(|(source, articles)| async move {
            if articles.is_empty() {
                tracing::debug!(source = %source, "no articles; zero-filled fallback");
                counter!("daily_fallback_total").increment(1);
                return (source.clone(), SourceDaySummary::zero_filled(all_categories));
            }
            match summarizer
                .summarize_day(source, articles, all_categories, date)
                .await
            {
                Ok(day) => (source.clone(), day),
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "daily summarizer failed; zero-filled fallback");
                    counter!("daily_fallback_total").increment(1);
                    (source.clone(), SourceDaySummary::zero_filled(all_categories))
                }
            }
        })
        .buffer_unordered(HARVEST_CONCURRENCY)
        .collect()
        .await;

    let mut aggregate = DailyAggregate::new(date);
    for (source, day) in results {
        aggregate.insert_source(&source, day);
    }
    aggregate
}
