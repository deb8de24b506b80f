// src/bin/harvest_demo.rs
// One-shot harvest against the configured sources; prints per-source counts.
//
//   NEWSBRIEF_SOURCES_PATH=config/sources.toml cargo run --bin harvest_demo

use std::collections::BTreeMap;

use newsbrief::{Harvester, ScraperRegistry, SourcesConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env in local/dev (credentials by env-var name); no-op elsewhere.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = SourcesConfig::load_default()?;
    let harvester = Harvester::new(ScraperRegistry::with_http(), config);

    let articles = harvester.harvest_all(Some(5)).await?;

    let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
    for article in &articles {
        *per_source.entry(article.source.as_str()).or_default() += 1;
    }
    for (source, count) in &per_source {
        tracing::info!(source, count, "harvested");
    }
    tracing::info!(total = articles.len(), "harvest complete");

    Ok(())
}
