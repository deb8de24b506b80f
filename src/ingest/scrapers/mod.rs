// src/ingest/scrapers/mod.rs
//! Scraper variants and the kind -> factory registry.

pub mod api;
pub mod rss;

use std::collections::BTreeMap;

use crate::error::{ConfigError, ScrapeError};
use crate::ingest::config::{SourceKind, SourceSpec};
use crate::ingest::types::Scraper;

/// Where a scraper gets its raw payload from. `Fixture` keeps tests and
/// demos off the network; `Http` is the production path.
pub enum Transport {
    Fixture(String),
    Http(reqwest::Client),
}

impl Transport {
    pub fn http() -> Self {
        Transport::Http(reqwest::Client::new())
    }

    /// Fetch the raw body for `url`. Transport problems are `Fetch` errors.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        match self {
            Transport::Fixture(body) => Ok(body.clone()),
            Transport::Http(client) => {
                let resp = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| ScrapeError::fetch(url, e))?;
                resp.text().await.map_err(|e| ScrapeError::fetch(url, e))
            }
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Fixture(body) => f.debug_tuple("Fixture").field(&body.len()).finish(),
            Transport::Http(_) => f.write_str("Http"),
        }
    }
}

/// Substitute the literal `%s` placeholder with `category`, when given.
pub fn expand_template(url_template: &str, category: Option<&str>) -> String {
    match category {
        Some(cat) => url_template.replace("%s", cat),
        None => url_template.to_string(),
    }
}

/// Builds one fresh scraper (one harvest session) for a configured source.
pub type ScraperFactory =
    Box<dyn Fn(&str, &SourceSpec) -> Result<Box<dyn Scraper>, ConfigError> + Send + Sync>;

/// Explicit map from source kind to scraper constructor, built once at
/// process start and passed to the harvester. No implicit global
/// registration; tests insert their own factories.
pub struct ScraperRegistry {
    factories: BTreeMap<SourceKind, ScraperFactory>,
}

impl ScraperRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// The built-in factories backed by HTTP transports.
    pub fn with_http() -> Self {
        let mut registry = Self::new();
        registry.insert(
            SourceKind::Rss,
            Box::new(|source, spec| {
                let base_url = spec.validate(source, None)?.to_string();
                Ok(Box::new(rss::RssScraper::new(
                    spec.display_name().to_string(),
                    base_url,
                    Transport::http(),
                )))
            }),
        );
        registry.insert(
            SourceKind::Api,
            Box::new(|source, spec| {
                let base_url = spec.validate(source, None)?.to_string();
                Ok(Box::new(api::ApiScraper::new(
                    spec.display_name().to_string(),
                    base_url,
                    spec.strategy.clone().unwrap_or_default(),
                    spec.resolve_credential(),
                    Transport::http(),
                )))
            }),
        );
        registry
    }

    pub fn insert(&mut self, kind: SourceKind, factory: ScraperFactory) {
        self.factories.insert(kind, factory);
    }

    /// Build a fresh scraper instance (one harvest session) for `source`.
    pub fn build(&self, source: &str, spec: &SourceSpec) -> Result<Box<dyn Scraper>, ConfigError> {
        let factory = self
            .factories
            .get(&spec.kind)
            .ok_or_else(|| ConfigError::UnknownKind {
                kind: spec.kind.to_string(),
            })?;
        factory(source, spec)
    }
}

impl Default for ScraperRegistry {
    fn default() -> Self {
        Self::with_http()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_expansion_substitutes_only_when_category_given() {
        assert_eq!(
            expand_template("https://x.example/rss/%s", Some("Sport")),
            "https://x.example/rss/Sport"
        );
        assert_eq!(
            expand_template("https://x.example/rss/%s", None),
            "https://x.example/rss/%s"
        );
        assert_eq!(
            expand_template("https://x.example/all", Some("Sport")),
            "https://x.example/all"
        );
    }

    #[test]
    fn empty_registry_reports_unknown_kind() {
        let registry = ScraperRegistry::new();
        let spec: crate::ingest::config::SourceSpec = toml::from_str(
            r#"
            kind = "rss"
            [endpoint]
            base_url = "https://x.example/rss"
            "#,
        )
        .unwrap();
        assert!(matches!(
            registry.build("x", &spec),
            Err(ConfigError::UnknownKind { .. })
        ));
    }
}
