// src/ingest/scrapers/api.rs
//! JSON API scraper with an injected, provider-specific extraction strategy.
//!
//! The strategy is plain data (configured per source), not a subclass: one
//! scraper type covers both "flat list under a key" providers and "named
//! bucket per category" providers.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ScrapeError;
use crate::ingest::dedup::UrlDedup;
use crate::ingest::scrapers::{expand_template, Transport};
use crate::ingest::types::{CanonicalArticle, RawCandidate, Scraper};
use crate::ingest::validate_all;

fn default_list_key() -> String {
    "results".to_string()
}
fn default_title_field() -> String {
    "title".to_string()
}
fn default_abstract_field() -> String {
    "abstract".to_string()
}
fn default_url_field() -> String {
    "url".to_string()
}
fn default_facet_fields() -> Vec<String> {
    vec!["des_facet".to_string(), "org_facet".to_string()]
}
fn default_summary_field() -> String {
    "summary".to_string()
}
fn default_link_field() -> String {
    "news_link".to_string()
}

/// How to pull entries out of a provider's JSON response.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum ExtractStrategy {
    /// A flat entry list under `list_key`; per-entry categories are unioned
    /// from the facet list fields. Defaults match a top-stories style API.
    FlatResults {
        #[serde(default = "default_list_key")]
        list_key: String,
        #[serde(default = "default_title_field")]
        title_field: String,
        #[serde(default = "default_abstract_field")]
        description_field: String,
        #[serde(default = "default_url_field")]
        url_field: String,
        #[serde(default = "default_facet_fields")]
        facet_fields: Vec<String>,
    },
    /// Every top-level array is a bucket; the bucket name is the implicit
    /// category of its entries.
    NamedBuckets {
        #[serde(default = "default_title_field")]
        title_field: String,
        #[serde(default = "default_summary_field")]
        description_field: String,
        #[serde(default = "default_link_field")]
        url_field: String,
    },
}

impl Default for ExtractStrategy {
    fn default() -> Self {
        ExtractStrategy::FlatResults {
            list_key: default_list_key(),
            title_field: default_title_field(),
            description_field: default_abstract_field(),
            url_field: default_url_field(),
            facet_fields: default_facet_fields(),
        }
    }
}

fn string_field(entry: &Value, field: &str) -> Option<String> {
    entry.get(field).and_then(Value::as_str).map(str::to_string)
}

fn string_list(entry: &Value, field: &str) -> Vec<String> {
    entry
        .get(field)
        .and_then(Value::as_array)
        .map(|a| {
            a.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl ExtractStrategy {
    /// Extract raw candidates from a (status-checked) response body.
    /// Malformed entries simply produce candidates that validation drops.
    fn extract(&self, response: &Value, requested: Option<&str>) -> Vec<RawCandidate> {
        let mut out = Vec::new();
        match self {
            ExtractStrategy::FlatResults {
                list_key,
                title_field,
                description_field,
                url_field,
                facet_fields,
            } => {
                let entries = response
                    .get(list_key)
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default();
                for entry in &entries {
                    let mut categories: Vec<String> = Vec::new();
                    if let Some(cat) = requested {
                        categories.push(cat.to_string());
                    }
                    for facet in facet_fields {
                        categories.extend(string_list(entry, facet));
                    }
                    out.push(RawCandidate {
                        title: string_field(entry, title_field),
                        description: string_field(entry, description_field),
                        url: string_field(entry, url_field),
                        published_at: Some(Utc::now()),
                        categories,
                    });
                }
            }
            ExtractStrategy::NamedBuckets {
                title_field,
                description_field,
                url_field,
            } => {
                let Some(object) = response.as_object() else {
                    return out;
                };
                for (bucket, values) in object {
                    let Some(entries) = values.as_array() else {
                        continue;
                    };
                    for entry in entries {
                        let mut categories = vec![bucket.clone()];
                        if let Some(cat) = requested {
                            if cat != bucket {
                                categories.push(cat.to_string());
                            }
                        }
                        out.push(RawCandidate {
                            title: string_field(entry, title_field),
                            description: string_field(entry, description_field),
                            url: string_field(entry, url_field),
                            published_at: Some(Utc::now()),
                            categories,
                        });
                    }
                }
            }
        }
        out
    }
}

/// Accept `"OK"` or numeric 200; any other present value is a parse error.
/// A response without a `status` field is treated as success.
fn check_status(response: &Value, url: &str) -> Result<(), ScrapeError> {
    match response.get("status") {
        None => Ok(()),
        Some(status) => {
            let ok = status.as_str() == Some("OK") || status.as_i64() == Some(200);
            if ok {
                Ok(())
            } else {
                Err(ScrapeError::parse(url, format!("API status: {status}")))
            }
        }
    }
}

pub struct ApiScraper {
    source_name: String,
    url_template: String,
    strategy: ExtractStrategy,
    transport: Transport,
    dedup: UrlDedup,
}

impl ApiScraper {
    /// `credential`, when present, is appended to the URL template (the
    /// provider endpoints end in `?key=`-style suffixes).
    pub fn new(
        source_name: String,
        base_url: String,
        strategy: ExtractStrategy,
        credential: Option<String>,
        transport: Transport,
    ) -> Self {
        let url_template = match credential {
            Some(key) => format!("{base_url}{key}"),
            None => base_url,
        };
        Self {
            source_name,
            url_template,
            strategy,
            transport,
            dedup: UrlDedup::new(),
        }
    }

    pub fn from_fixture(
        source_name: &str,
        url_template: &str,
        strategy: ExtractStrategy,
        body: &str,
    ) -> Self {
        Self::new(
            source_name.to_string(),
            url_template.to_string(),
            strategy,
            None,
            Transport::Fixture(body.to_string()),
        )
    }
}

#[async_trait]
impl Scraper for ApiScraper {
    async fn collect(
        &mut self,
        category: Option<&str>,
    ) -> Result<Vec<CanonicalArticle>, ScrapeError> {
        let url = expand_template(&self.url_template, category);
        let body = self.transport.fetch(&url).await?;

        let response: Value =
            serde_json::from_str(&body).map_err(|e| ScrapeError::parse(&url, e))?;
        check_status(&response, &url)?;

        let candidates = self.strategy.extract(&response, category);
        let articles = validate_all(candidates, &self.source_name, &mut self.dedup);
        tracing::debug!(
            source = %self.source_name,
            %url,
            count = articles.len(),
            "api collect finished"
        );
        Ok(articles)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}
