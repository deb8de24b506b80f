// src/ingest/config.rs
//! Static source configuration: which sources exist, what kind of scraper
//! each one needs, and which categories it declares.
//!
//! Loaded once at startup from TOML or JSON. Path resolution:
//! 1) $NEWSBRIEF_SOURCES_PATH
//! 2) config/sources.toml
//! 3) config/sources.json

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::ingest::scrapers::api::ExtractStrategy;

const ENV_PATH: &str = "NEWSBRIEF_SOURCES_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Rss,
    Api,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Rss => f.write_str("rss"),
            SourceKind::Api => f.write_str("api"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    /// May embed a `%s` category placeholder.
    pub base_url: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// One source's static description, immutable after startup.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSpec {
    pub kind: SourceKind,
    pub endpoint: Endpoint,
    /// Display name; falls back to "Unknown" when absent.
    pub title: Option<String>,
    /// Name of the environment variable holding the credential, if any.
    pub api_key: Option<String>,
    /// API extraction strategy; ignored for RSS sources.
    #[serde(default)]
    pub strategy: Option<ExtractStrategy>,
}

impl SourceSpec {
    /// Resolve the configured credential from the environment (a `.env`
    /// file loaded via dotenvy counts). `None` when unset or unconfigured.
    pub fn resolve_credential(&self) -> Option<String> {
        let name = self.api_key.as_deref()?;
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }

    /// Per-source validation: a missing base_url is fatal for this source
    /// only; a requested category must be declared.
    pub fn validate(&self, source: &str, category: Option<&str>) -> Result<&str, ConfigError> {
        let base_url = self
            .endpoint
            .base_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::MissingBaseUrl {
                source_name: source.to_string(),
            })?;
        if let Some(cat) = category {
            if !self.endpoint.categories.iter().any(|c| c == cat) {
                return Err(ConfigError::UnknownCategory {
                    source_name: source.to_string(),
                    category: cat.to_string(),
                });
            }
        }
        Ok(base_url)
    }
}

/// Source key -> spec, iterated in ascending key order so harvesting runs
/// and merges are deterministic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub sources: BTreeMap<String, SourceSpec>,
}

impl SourcesConfig {
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SourceSpec)> {
        self.sources.iter()
    }

    pub fn get(&self, source: &str) -> Result<&SourceSpec, ConfigError> {
        self.sources
            .get(source)
            .ok_or_else(|| ConfigError::UnknownSource {
                source_name: source.to_string(),
            })
    }

    /// Load from an explicit path. Supports TOML or JSON.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        Self::parse(&content, &ext).map_err(|reason| ConfigError::Format {
            path: path.display().to_string(),
            reason,
        })
    }

    /// Load using the env var override, then the config/ fallbacks.
    /// An entirely absent configuration yields an empty set; the harvester
    /// treats that as fatal for the call.
    pub fn load_default() -> Result<Self, ConfigError> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(&p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(ConfigError::Read {
                path: p,
                reason: "NEWSBRIEF_SOURCES_PATH points to a non-existent path".to_string(),
            });
        }
        let toml_p = PathBuf::from("config/sources.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from("config/sources.json");
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        Ok(Self::default())
    }

    fn parse(s: &str, hint_ext: &str) -> Result<Self, String> {
        if hint_ext == "json" {
            return serde_json::from_str(s).map_err(|e| e.to_string());
        }
        match toml::from_str::<Self>(s) {
            Ok(v) => Ok(v),
            // Fallback for extension-less paths holding JSON.
            Err(toml_err) => serde_json::from_str(s).map_err(|_| toml_err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TOML: &str = r#"
        [sources.pulse]
        kind = "rss"
        title = "Daily Pulse"

        [sources.pulse.endpoint]
        base_url = "https://pulse.example/rss/%s"
        categories = ["Technology", "Politics"]

        [sources.times]
        kind = "api"
        title = "The Times"
        api_key = "TIMES_API_KEY"
        strategy = { mode = "flat-results" }

        [sources.times.endpoint]
        base_url = "https://api.times.example/stories/%s.json?key="
    "#;

    #[test]
    fn toml_and_json_parse_to_the_same_shape() {
        let cfg = SourcesConfig::parse(SAMPLE_TOML, "toml").unwrap();
        assert_eq!(cfg.sources.len(), 2);

        let pulse = cfg.get("pulse").unwrap();
        assert_eq!(pulse.kind, SourceKind::Rss);
        assert_eq!(pulse.display_name(), "Daily Pulse");
        assert_eq!(pulse.endpoint.categories, vec!["Technology", "Politics"]);

        let json = r#"{"sources": {"pulse": {"kind": "rss", "title": null,
            "api_key": null, "endpoint": {"base_url": "https://x/%s", "categories": []}}}}"#;
        let cfg2 = SourcesConfig::parse(json, "json").unwrap();
        assert_eq!(cfg2.get("pulse").unwrap().display_name(), "Unknown");
    }

    #[test]
    fn validate_flags_missing_base_url_and_unknown_category() {
        let cfg = SourcesConfig::parse(SAMPLE_TOML, "toml").unwrap();
        let pulse = cfg.get("pulse").unwrap();

        assert!(pulse.validate("pulse", Some("Technology")).is_ok());
        assert!(matches!(
            pulse.validate("pulse", Some("Sport")),
            Err(ConfigError::UnknownCategory { .. })
        ));

        let mut broken = pulse.clone();
        broken.endpoint.base_url = None;
        assert!(matches!(
            broken.validate("pulse", None),
            Err(ConfigError::MissingBaseUrl { .. })
        ));
    }

    #[test]
    fn unknown_source_is_a_config_error() {
        let cfg = SourcesConfig::parse(SAMPLE_TOML, "toml").unwrap();
        assert!(matches!(
            cfg.get("nope"),
            Err(ConfigError::UnknownSource { .. })
        ));
    }

    #[serial_test::serial]
    #[test]
    fn load_default_honors_env_override() {
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("sources.toml");
        std::fs::write(&p, SAMPLE_TOML).unwrap();

        std::env::set_var(ENV_PATH, p.display().to_string());
        let cfg = SourcesConfig::load_default().unwrap();
        assert_eq!(cfg.sources.len(), 2);
        std::env::remove_var(ENV_PATH);
    }
}
