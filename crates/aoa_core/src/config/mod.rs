//! Audit run configuration.
//!
//! Loaded from TOML; every omitted field falls back to the built-in audit set. The API key is
//! never read from the file, only from [`API_KEY_ENV`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AuditUnit;
use crate::error::AppError;

pub const API_KEY_ENV: &str = "SERPAPI_API_KEY";
const API_KEY_PLACEHOLDER: &str = "your_serpapi_key_here";

const DEFAULT_QUERIES: [&str; 10] = [
    "What are the symptoms of long COVID?",
    "How much vitamin D should I take daily?",
    "Can melatonin supplements improve sleep quality?",
    "Is intermittent fasting safe for people with type/2 diabetes?",
    "How long does it take to recover from hip replacement surgery??",
    "What are the side effects of flu vaccines??",
    "Can air purifiers reduce indoor allergy symptoms?",
    "How early can you detect pregnancy with a home test?",
    "Why do I get migraines after drinking wine?",
    "Is it normal to experience heart palpitations during menopause?",
];

const DEFAULT_LOCALES: [(&str, &str); 4] = [
    ("Los_Angeles", "Los Angeles, California, United States"),
    ("Houston", "Houston, Texas, United States"),
    ("Miami", "Miami, Florida, United States"),
    ("New_York_City", "New York City, New York, United States"),
];

const DEFAULT_LANGUAGES: [&str; 2] = ["en", "es"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locale {
    /// Short label used in logs.
    pub label: String,
    /// Location string sent to the search API.
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuditConfig {
    pub queries: Vec<String>,
    pub locales: Vec<Locale>,
    pub languages: Vec<String>,
    /// Search country (`gl`).
    pub gl: String,
    pub no_cache: bool,
    /// Pause after each successful unit.
    pub sleep_seconds: u64,
    /// Extra attempts per search call after the first.
    pub retries: u32,
    pub timeout_seconds: u64,
    /// Directory that receives the date-stamped results folder.
    pub out_root: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            queries: DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect(),
            locales: DEFAULT_LOCALES
                .iter()
                .map(|(label, location)| Locale {
                    label: label.to_string(),
                    location: location.to_string(),
                })
                .collect(),
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            gl: "us".to_string(),
            no_cache: false,
            sleep_seconds: 2,
            retries: 2,
            timeout_seconds: 30,
            out_root: PathBuf::from("."),
        }
    }
}

impl AuditConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|e| {
            AppError::new("CONFIG_PARSE_FAILED", "Failed to parse audit config")
                .with_details(e.to_string())
        })
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::new("CONFIG_READ_FAILED", "Failed to read audit config")
                .with_details(format!("path={}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), units = config.unit_count(), "audit config loaded");
        Ok(config)
    }

    /// Units in run order: language, then locale, then query.
    pub fn units(&self) -> Vec<AuditUnit> {
        let mut units = Vec::with_capacity(self.unit_count());
        for language in &self.languages {
            for locale in &self.locales {
                for query in &self.queries {
                    units.push(AuditUnit {
                        query: query.clone(),
                        locale_label: locale.label.clone(),
                        location: locale.location.clone(),
                        language: language.clone(),
                    });
                }
            }
        }
        units
    }

    pub fn unit_count(&self) -> usize {
        self.languages.len() * self.locales.len() * self.queries.len()
    }
}

/// Validate the API key taken from the environment.
pub fn resolve_api_key(raw: Option<String>) -> Result<String, AppError> {
    match raw.map(|k| k.trim().to_string()) {
        Some(key) if !key.is_empty() && key != API_KEY_PLACEHOLDER => Ok(key),
        _ => Err(AppError::new(
            "CONFIG_API_KEY_MISSING",
            "Search API key is not set",
        )
        .with_details(format!("set {API_KEY_ENV} to a SerpAPI key"))),
    }
}
