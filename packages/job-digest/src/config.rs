//! Run configuration.
//!
//! Layering, lowest to highest precedence:
//! - built-in defaults ([`DigestConfig::default`])
//! - a TOML preset, bundled ([`DigestConfig::preset`]) or from disk ([`DigestConfig::load`])
//! - command-line overrides applied by the binary
//!
//! The JSearch credential is never part of the file; it is read from the
//! environment variable named by `fetch.api_key_env`.

use std::env;
use std::path::{Path, PathBuf};

use jsearch_client::DatePosted;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::render::ReportFormat;

/// Presets bundled into the binary, by name.
pub const PRESETS: &[(&str, &str)] = &[
    ("devops-24h", include_str!("../presets/devops-24h.toml")),
    ("platform-72h", include_str!("../presets/platform-72h.toml")),
    ("kubernetes-week", include_str!("../presets/kubernetes-week.toml")),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
    pub search: SearchConfig,
    pub filters: FilterConfig,
    /// Maximum jobs in the final report.
    pub max_jobs: usize,
    pub output: OutputConfig,
    pub outreach: OutreachConfig,
    pub fetch: FetchConfig,
    /// Scraped job boards, fetched after JSearch in declaration order.
    pub boards: Vec<BoardConfig>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            filters: FilterConfig::default(),
            max_jobs: 50,
            output: OutputConfig::default(),
            outreach: OutreachConfig::default(),
            fetch: FetchConfig::default(),
            boards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Each query is searched as "<query> in <location>".
    pub queries: Vec<String>,
    pub location: String,
    /// JSearch `date_posted` window.
    pub date_posted: DatePosted,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            queries: [
                "DevOps Engineer",
                "Site Reliability Engineer",
                "SRE",
                "Cloud Engineer",
                "Platform Engineer",
                "Infrastructure Engineer",
                "CI/CD Engineer",
                "Kubernetes Engineer",
                "AWS Engineer",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            location: "Bangalore, India".to_string(),
            date_posted: DatePosted::Today,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub max_age_hours: u32,
    /// A job must mention at least one of these (empty = no keyword filter).
    pub must_keywords: Vec<String>,
    /// Publishers to drop, e.g. `["LinkedIn"]`. Empty admits everything.
    pub excluded_publishers: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_age_hours: 24,
            must_keywords: ["devops", "sre", "kubernetes", "aws", "docker", "terraform"]
                .into_iter()
                .map(String::from)
                .collect(),
            excluded_publishers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// File name without extension; each format adds its own.
    pub stem: String,
    pub formats: Vec<ReportFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            stem: "jobs_report".to_string(),
            formats: vec![ReportFormat::Text],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutreachConfig {
    pub candidate_name: String,
    /// Role family used in digest headings ("DevOps/SRE Job Digest").
    pub role_label: String,
    /// Placeholders: `{title}`, `{company}`, `{location}`, `{publisher}`,
    /// `{candidate}`. Anything else in braces is left as written.
    pub template: String,
    /// Characters of description shown per job.
    pub description_chars: usize,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            candidate_name: "Abin".to_string(),
            role_label: "DevOps/SRE".to_string(),
            template: crate::render::outreach::DEFAULT_TEMPLATE.to_string(),
            description_chars: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub jsearch_enabled: bool,
    /// Environment variable holding the RapidAPI key.
    pub api_key_env: String,
    pub request_timeout_secs: u64,
    /// Fetches in flight at once. Results are still merged in declaration order.
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            jsearch_enabled: true,
            api_key_env: "JSEARCH_API_KEY".to_string(),
            request_timeout_secs: 30,
            concurrency: 4,
        }
    }
}

/// A job board scraped with CSS selectors.
///
/// `url_template` may contain `{query}` and `{location}`, which are
/// URL-encoded before substitution. Field selectors are evaluated inside
/// each card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub url_template: String,
    pub card_selector: String,
    pub title_selector: String,
    #[serde(default)]
    pub company_selector: Option<String>,
    #[serde(default)]
    pub location_selector: Option<String>,
    /// Defaults to the first `a[href]` in the card.
    #[serde(default)]
    pub link_selector: Option<String>,
    /// A `datetime` attribute on the match wins over its text.
    #[serde(default)]
    pub posted_selector: Option<String>,
    #[serde(default)]
    pub description_selector: Option<String>,
    /// Card attribute carrying a stable listing id, e.g. `data-job-id`.
    #[serde(default)]
    pub id_attribute: Option<String>,
    /// Publisher reported for every card; defaults to the board name.
    #[serde(default)]
    pub publisher: Option<String>,
}

impl DigestConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        let (_, content) = PRESETS
            .iter()
            .find(|(preset, _)| *preset == name)
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))?;
        Self::from_toml_str(content)
    }

    pub fn preset_names() -> impl Iterator<Item = &'static str> {
        PRESETS.iter().map(|(name, _)| *name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| Err(ConfigError::Invalid(reason.to_string()));

        if self.search.queries.iter().all(|q| q.trim().is_empty()) {
            return invalid("search.queries must contain at least one query");
        }
        if self.fetch.concurrency == 0 {
            return invalid("fetch.concurrency must be at least 1");
        }
        if self.fetch.request_timeout_secs == 0 {
            return invalid("fetch.request_timeout_secs must be at least 1");
        }
        if self.output.stem.trim().is_empty() {
            return invalid("output.stem must not be empty");
        }
        if self.output.formats.is_empty() {
            return invalid("output.formats must list at least one format");
        }
        for board in &self.boards {
            if board.name.trim().is_empty() {
                return invalid("every board needs a name");
            }
        }
        Ok(())
    }

    /// The RapidAPI key from the environment. Missing or blank is an error
    /// for the JSearch source only.
    pub fn api_key(&self) -> Result<SecretString, ConfigError> {
        let var = &self.fetch.api_key_env;
        match env::var(var) {
            Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
            _ => Err(ConfigError::MissingCredential { var: var.clone() }),
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.fetch.request_timeout_secs)
    }
}
