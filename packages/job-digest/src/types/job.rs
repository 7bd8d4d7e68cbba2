//! Canonical job record shared by every stage after normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Title used when a source omits one.
pub const MISSING_TITLE: &str = "";

/// Company (and publisher) used when a source omits one.
pub const UNKNOWN: &str = "Unknown";

/// Apply link used when no candidate link field is present.
pub const NO_APPLY_LINK: &str = "#";

/// Prefix marking ids synthesized from listing content.
pub const SYNTHETIC_ID_PREFIX: &str = "synth:";

/// A normalized, source-agnostic job listing.
///
/// Built once by the normalizer and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Source-provided id, or a content fingerprint (see [`Job::synthesize_id`]).
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Upstream publisher of the listing (LinkedIn, Indeed, a board name, ...).
    pub publisher: String,
    /// Adapter that fetched the record.
    pub source: String,
    pub apply_link: String,
    /// Always UTC. `None` when the source gave no usable posting time.
    pub posted_at: Option<DateTime<Utc>>,
    pub description: String,
}

impl Job {
    /// Deterministic identity for listings without a source id.
    ///
    /// SHA256 over trimmed, lowercased title, company and link, so the same
    /// listing fetched twice (or in two runs) always collapses.
    pub fn synthesize_id(title: &str, company: &str, apply_link: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(title.trim().to_lowercase().as_bytes());
        hasher.update(b"|");
        hasher.update(company.trim().to_lowercase().as_bytes());
        hasher.update(b"|");
        hasher.update(apply_link.trim().as_bytes());
        format!("{}{}", SYNTHETIC_ID_PREFIX, hex::encode(hasher.finalize()))
    }

    pub fn has_synthetic_id(&self) -> bool {
        self.id.starts_with(SYNTHETIC_ID_PREFIX)
    }

    /// Text searched by keyword filters: title and description, lowercased.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description).to_lowercase()
    }

    /// Description cut to `max_chars` characters for display, with `...`
    /// appended when anything was dropped.
    pub fn display_description(&self, max_chars: usize) -> String {
        let description = self.description.trim();
        match description.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", description[..cut].trim_end()),
            None => description.to_string(),
        }
    }
}
