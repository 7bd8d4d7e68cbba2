//! Raw record → canonical [`Job`].
//!
//! Never fails: absent or malformed fields fall back to the sentinels in
//! [`crate::types::job`]. Where sources disagree on naming, candidate keys
//! are tried in a fixed priority order.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use super::timestamps::{from_unix_seconds, parse_posted, parse_utc};
use crate::types::{Job, RawJob, RawRecord, ScrapedCard, MISSING_TITLE, NO_APPLY_LINK, UNKNOWN};

const ID_KEYS: &[&str] = &["job_id", "id"];
const TITLE_KEYS: &[&str] = &["job_title", "title"];
const COMPANY_KEYS: &[&str] = &["employer_name", "company"];
const PUBLISHER_KEYS: &[&str] = &["job_publisher", "publisher"];
const DESCRIPTION_KEYS: &[&str] = &["job_description", "description"];
/// Direct application link beats the search-engine landing page.
const APPLY_LINK_KEYS: &[&str] = &["job_apply_link", "job_google_link", "url"];
const LOCATION_PART_KEYS: &[&str] = &["job_city", "job_state", "job_country"];

/// Per-run inputs the normalizer needs besides the record itself.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext {
    /// Run start; relative ages on scraped cards are measured from here.
    pub now: DateTime<Utc>,
}

impl NormalizeContext {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

pub fn normalize(record: &RawRecord, ctx: &NormalizeContext) -> Job {
    match &record.job {
        RawJob::Api(fields) => normalize_api(fields, &record.source),
        RawJob::Scraped(card) => normalize_card(card, &record.source, ctx),
    }
}

pub fn normalize_all(records: &[RawRecord], ctx: &NormalizeContext) -> Vec<Job> {
    records.iter().map(|r| normalize(r, ctx)).collect()
}

/// String value of `key`, trimmed. Numbers are stringified; empty strings,
/// nulls and structured values count as absent.
fn text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) => non_empty(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn first_text(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text(fields, key))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn api_location(fields: &Map<String, Value>) -> Option<String> {
    if let Some(location) = text(fields, "job_location") {
        return Some(location);
    }

    let parts: Vec<String> = LOCATION_PART_KEYS
        .iter()
        .filter_map(|key| text(fields, key))
        .collect();
    if !parts.is_empty() {
        return Some(parts.join(", "));
    }

    text(fields, "location")
}

fn api_posted_at(fields: &Map<String, Value>) -> Option<DateTime<Utc>> {
    if let Some(posted) = text(fields, "job_posted_at_datetime_utc").and_then(|s| parse_utc(&s)) {
        return Some(posted);
    }

    let secs = match fields.get("job_posted_at_timestamp")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    from_unix_seconds(secs)
}

fn normalize_api(fields: &Map<String, Value>, source: &str) -> Job {
    let title = first_text(fields, TITLE_KEYS).unwrap_or_else(|| MISSING_TITLE.to_string());
    let company = first_text(fields, COMPANY_KEYS).unwrap_or_else(|| UNKNOWN.to_string());
    let apply_link =
        first_text(fields, APPLY_LINK_KEYS).unwrap_or_else(|| NO_APPLY_LINK.to_string());
    let id = first_text(fields, ID_KEYS)
        .unwrap_or_else(|| Job::synthesize_id(&title, &company, &apply_link));

    Job {
        id,
        title,
        company,
        location: api_location(fields).unwrap_or_default(),
        publisher: first_text(fields, PUBLISHER_KEYS).unwrap_or_else(|| UNKNOWN.to_string()),
        source: source.to_string(),
        apply_link,
        posted_at: api_posted_at(fields),
        description: first_text(fields, DESCRIPTION_KEYS).unwrap_or_default(),
    }
}

fn normalize_card(card: &ScrapedCard, source: &str, ctx: &NormalizeContext) -> Job {
    let field = |value: &Option<String>| value.as_deref().and_then(non_empty);

    let title = field(&card.title).unwrap_or_else(|| MISSING_TITLE.to_string());
    let company = field(&card.company).unwrap_or_else(|| UNKNOWN.to_string());
    let apply_link = field(&card.link).unwrap_or_else(|| NO_APPLY_LINK.to_string());
    let id = field(&card.id)
        .map(|id| format!("{}:{}", source, id))
        .unwrap_or_else(|| Job::synthesize_id(&title, &company, &apply_link));

    Job {
        id,
        title,
        company,
        location: field(&card.location).unwrap_or_default(),
        publisher: field(&card.publisher).unwrap_or_else(|| source.to_string()),
        source: source.to_string(),
        apply_link,
        posted_at: field(&card.posted).and_then(|p| parse_posted(&p, ctx.now)),
        description: field(&card.description).unwrap_or_default(),
    }
}
