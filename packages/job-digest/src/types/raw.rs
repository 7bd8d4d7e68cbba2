//! Raw records as produced by source adapters, before normalization.

use serde_json::{Map, Value};

/// One listing exactly as an adapter produced it.
///
/// API adapters hand over the loosely-typed JSON object; HTML adapters hand
/// over the strings their selectors found. The normalizer has one
/// translation per variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RawJob {
    Api(Map<String, Value>),
    Scraped(ScrapedCard),
}

/// Fields pulled out of a single job card on a scraped board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedCard {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    /// Raw posting-time text: RFC 3339 or a relative age like "3 hours ago".
    pub posted: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
}

/// A raw job tagged with the adapter that fetched it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub source: String,
    pub job: RawJob,
}

impl RawRecord {
    pub fn new(source: impl Into<String>, job: RawJob) -> Self {
        Self {
            source: source.into(),
            job,
        }
    }

    /// Wrap a JSON value from an API response. Non-object values yield `None`.
    pub fn from_api_value(source: impl Into<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::new(source, RawJob::Api(map))),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_api_value_accepts_objects_only() {
        assert!(RawRecord::from_api_value("jsearch", json!({"job_id": "1"})).is_some());
        assert!(RawRecord::from_api_value("jsearch", json!("job")).is_none());
        assert!(RawRecord::from_api_value("jsearch", Value::Null).is_none());
    }
}
