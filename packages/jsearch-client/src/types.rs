use serde::{Deserialize, Serialize};

/// How far back JSearch should look when matching listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePosted {
    All,
    #[default]
    Today,
    #[serde(rename = "3days")]
    ThreeDays,
    Week,
    Month,
}

/// Query parameters for `GET /search`.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub num_pages: u32,
    pub date_posted: DatePosted,
}

impl SearchRequest {
    /// A first-page request for `query` limited to today's postings.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            num_pages: 1,
            date_posted: DatePosted::default(),
        }
    }

    pub fn with_date_posted(mut self, date_posted: DatePosted) -> Self {
        self.date_posted = date_posted;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

/// Envelope returned by the search endpoint.
///
/// Items stay as untyped JSON: listings regularly omit or null out fields,
/// and a strict struct would reject the whole page over one odd item.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}
