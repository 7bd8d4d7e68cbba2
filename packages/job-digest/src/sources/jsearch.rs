//! JSearch API adapter.

use async_trait::async_trait;
use jsearch_client::{DatePosted, JSearchClient, SearchRequest};
use secrecy::ExposeSecret;

use super::JobSource;
use crate::config::DigestConfig;
use crate::error::SourceResult;
use crate::types::{RawJob, RawRecord};

pub struct JSearchSource {
    client: JSearchClient,
    date_posted: DatePosted,
}

impl JSearchSource {
    pub const NAME: &'static str = "jsearch";

    pub fn new(client: JSearchClient, date_posted: DatePosted) -> Self {
        Self {
            client,
            date_posted,
        }
    }

    /// Build from config and the credential in the environment.
    pub fn from_config(config: &DigestConfig) -> SourceResult<Self> {
        let api_key = config.api_key()?;
        let client = JSearchClient::with_timeout(api_key.expose_secret(), config.request_timeout())?;
        Ok(Self::new(client, config.search.date_posted))
    }

    fn search_text(query: &str, location: &str) -> String {
        let location = location.trim();
        if location.is_empty() {
            query.trim().to_string()
        } else {
            format!("{} in {}", query.trim(), location)
        }
    }
}

#[async_trait]
impl JobSource for JSearchSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn fetch(&self, query: &str, location: &str) -> SourceResult<Vec<RawJob>> {
        let request = SearchRequest::new(Self::search_text(query, location))
            .with_date_posted(self.date_posted);

        let response = self.client.search(&request).await?;
        let total = response.data.len();

        let jobs: Vec<RawJob> = response
            .data
            .into_iter()
            .filter_map(|item| RawRecord::from_api_value(Self::NAME, item))
            .map(|record| record.job)
            .collect();

        if jobs.len() < total {
            tracing::debug!(
                query,
                skipped = total - jobs.len(),
                "Ignored non-object items in JSearch response"
            );
        }

        Ok(jobs)
    }
}
