//! In-memory source for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::JobSource;
use crate::error::{SourceError, SourceResult};
use crate::types::RawJob;

#[derive(Debug, Clone)]
enum Response {
    Jobs(Vec<RawJob>),
    Fail,
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Response>,
    delays: HashMap<String, Duration>,
    calls: Vec<String>,
}

/// Canned responses keyed by query. Clones share state, so a test can keep
/// a handle after boxing the source and inspect the calls it received.
#[derive(Debug, Clone)]
pub struct MockSource {
    name: String,
    state: Arc<Mutex<MockState>>,
}

impl MockSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn update(self, f: impl FnOnce(&mut MockState)) -> Self {
        if let Ok(mut state) = self.state.lock() {
            f(&mut state);
        }
        self
    }

    pub fn with_jobs(self, query: impl Into<String>, jobs: Vec<RawJob>) -> Self {
        let query = query.into();
        self.update(|s| {
            s.responses.insert(query, Response::Jobs(jobs));
        })
    }

    pub fn with_delay(self, query: impl Into<String>, delay: Duration) -> Self {
        let query = query.into();
        self.update(|s| {
            s.delays.insert(query, delay);
        })
    }

    /// Make `query` fail the way an unavailable upstream would.
    pub fn failing(self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.update(|s| {
            s.responses.insert(query, Response::Fail);
        })
    }

    /// Queries fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|s| s.calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JobSource for MockSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, query: &str, _location: &str) -> SourceResult<Vec<RawJob>> {
        let (response, delay) = match self.state.lock() {
            Ok(mut state) => {
                state.calls.push(query.to_string());
                (
                    state.responses.get(query).cloned(),
                    state.delays.get(query).copied(),
                )
            }
            Err(_) => (None, None),
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            Some(Response::Jobs(jobs)) => Ok(jobs),
            Some(Response::Fail) => Err(SourceError::Status {
                status: 503,
                url: format!("mock://{}/{}", self.name, query),
            }),
            None => Ok(Vec::new()),
        }
    }
}
