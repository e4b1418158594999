//! Mock searcher for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::searcher::{SearchError, SearchHit, Searcher};

/// Mock implementation of the Searcher trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable hits per query string
/// - Simulate failures for specific queries
/// - Track executed queries for assertions
#[derive(Default)]
pub struct MockSearcher {
    results: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,
    failing_queries: Arc<RwLock<HashSet<String>>>,
    searches: Arc<RwLock<Vec<String>>>,
}

impl MockSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the hits returned for an exact query string.
    pub async fn set_results(&self, query: &str, hits: Vec<SearchHit>) {
        self.results.write().await.insert(query.to_string(), hits);
    }

    /// Make a specific query fail with a transport error.
    pub async fn set_failing_query(&self, query: &str) {
        self.failing_queries.write().await.insert(query.to_string());
    }

    /// Queries executed so far, in order.
    pub async fn recorded_searches(&self) -> Vec<String> {
        self.searches.read().await.clone()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        self.searches.write().await.push(query.to_string());

        if self.failing_queries.read().await.contains(query) {
            return Err(SearchError::ConnectionFailed("mock failure".to_string()));
        }

        Ok(self
            .results
            .read()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
