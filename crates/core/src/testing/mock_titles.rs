//! Mock title provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::identity::MediaType;
use crate::titles::{TitleError, TitleInfo, TitleProvider};

/// Mock implementation of the TitleProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable TitleInfo per external id
/// - Return configurable episode titles
/// - Simulate lookup failures
/// - Track lookups for assertions
#[derive(Default)]
pub struct MockTitleProvider {
    titles: Arc<RwLock<HashMap<String, TitleInfo>>>,
    episode_titles: Arc<RwLock<HashMap<(String, u32, u32), String>>>,
    failing: Arc<RwLock<bool>>,
    lookups: Arc<RwLock<Vec<String>>>,
}

impl MockTitleProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the TitleInfo returned for an external id.
    pub async fn set_title(&self, external_id: &str, info: TitleInfo) {
        self.titles
            .write()
            .await
            .insert(external_id.to_string(), info);
    }

    /// Configure an episode title.
    pub async fn set_episode_title(&self, external_id: &str, season: u32, episode: u32, title: &str) {
        self.episode_titles
            .write()
            .await
            .insert((external_id.to_string(), season, episode), title.to_string());
    }

    /// Make every lookup fail.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }

    /// External ids looked up so far.
    pub async fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl TitleProvider for MockTitleProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn lookup_title(
        &self,
        external_id: &str,
        _media_type: MediaType,
    ) -> Result<TitleInfo, TitleError> {
        self.lookups.write().await.push(external_id.to_string());

        if *self.failing.read().await {
            return Err(TitleError::ApiError {
                status: 500,
                message: "mock failure".to_string(),
            });
        }

        self.titles
            .read()
            .await
            .get(external_id)
            .cloned()
            .ok_or_else(|| TitleError::NotFound(external_id.to_string()))
    }

    async fn lookup_episode_title(
        &self,
        external_id: &str,
        season: u32,
        episode: u32,
    ) -> Result<Option<String>, TitleError> {
        if *self.failing.read().await {
            return Err(TitleError::ApiError {
                status: 500,
                message: "mock failure".to_string(),
            });
        }

        Ok(self
            .episode_titles
            .read()
            .await
            .get(&(external_id.to_string(), season, episode))
            .cloned())
    }
}
