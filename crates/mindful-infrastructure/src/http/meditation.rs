use async_trait::async_trait;
use mindful_core::meditation::{Meditation, MeditationCompletion, MeditationService};
use mindful_core::{MindfulError, Result};

use super::ApiClient;

/// `MeditationService` backed by the REST API.
#[derive(Clone)]
pub struct HttpMeditationService {
    api: ApiClient,
}

impl HttpMeditationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MeditationService for HttpMeditationService {
    async fn list_meditations(&self) -> Result<Vec<Meditation>> {
        self.api.get_json("/meditations").await
    }

    async fn get_meditation(&self, id: &str) -> Result<Meditation> {
        self.api
            .get_json(&format!("/meditations/{}", id))
            .await
            .map_err(|e| match e {
                MindfulError::NotFound { .. } => MindfulError::not_found("meditation", id),
                other => other,
            })
    }

    async fn record_session(&self, completion: &MeditationCompletion) -> Result<()> {
        let path = format!("/meditations/{}/sessions", completion.meditation_id);
        self.api.post(&path, completion).await
    }
}
