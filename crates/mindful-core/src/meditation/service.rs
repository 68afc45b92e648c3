//! Remote meditation catalog contract.

use async_trait::async_trait;

use super::model::{Meditation, MeditationCompletion};
use crate::error::Result;

#[async_trait]
pub trait MeditationService: Send + Sync {
    async fn list_meditations(&self) -> Result<Vec<Meditation>>;

    /// Returns `MindfulError::NotFound` for an unknown id.
    async fn get_meditation(&self, id: &str) -> Result<Meditation>;

    async fn record_session(&self, completion: &MeditationCompletion) -> Result<()>;
}
