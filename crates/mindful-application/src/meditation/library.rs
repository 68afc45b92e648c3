use mindful_core::meditation::{Meditation, MeditationService};
use mindful_core::{MindfulError, Result};
use std::sync::Arc;

use crate::subscription::SubscriptionStore;

/// A catalog entry together with whether the current entitlement unlocks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub meditation: Meditation,
    pub locked: bool,
}

/// Meditation catalog gated by the subscription entitlement.
pub struct MeditationLibrary {
    service: Arc<dyn MeditationService>,
    subscription: Arc<SubscriptionStore>,
}

impl MeditationLibrary {
    pub fn new(service: Arc<dyn MeditationService>, subscription: Arc<SubscriptionStore>) -> Self {
        Self {
            service,
            subscription,
        }
    }

    pub fn can_access(&self, meditation: &Meditation) -> bool {
        !meditation.premium || self.subscription.is_premium()
    }

    pub async fn list(&self) -> Result<Vec<LibraryEntry>> {
        let meditations = self.service.list_meditations().await?;
        Ok(meditations
            .into_iter()
            .map(|meditation| LibraryEntry {
                locked: !self.can_access(&meditation),
                meditation,
            })
            .collect())
    }

    /// Fetches a meditation for playback, refusing locked premium content.
    pub async fn open(&self, id: &str) -> Result<Meditation> {
        let meditation = self.service.get_meditation(id).await?;
        if !self.can_access(&meditation) {
            tracing::info!("[MeditationLibrary] '{}' requires premium", id);
            return Err(MindfulError::PremiumRequired(meditation.title));
        }
        Ok(meditation)
    }
}
