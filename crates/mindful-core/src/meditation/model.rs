//! Meditation catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeditationCategory {
    Breathing,
    Focus,
    Sleep,
    Stress,
    BodyScan,
}

/// A guided meditation in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meditation {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub duration_secs: u64,
    pub category: MeditationCategory,
    /// Premium content requires an active premium entitlement.
    #[serde(default)]
    pub premium: bool,
}

impl Meditation {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// A finished (or abandoned) listening session, reported back to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeditationCompletion {
    pub id: Uuid,
    pub meditation_id: String,
    pub listened_secs: u64,
    pub completed: bool,
    pub finished_at: DateTime<Utc>,
}

impl MeditationCompletion {
    pub fn new(meditation_id: impl Into<String>, listened: Duration, completed: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            meditation_id: meditation_id.into(),
            listened_secs: listened.as_secs(),
            completed,
            finished_at: Utc::now(),
        }
    }
}
