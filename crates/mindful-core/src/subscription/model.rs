//! Subscription entitlement models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Subscription tier purchased by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Premium,
}

impl SubscriptionTier {
    /// Capabilities unlocked by this tier.
    pub fn features(&self) -> &'static [Feature] {
        match self {
            Self::Free => FREE_FEATURES,
            Self::Premium => PREMIUM_FEATURES,
        }
    }
}

/// Lifecycle status of the subscription on the billing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Never subscribed.
    #[default]
    None,
    Active,
    /// Cancelled by the user; may still run until `expires_at`.
    Canceled,
    Expired,
    /// A status this client does not know, e.g. `"trialing"` or `"paused"`.
    /// Never grants premium.
    #[serde(other)]
    Unknown,
}

/// A capability gated by the entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    BasicMeditations,
    MeditationTimer,
    FullLibrary,
    SleepStories,
    OfflineDownloads,
    AdvancedStats,
}

const FREE_FEATURES: &[Feature] = &[Feature::BasicMeditations, Feature::MeditationTimer];

const PREMIUM_FEATURES: &[Feature] = &[
    Feature::BasicMeditations,
    Feature::MeditationTimer,
    Feature::FullLibrary,
    Feature::SleepStories,
    Feature::OfflineDownloads,
    Feature::AdvancedStats,
];

/// Current entitlement as reported by the subscription service.
///
/// `is_premium` is never stored; it is recomputed from tier and status on
/// every call.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInfo {
    pub tier: SubscriptionTier,
    pub status: SubscriptionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub will_renew: bool,
}

impl SubscriptionInfo {
    pub fn new(tier: SubscriptionTier, status: SubscriptionStatus) -> Self {
        Self {
            tier,
            status,
            expires_at: None,
            will_renew: false,
        }
    }

    /// An active premium entitlement.
    pub fn premium_active() -> Self {
        Self {
            will_renew: true,
            ..Self::new(SubscriptionTier::Premium, SubscriptionStatus::Active)
        }
    }

    pub fn is_premium(&self) -> bool {
        self.tier == SubscriptionTier::Premium && self.status == SubscriptionStatus::Active
    }

    /// The tier whose features actually apply right now.
    pub fn effective_tier(&self) -> SubscriptionTier {
        if self.is_premium() {
            SubscriptionTier::Premium
        } else {
            SubscriptionTier::Free
        }
    }

    pub fn features(&self) -> &'static [Feature] {
        self.effective_tier().features()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features().contains(&feature)
    }
}
