use mindful_core::subscription::{Offerings, SubscriptionInfo};

/// Load lifecycle of the subscription data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    /// Last refresh failed; previously loaded data is kept.
    Error,
}

/// What the rest of the app reads from the subscription store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionSnapshot {
    pub load_state: LoadState,
    pub info: SubscriptionInfo,
    pub offerings: Option<Offerings>,
    pub last_error: Option<String>,
}

impl SubscriptionSnapshot {
    pub fn is_premium(&self) -> bool {
        self.info.is_premium()
    }
}

/// Snapshot tagged with the user it was fetched for.
///
/// `owner` is `None` only for the default entitlement, so data fetched for
/// one user can never be read back under another identity.
#[derive(Debug, Clone, Default)]
pub(crate) struct OwnedSnapshot {
    pub owner: Option<u64>,
    pub snapshot: SubscriptionSnapshot,
}

impl OwnedSnapshot {
    pub fn anonymous_error(message: String) -> Self {
        Self {
            owner: None,
            snapshot: SubscriptionSnapshot {
                last_error: Some(message),
                ..SubscriptionSnapshot::default()
            },
        }
    }

    /// Claims the snapshot for `owner`, dropping anything held for someone else.
    pub fn claim(&mut self, owner: u64) {
        if self.owner != Some(owner) {
            *self = Self {
                owner: Some(owner),
                snapshot: SubscriptionSnapshot::default(),
            };
        }
    }

    /// The snapshot as visible to `viewer`.
    pub fn view(&self, viewer: Option<u64>) -> SubscriptionSnapshot {
        if self.owner == viewer {
            self.snapshot.clone()
        } else {
            SubscriptionSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindful_core::subscription::SubscriptionInfo;

    #[test]
    fn test_view_hides_other_users_data() {
        let mut owned = OwnedSnapshot::default();
        owned.claim(1);
        owned.snapshot.info = SubscriptionInfo::premium_active();

        assert!(owned.view(Some(1)).is_premium());
        assert_eq!(owned.view(Some(2)), SubscriptionSnapshot::default());
        assert_eq!(owned.view(None), SubscriptionSnapshot::default());
    }

    #[test]
    fn test_claim_by_new_owner_resets() {
        let mut owned = OwnedSnapshot::default();
        owned.claim(1);
        owned.snapshot.info = SubscriptionInfo::premium_active();

        owned.claim(1);
        assert!(owned.snapshot.is_premium());

        owned.claim(2);
        assert_eq!(owned.snapshot, SubscriptionSnapshot::default());
        assert_eq!(owned.owner, Some(2));
    }

    #[test]
    fn test_anonymous_error_is_visible_to_anonymous_viewer() {
        let owned = OwnedSnapshot::anonymous_error("sign in first".to_string());
        assert_eq!(owned.view(None).last_error.as_deref(), Some("sign in first"));
        assert!(!owned.view(None).is_premium());
    }
}
