use mindful_core::session::AuthTransition;
use mindful_core::subscription::{Feature, Offerings, Package, SubscriptionInfo, SubscriptionService};
use mindful_core::{MindfulError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use super::snapshot::{LoadState, OwnedSnapshot, SubscriptionSnapshot};
use crate::session::SessionHandle;

/// Holds the current entitlement and the purchasable offerings.
///
/// The store depends on the session explicitly through a [`SessionHandle`].
/// Every read is filtered through the current session identity: while the
/// session is anonymous, or belongs to a different user than the one the
/// data was fetched for, reads return the default (Free/None) entitlement.
pub struct SubscriptionStore {
    service: Arc<dyn SubscriptionService>,
    session: SessionHandle,
    state: watch::Sender<OwnedSnapshot>,
    op_lock: Mutex<()>,
}

impl SubscriptionStore {
    pub fn new(service: Arc<dyn SubscriptionService>, session: SessionHandle) -> Self {
        let (state, _) = watch::channel(OwnedSnapshot::default());
        Self {
            service,
            session,
            state,
            op_lock: Mutex::new(()),
        }
    }

    // ============================================================================
    // Read side
    // ============================================================================

    pub fn snapshot(&self) -> SubscriptionSnapshot {
        self.state.borrow().view(self.session.user_id())
    }

    pub fn info(&self) -> SubscriptionInfo {
        self.snapshot().info
    }

    pub fn is_premium(&self) -> bool {
        self.snapshot().is_premium()
    }

    pub fn has_feature(&self, feature: Feature) -> bool {
        self.snapshot().info.has_feature(feature)
    }

    pub fn offerings(&self) -> Option<Offerings> {
        self.snapshot().offerings
    }

    pub fn load_state(&self) -> LoadState {
        self.snapshot().load_state
    }

    pub fn last_error(&self) -> Option<String> {
        self.snapshot().last_error
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Drops all subscription data. No network call.
    pub fn reset(&self) {
        self.state.send_replace(OwnedSnapshot::default());
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.snapshot.last_error = None);
    }

    /// Re-fetches entitlement status and offerings.
    ///
    /// The two fetches fail independently: a failed offerings fetch keeps a
    /// freshly fetched status and vice versa. Errors are recorded in the
    /// snapshot, not returned.
    pub async fn refresh_subscription_status(&self) {
        let _op = self.op_lock.lock().await;
        self.refresh_locked(true).await;
    }

    /// Re-fetches the entitlement status only.
    pub async fn refresh_status_only(&self) {
        let _op = self.op_lock.lock().await;
        self.refresh_locked(false).await;
    }

    /// Purchases a package, then re-fetches the authoritative status.
    pub async fn purchase_package(&self, package: &Package) -> Result<()> {
        let _op = self.op_lock.lock().await;
        let owner = self.require_owner()?;

        tracing::info!("[SubscriptionStore] Purchasing package {}", package.id);
        if let Err(e) = self.service.purchase_package(package).await {
            tracing::warn!("[SubscriptionStore] Purchase of {} failed: {}", package.id, e);
            self.record_error(owner, &e);
            return Err(e);
        }

        self.refresh_locked(false).await;
        Ok(())
    }

    /// Restores previous purchases.
    ///
    /// Returns whether anything was restored. Failures are recorded in
    /// `last_error` and reported as `false` instead of an error.
    pub async fn restore_purchases(&self) -> bool {
        let _op = self.op_lock.lock().await;
        let Ok(owner) = self.require_owner() else {
            return false;
        };

        match self.service.restore_purchases().await {
            Ok(true) => {
                tracing::info!("[SubscriptionStore] Purchases restored");
                self.refresh_locked(false).await;
                true
            }
            Ok(false) => {
                tracing::info!("[SubscriptionStore] Nothing to restore");
                false
            }
            Err(e) => {
                tracing::warn!("[SubscriptionStore] Restore failed: {}", e);
                self.record_error(owner, &e);
                false
            }
        }
    }

    /// Cancels the subscription, then re-fetches the status.
    pub async fn cancel_subscription(&self, reason: Option<&str>) -> Result<()> {
        let _op = self.op_lock.lock().await;
        let owner = self.require_owner()?;

        tracing::info!("[SubscriptionStore] Cancelling subscription");
        if let Err(e) = self.service.cancel_subscription(reason).await {
            tracing::warn!("[SubscriptionStore] Cancel failed: {}", e);
            self.record_error(owner, &e);
            return Err(e);
        }

        self.refresh_locked(false).await;
        Ok(())
    }

    /// Follows the session: signing in (or switching user) refreshes status
    /// and offerings, signing out resets to the default entitlement.
    ///
    /// If the handle already saw an authenticated user when this store was
    /// built, an initial refresh runs first. The task ends when the session
    /// store is dropped.
    pub fn spawn_session_sync(self: &Arc<Self>) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let mut session = self.session.clone();
        tokio::spawn(async move {
            if session.observed_user_id().is_some() {
                store.refresh_subscription_status().await;
            }
            while let Some(transition) = session.next_transition().await {
                tracing::debug!("[SubscriptionStore] Session transition: {:?}", transition);
                match transition {
                    AuthTransition::SignedIn | AuthTransition::UserChanged => {
                        store.reset();
                        store.refresh_subscription_status().await;
                    }
                    AuthTransition::SignedOut => store.reset(),
                    AuthTransition::Unchanged => {}
                }
            }
            tracing::debug!("[SubscriptionStore] Session closed, stopping sync");
        })
    }

    async fn refresh_locked(&self, include_offerings: bool) {
        let Some(owner) = self.session.user_id() else {
            tracing::debug!("[SubscriptionStore] Anonymous session, resetting entitlement");
            self.reset();
            return;
        };

        self.state.send_modify(|s| {
            s.claim(owner);
            s.snapshot.load_state = LoadState::Loading;
        });

        let (status, offerings) = if include_offerings {
            let (status, offerings) = tokio::join!(
                self.service.get_subscription_status(),
                self.service.get_offerings()
            );
            (status, Some(offerings))
        } else {
            (self.service.get_subscription_status().await, None)
        };

        if self.session.user_id() != Some(owner) {
            tracing::debug!("[SubscriptionStore] Session changed during refresh, discarding result");
            return;
        }

        self.state.send_modify(|s| {
            s.claim(owner);
            let snapshot = &mut s.snapshot;
            let mut first_error = None;

            match status {
                Ok(info) => snapshot.info = info,
                Err(e) => {
                    tracing::warn!("[SubscriptionStore] Status fetch failed: {}", e);
                    first_error.get_or_insert(e.user_message());
                }
            }
            match offerings {
                Some(Ok(offerings)) => snapshot.offerings = Some(offerings),
                Some(Err(e)) => {
                    tracing::warn!("[SubscriptionStore] Offerings fetch failed: {}", e);
                    first_error.get_or_insert(e.user_message());
                }
                None => {}
            }

            match first_error {
                None => {
                    snapshot.load_state = LoadState::Loaded;
                    snapshot.last_error = None;
                }
                Some(message) => {
                    snapshot.load_state = LoadState::Error;
                    snapshot.last_error = Some(message);
                }
            }
        });
    }

    fn require_owner(&self) -> Result<u64> {
        match self.session.user_id() {
            Some(owner) => Ok(owner),
            None => {
                let err = MindfulError::NotAuthenticated;
                self.state
                    .send_replace(OwnedSnapshot::anonymous_error(err.user_message()));
                Err(err)
            }
        }
    }

    fn record_error(&self, owner: u64, err: &MindfulError) {
        self.state.send_modify(|s| {
            s.claim(owner);
            s.snapshot.last_error = Some(err.user_message());
        });
    }
}
