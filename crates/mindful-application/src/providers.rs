//! Composition of the app-wide stores.
//!
//! The stores are built once at startup in a fixed order (theme, session,
//! subscription) and handed around explicitly. The subscription store gets
//! its session dependency as a typed handle instead of relying on build
//! order.

use mindful_core::config::ThemePreference;
use mindful_core::meditation::MeditationService;
use mindful_core::subscription::SubscriptionService;
use mindful_core::user::AuthService;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

use crate::meditation::{MeditationLibrary, MeditationPlayer};
use crate::session::SessionStore;
use crate::subscription::SubscriptionStore;
use crate::theme::ThemeStore;

/// Remote collaborators the stores are built on.
#[derive(Clone)]
pub struct RemoteServices {
    pub auth: Arc<dyn AuthService>,
    pub subscriptions: Arc<dyn SubscriptionService>,
    pub meditations: Arc<dyn MeditationService>,
}

/// The single process-wide set of stores.
pub struct AppProviders {
    pub theme: Arc<ThemeStore>,
    pub session: Arc<SessionStore>,
    pub subscription: Arc<SubscriptionStore>,
    pub library: Arc<MeditationLibrary>,
    pub player: Arc<MeditationPlayer>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl AppProviders {
    pub fn new(theme: ThemePreference, services: RemoteServices) -> Self {
        let theme = Arc::new(ThemeStore::new(theme));
        let session = Arc::new(SessionStore::new(services.auth));
        let subscription = Arc::new(SubscriptionStore::new(
            services.subscriptions,
            session.subscribe(),
        ));
        let library = Arc::new(MeditationLibrary::new(
            services.meditations.clone(),
            Arc::clone(&subscription),
        ));
        let player = Arc::new(MeditationPlayer::new(services.meditations));

        Self {
            theme,
            session,
            subscription,
            library,
            player,
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Starts the background work for long-running hosts: the
    /// session-to-subscription sync and the persisted-session check.
    pub fn start(&self) {
        let sync = self.subscription.spawn_session_sync();
        let init = self.session.spawn_initialize();
        self.lock_tasks().extend([sync, init]);
        tracing::info!("[AppProviders] Started");
    }

    /// Restores the persisted session and loads its entitlement inline.
    ///
    /// For short-lived hosts that need settled state before doing anything
    /// else. Does not start the background sync.
    pub async fn bootstrap(&self) {
        self.session.initialize().await;
        self.subscription.refresh_subscription_status().await;
    }

    /// Aborts background tasks. Safe to call more than once.
    pub fn shutdown(&self) {
        let tasks: Vec<_> = self.lock_tasks().drain(..).collect();
        if tasks.is_empty() {
            return;
        }
        for task in tasks {
            task.abort();
        }
        tracing::info!("[AppProviders] Shut down");
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for AppProviders {
    fn drop(&mut self) {
        self.shutdown();
    }
}
