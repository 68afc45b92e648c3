use mindful_core::session::SessionState;
use mindful_core::user::{AuthService, Credentials, RegistrationData, User};
use mindful_core::{MindfulError, Result};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

use super::handle::SessionHandle;

/// Holds the authenticated identity of the running app.
///
/// State is published through a `watch` channel so readers get cheap
/// snapshots and change notifications. Mutations (`login`, `register`,
/// `logout`, `initialize`) are serialized by a per-store operation lock.
pub struct SessionStore {
    auth: Arc<dyn AuthService>,
    state: watch::Sender<SessionState>,
    op_lock: Mutex<()>,
    /// Set while a spawned persisted-session check has not finished.
    initializing: AtomicBool,
}

/// Sets `is_loading` for its lifetime and clears it on drop, including when
/// the owning future is dropped mid-call. A pending initialization keeps the
/// flag raised.
struct LoadingGuard<'a> {
    store: &'a SessionStore,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(store: &'a SessionStore) -> Self {
        store.state.send_modify(|s| s.set_loading(true));
        Self { store }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let pending = self.store.initializing.load(Ordering::SeqCst);
        self.store.state.send_modify(|s| s.set_loading(pending));
    }
}

/// Owned by a spawned initialization task. Dropping it, whether the task
/// finished or was aborted before running, ends the pending state.
struct PendingInit(Arc<SessionStore>);

impl Drop for PendingInit {
    fn drop(&mut self) {
        if self.0.initializing.swap(false, Ordering::SeqCst) {
            self.0.state.send_modify(|s| s.set_loading(false));
        }
    }
}

impl SessionStore {
    /// Creates a store in the empty, unauthenticated state.
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        let (state, _) = watch::channel(SessionState::empty());
        Self {
            auth,
            state,
            op_lock: Mutex::new(()),
            initializing: AtomicBool::new(false),
        }
    }

    // ============================================================================
    // Read side
    // ============================================================================

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Returns a read-only handle for dependent stores.
    pub fn subscribe(&self) -> SessionHandle {
        SessionHandle::new(self.state.subscribe())
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Restores a persisted session, if the auth service still holds one.
    ///
    /// Failures are logged and leave the session empty; nothing is surfaced
    /// to the caller. `is_loading` stays set until the check finishes.
    pub async fn initialize(&self) {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::acquire(self);

        match self.auth.is_authenticated().await {
            Ok(true) => match self.auth.get_current_user().await {
                Ok(user) => {
                    tracing::info!("[SessionStore] Restored session for user {}", user.id);
                    self.state.send_modify(|s| s.sign_in(user));
                }
                Err(e) => {
                    tracing::warn!("[SessionStore] Persisted token present but profile fetch failed: {}", e);
                }
            },
            Ok(false) => {
                tracing::debug!("[SessionStore] No persisted session");
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to check persisted session: {}", e);
            }
        }
        self.initializing.store(false, Ordering::SeqCst);
    }

    /// Runs [`initialize`](Self::initialize) in the background.
    ///
    /// `is_loading` is raised before this returns and stays raised until the
    /// check completes, even if other operations run first.
    pub fn spawn_initialize(self: &Arc<Self>) -> JoinHandle<()> {
        self.initializing.store(true, Ordering::SeqCst);
        self.state.send_modify(|s| s.set_loading(true));
        let pending = PendingInit(Arc::clone(self));
        tokio::spawn(async move {
            pending.0.initialize().await;
            drop(pending);
        })
    }

    /// Logs in and loads the user's profile.
    ///
    /// On failure the user-facing message is stored in `last_error` and the
    /// error is returned as well.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::acquire(self);

        tracing::info!("[SessionStore] Logging in {}", credentials.email);
        let result = self.authenticate(self.auth.login(credentials)).await;
        self.settle(result)
    }

    /// Registers a new account and signs it in.
    pub async fn register(&self, data: &RegistrationData) -> Result<()> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::acquire(self);

        tracing::info!("[SessionStore] Registering {}", data.email);
        let result = self.authenticate(self.auth.register(data)).await;
        self.settle(result)
    }

    /// Signs out. Local state is cleared whatever the remote call does.
    pub async fn logout(&self) {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::acquire(self);

        if let Err(e) = self.auth.logout().await {
            tracing::warn!("[SessionStore] Remote logout failed, clearing local session anyway: {}", e);
        }
        self.state.send_modify(|s| {
            s.sign_out();
            s.clear_error();
        });
        tracing::info!("[SessionStore] Logged out");
    }

    pub fn clear_error(&self) {
        self.state.send_modify(|s| s.clear_error());
    }

    /// Runs the remote authentication call, then fetches the profile.
    ///
    /// A profile failure after a successful remote call rolls the remote side
    /// back with a best-effort logout, so the session never ends up
    /// authenticated without a user.
    async fn authenticate<F>(&self, remote: F) -> Result<User>
    where
        F: Future<Output = Result<()>>,
    {
        remote.await?;

        match self.auth.get_current_user().await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::warn!("[SessionStore] Authenticated but profile fetch failed, rolling back: {}", e);
                if let Err(logout_err) = self.auth.logout().await {
                    tracing::warn!("[SessionStore] Rollback logout failed: {}", logout_err);
                }
                self.state.send_modify(|s| s.sign_out());
                Err(MindfulError::ProfileUnavailable(e.user_message()))
            }
        }
    }

    fn settle(&self, result: Result<User>) -> Result<()> {
        match result {
            Ok(user) => {
                tracing::info!("[SessionStore] Signed in as user {}", user.id);
                self.state.send_modify(|s| s.sign_in(user));
                Ok(())
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Authentication failed: {}", e);
                self.state.send_modify(|s| s.set_error(e.user_message()));
                Err(e)
            }
        }
    }
}
