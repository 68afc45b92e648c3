use mindful_core::session::{AuthTransition, SessionState};
use mindful_core::user::User;
use tokio::sync::watch;

/// Read-only view of a [`SessionStore`](super::SessionStore).
///
/// Reads are synchronous snapshots of the latest published state. Each handle
/// also remembers the last user it reported, so `next_transition` yields
/// identity changes even when intermediate states were coalesced.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionState>,
    last_user: Option<u64>,
}

impl SessionHandle {
    pub(crate) fn new(mut rx: watch::Receiver<SessionState>) -> Self {
        let last_user = rx.borrow_and_update().user_id();
        Self { rx, last_user }
    }

    pub fn current(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.rx.borrow().user_id()
    }

    pub fn user(&self) -> Option<User> {
        self.rx.borrow().user().cloned()
    }

    /// The user id this handle last reported, which may lag `user_id`.
    pub fn observed_user_id(&self) -> Option<u64> {
        self.last_user
    }

    /// Waits for the next identity change.
    ///
    /// Loading and error updates are skipped. Returns `None` once the store
    /// has been dropped.
    pub async fn next_transition(&mut self) -> Option<AuthTransition> {
        loop {
            self.rx.changed().await.ok()?;
            let next = self.rx.borrow_and_update().user_id();
            let transition = AuthTransition::between(self.last_user, next);
            self.last_user = next;
            if transition != AuthTransition::Unchanged {
                return Some(transition);
            }
        }
    }
}
