//! Session state model.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::user::User;

/// Authenticated-identity state of the running app instance.
///
/// Authentication is derived from the presence of a user profile, so a value
/// that is authenticated without a profile cannot be constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    user: Option<User>,
    is_loading: bool,
    last_error: Option<String>,
}

impl SessionState {
    /// The unauthenticated state every process starts in.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An authenticated state for the given profile.
    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Populates the profile, which marks the session authenticated.
    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.last_error = None;
    }

    /// Drops the identity. Loading and error flags are left untouched.
    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }
}

/// Direction of an identity change between two session states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthTransition {
    SignedIn,
    SignedOut,
    /// Authenticated before and after, but as a different user.
    UserChanged,
    Unchanged,
}

impl AuthTransition {
    /// Classifies the change between two observed user ids.
    pub fn between(previous: Option<u64>, next: Option<u64>) -> Self {
        match (previous, next) {
            (None, Some(_)) => Self::SignedIn,
            (Some(_), None) => Self::SignedOut,
            (Some(a), Some(b)) if a != b => Self::UserChanged,
            _ => Self::Unchanged,
        }
    }
}

/// Serialized as `{ userIdentity, isAuthenticated, isLoading, lastError }`,
/// with `isAuthenticated` derived from the user.
impl Serialize for SessionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SessionState", 4)?;
        state.serialize_field("userIdentity", &self.user)?;
        state.serialize_field("isAuthenticated", &self.is_authenticated())?;
        state.serialize_field("isLoading", &self.is_loading)?;
        state.serialize_field("lastError", &self.last_error)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let state = SessionState::empty();
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert!(!state.is_loading());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_sign_in_then_out_returns_to_empty() {
        let mut state = SessionState::empty();
        state.sign_in(User::new(1, "A"));
        assert!(state.is_authenticated());
        assert_eq!(state.user().map(|u| u.name.as_str()), Some("A"));

        state.sign_out();
        assert_eq!(state, SessionState::empty());
    }

    #[test]
    fn test_sign_in_clears_previous_error() {
        let mut state = SessionState::empty();
        state.set_error("bad password");
        state.sign_in(User::new(1, "A"));
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_serializes_derived_authentication() {
        let state = SessionState::authenticated(User::new(1, "A"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userIdentity": { "id": 1, "name": "A" },
                "isAuthenticated": true,
                "isLoading": false,
                "lastError": null,
            })
        );

        let mut rejected = SessionState::empty();
        rejected.set_error("bad password");
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["isAuthenticated"], false);
        assert_eq!(json["userIdentity"], serde_json::Value::Null);
        assert_eq!(json["lastError"], "bad password");
    }

    #[test]
    fn test_transition_between() {
        assert_eq!(AuthTransition::between(None, Some(1)), AuthTransition::SignedIn);
        assert_eq!(AuthTransition::between(Some(1), None), AuthTransition::SignedOut);
        assert_eq!(AuthTransition::between(Some(1), Some(2)), AuthTransition::UserChanged);
        assert_eq!(AuthTransition::between(Some(1), Some(1)), AuthTransition::Unchanged);
        assert_eq!(AuthTransition::between(None, None), AuthTransition::Unchanged);
    }
}
