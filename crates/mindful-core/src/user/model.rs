//! User identity and credential models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The signed-in user's profile as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Login credentials.
///
/// `Debug` is implemented by hand so the password never reaches a log line.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Data submitted to the registration endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct RegistrationData {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationData {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for RegistrationData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationData")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("a@example.com", "hunter2");
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("a@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_registration_debug_redacts_password() {
        let data = RegistrationData::new("A", "a@example.com", "hunter2");
        assert!(!format!("{:?}", data).contains("hunter2"));
    }

    #[test]
    fn test_user_deserializes_without_email() {
        let user: User = serde_json::from_str(r#"{"id":1,"name":"A"}"#).unwrap();
        assert_eq!(user, User::new(1, "A"));
    }
}
