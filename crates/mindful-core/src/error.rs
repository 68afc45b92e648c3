//! Error types for the Mindful client core.

use thiserror::Error;

/// A shared error type for the entire Mindful client.
///
/// Remote collaborators, stores and infrastructure all report through this
/// enum so that the stores can turn any failure into a user-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MindfulError {
    /// Remote call rejected, transport failure or timeout
    #[error("Network error: {0}")]
    Network(String),

    /// Bad credentials or bad input, surfaced with a message for the user
    #[error("Validation error: {0}")]
    Validation(String),

    /// Remote authentication succeeded but the profile could not be loaded
    #[error("Profile unavailable: {0}")]
    ProfileUnavailable(String),

    /// The operation requires an authenticated session
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Content gated behind an active premium entitlement
    #[error("Premium subscription required for '{0}'")]
    PremiumRequired(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },
}

impl MindfulError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a network failure
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the message the stores record as `last_error`.
    ///
    /// Validation and network failures carry text meant for the user and are
    /// returned bare; everything else falls back to the full display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(message)
            | Self::Validation(message)
            | Self::ProfileUnavailable(message) => message.clone(),
            Self::NotAuthenticated => "You need to sign in first".to_string(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MindfulError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MindfulError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MindfulError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MindfulError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Transport-level reqwest failures. HTTP status codes are mapped by the
/// client before this conversion is reached.
impl From<reqwest::Error> for MindfulError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else if err.is_timeout() {
            Self::Network(format!("Request timed out: {}", err))
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// A type alias for `Result<T, MindfulError>`.
pub type Result<T> = std::result::Result<T, MindfulError>;
