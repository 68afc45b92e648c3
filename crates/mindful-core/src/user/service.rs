//! Remote authentication contract.

use async_trait::async_trait;

use super::model::{Credentials, RegistrationData, User};
use crate::error::Result;

/// Remote authentication service.
///
/// Every call is asynchronous and reports failure through
/// [`MindfulError`](crate::MindfulError). Implementations own the persisted
/// credential, so `is_authenticated` answers from local storage without a
/// round trip when it can.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticates with the given credentials.
    async fn login(&self, credentials: &Credentials) -> Result<()>;

    /// Creates an account and authenticates it.
    async fn register(&self, data: &RegistrationData) -> Result<()>;

    /// Ends the remote session and drops the persisted credential.
    async fn logout(&self) -> Result<()>;

    /// Fetches the profile of the authenticated user.
    async fn get_current_user(&self) -> Result<User>;

    /// Whether a persisted credential already grants authentication.
    async fn is_authenticated(&self) -> Result<bool>;
}
