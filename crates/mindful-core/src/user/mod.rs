//! User domain module.
//!
//! - `model`: user profile and credential models
//! - `service`: the remote authentication contract

mod model;
mod service;

pub use model::{Credentials, RegistrationData, User};
pub use service::AuthService;
