//! Session state store.
//!
//! - `store`: the mutable store driven by login/register/logout
//! - `handle`: read-only view handed to dependent stores

mod handle;
mod store;

pub use handle::SessionHandle;
pub use store::SessionStore;
