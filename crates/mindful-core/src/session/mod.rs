//! Session domain module.

mod model;

pub use model::{AuthTransition, SessionState};
