//! Meditation domain module.

mod model;
mod service;

pub use model::{Meditation, MeditationCategory, MeditationCompletion};
pub use service::MeditationService;
