//! Meditation catalog access and the countdown player.

mod library;
mod player;

pub use library::{LibraryEntry, MeditationLibrary};
pub use player::{MeditationPlayer, PlaybackState, PlayerStatus};
