//! Ember Player - scripted demo embedder for the Ember loop
//!
//! Assembles a small layered-state game (title screen, start banner, in-game
//! movement and shooting) on a headless stage, and replays a deterministic
//! input script through it.

mod config;
mod game;

pub use config::PlayerConfig;
pub use game::{install, new_scheduler};
