//! Ember Core - Foundational types for the Ember loop
//!
//! This crate provides the core types that the other Ember crates depend on:
//! - `EntityId` - Stable entity identifiers (also used for unique-name suffixes)
//! - `Vec2`, `Color`, `TextAlign` - Playfield types
//! - Error types and Result alias

mod error;
mod id;
mod types;

pub use error::{EmberError, Result};
pub use id::EntityId;
pub use types::{Color, TextAlign, Vec2};
