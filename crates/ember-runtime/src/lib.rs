//! Ember Runtime - State-driven frame scheduler and entity pipeline
//!
//! Provides the core tick loop building blocks:
//! - `StateMachine` — layered named states with batched (next-tick) transitions
//! - `TimerPool` — tick-counted one-shot and repeating timers bound to states
//! - `EntityRegistry` — registration-ordered entity pool with prefix and
//!   collision-class filtered move/remove passes
//! - `FrameScheduler` — drives one tick in a fixed order over all of the above
//! - `Stage` — the presentation-engine interface the core consumes
//! - `HeadlessStage` — in-memory stage for tests and scripted runs

mod entity;
mod frame;
mod headless;
mod hooks;
mod input;
mod registry;
mod scheduler;
mod stage;
mod state;
mod timer;

pub use entity::{Entity, EntitySpec};
pub use frame::{Frame, View};
pub use headless::{DrawCall, HeadlessStage};
pub use hooks::HookTable;
pub use input::InputState;
pub use registry::EntityRegistry;
pub use scheduler::FrameScheduler;
pub use stage::Stage;
pub use state::StateMachine;
pub use timer::TimerPool;

pub use winit::keyboard::KeyCode;
