//! Per-callback contexts: the mutable `Frame` and the read-only `View`.
//!
//! Update-side callbacks (enter, update, move, alarm) receive a `Frame` and
//! may request state transitions, schedule timers and spawn or remove
//! entities — all mutation funnels through the current `tick()` call stack.
//! Draw-side callbacks receive a `View`, which hands out shared references
//! only, so mutating world data from a draw callback does not compile.

use crate::entity::{Entity, EntitySpec};
use crate::registry::EntityRegistry;
use crate::stage::Stage;
use crate::state::StateMachine;
use crate::timer::TimerPool;
use ember_core::EntityId;
use winit::keyboard::KeyCode;

/// Per-tick control flags set by callbacks.
#[derive(Default)]
pub(crate) struct TickControl {
    pub skip_move: bool,
}

/// Mutable world access handed to update-side callbacks.
pub struct Frame<'a> {
    stage: &'a mut dyn Stage,
    states: &'a mut StateMachine,
    timers: &'a mut TimerPool,
    entities: &'a mut EntityRegistry,
    control: &'a mut TickControl,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(
        stage: &'a mut dyn Stage,
        states: &'a mut StateMachine,
        timers: &'a mut TimerPool,
        entities: &'a mut EntityRegistry,
        control: &'a mut TickControl,
    ) -> Self {
        Self {
            stage,
            states,
            timers,
            entities,
            control,
        }
    }

    // --- states ---

    /// Request `name` active starting next tick.
    pub fn add_state(&mut self, name: &str) {
        self.states.add_state(name);
    }

    /// Request `name` as the sole active state starting next tick.
    pub fn set_state(&mut self, name: &str) {
        self.states.set_state(name);
    }

    /// Request deactivation of `name` starting next tick.
    pub fn remove_state(&mut self, name: &str) {
        self.states.remove_state(name);
    }

    /// Committed active set (requests from this tick are not visible yet).
    pub fn is_active(&self, name: &str) -> bool {
        self.states.is_active(name)
    }

    // --- timers ---

    /// Register a timer. It starts counting on the next tick.
    pub fn schedule_timer(
        &mut self,
        ticks: u32,
        one_shot: bool,
        bound_state: &str,
        alarm: impl FnMut(&mut Frame<'_>) + 'static,
    ) {
        self.timers.schedule(ticks, one_shot, bound_state, alarm);
    }

    // --- entities ---

    /// Spawn an entity. During a move pass the new entity becomes visible
    /// only after the pass completes.
    pub fn spawn(&mut self, spec: EntitySpec) -> EntityId {
        self.entities.spawn(spec)
    }

    /// Remove entities by name prefix (`None` = all) and collision class
    /// (0 = all).
    pub fn remove_entities(&mut self, prefix: Option<&str>, class: u32) {
        self.entities.remove_all(prefix, class);
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    // --- stage ---

    pub fn stage(&mut self) -> &mut dyn Stage {
        &mut *self.stage
    }

    /// Instantaneous key-down state from the stage.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.stage.key_down(key)
    }

    /// Edge-trigger a key: it reads as up until released and pressed again.
    pub fn consume_key(&mut self, key: KeyCode) {
        self.stage.consume_key(key);
    }

    pub fn random_int(&mut self, min: i32, max: i32) -> i32 {
        self.stage.random_int(min, max)
    }

    // --- control ---

    /// Skip this tick's bulk move pass. Timers, state commits and the draw
    /// passes still run — this pauses movement, not the scheduler.
    pub fn skip_movement(&mut self) {
        self.control.skip_move = true;
    }
}

/// Read-only world snapshot handed to draw-side callbacks.
pub struct View<'a> {
    states: &'a StateMachine,
    entities: &'a EntityRegistry,
}

impl<'a> View<'a> {
    pub(crate) fn new(states: &'a StateMachine, entities: &'a EntityRegistry) -> Self {
        Self { states, entities }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.states.is_active(name)
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}
