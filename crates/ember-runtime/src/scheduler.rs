//! FrameScheduler - drives one tick over states, timers and entities.
//!
//! Tick order is fixed: commit queued state transitions (firing enter hooks
//! for newly active states), advance timers, dispatch per-state updates,
//! move entities, then dispatch the draw passes. All mutation happens inside
//! `tick()`'s own call stack; the draw passes see the world read-only.

use crate::entity::EntitySpec;
use crate::frame::{Frame, TickControl, View};
use crate::hooks::HookTable;
use crate::registry::EntityRegistry;
use crate::stage::Stage;
use crate::state::StateMachine;
use crate::timer::TimerPool;
use ember_core::EntityId;

/// Owns the world (states, timers, entities), the hook table and the stage,
/// and advances them one tick at a time.
pub struct FrameScheduler<S: Stage> {
    states: StateMachine,
    timers: TimerPool,
    entities: EntityRegistry,
    hooks: HookTable,
    stage: S,
    ticks: u64,
}

impl<S: Stage> FrameScheduler<S> {
    pub fn new(stage: S) -> Self {
        Self {
            states: StateMachine::new(),
            timers: TimerPool::new(),
            entities: EntityRegistry::new(),
            hooks: HookTable::new(),
            stage,
            ticks: 0,
        }
    }

    /// Hook registration point. Setup-time only by construction: callbacks
    /// never get access to the table.
    pub fn hooks_mut(&mut self) -> &mut HookTable {
        &mut self.hooks
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn states(&self) -> &StateMachine {
        &self.states
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn timers(&self) -> &TimerPool {
        &self.timers
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Setup/between-tick conveniences. Mid-tick, use the `Frame` instead.

    pub fn add_state(&mut self, name: &str) {
        self.states.add_state(name);
    }

    pub fn set_state(&mut self, name: &str) {
        self.states.set_state(name);
    }

    pub fn remove_state(&mut self, name: &str) {
        self.states.remove_state(name);
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.states.is_active(name)
    }

    pub fn spawn(&mut self, spec: EntitySpec) -> EntityId {
        self.entities.spawn(spec)
    }

    pub fn remove_entities(&mut self, prefix: Option<&str>, class: u32) {
        self.entities.remove_all(prefix, class);
    }

    pub fn schedule_timer(
        &mut self,
        ticks: u32,
        one_shot: bool,
        bound_state: &str,
        alarm: impl FnMut(&mut Frame<'_>) + 'static,
    ) {
        self.timers.schedule(ticks, one_shot, bound_state, alarm);
    }

    /// Run exactly one logical frame.
    pub fn tick(&mut self) {
        let mut control = TickControl::default();
        log::trace!("tick {}", self.ticks);

        // 1. Commit queued transitions; expire state-scoped entities; fire
        //    enter hooks for newly active states in request order.
        let (entered, exited) = self.states.commit();
        if !exited.is_empty() {
            self.entities.remove_expired(&exited);
        }
        for name in &entered {
            if let Some(hook) = self.hooks.state_mut(name).and_then(|h| h.on_enter.as_mut()) {
                let mut frame = Frame::new(
                    &mut self.stage,
                    &mut self.states,
                    &mut self.timers,
                    &mut self.entities,
                    &mut control,
                );
                hook(&mut frame);
            }
        }

        // 2. Timers: silently cancel those bound to inactive states, then
        //    advance and fire due alarms in registration order.
        self.timers.cancel_unbound(&self.states);
        for index in self.timers.advance() {
            if let Some(mut alarm) = self.timers.take_alarm(index) {
                let mut frame = Frame::new(
                    &mut self.stage,
                    &mut self.states,
                    &mut self.timers,
                    &mut self.entities,
                    &mut control,
                );
                alarm(&mut frame);
                self.timers.settle(index, alarm);
            }
        }
        self.timers.sweep();

        // 3. Per-state updates, in activation order over a snapshot: states
        //    requested during this tick are not visible until next commit.
        let active: Vec<String> = self.states.active_states().to_vec();
        for name in &active {
            if let Some(hook) = self.hooks.state_mut(name).and_then(|h| h.on_update.as_mut()) {
                let mut frame = Frame::new(
                    &mut self.stage,
                    &mut self.states,
                    &mut self.timers,
                    &mut self.entities,
                    &mut control,
                );
                hook(&mut frame);
            }
        }

        // 4. Bulk move pass, unless an update hook short-circuited it. The
        //    skip pauses movement only: draw passes below still run.
        if !control.skip_move {
            self.run_move_pass(None, 0, &mut control);
        }

        // 5. Per-state draw hooks over a read-only view.
        for name in &active {
            if let Some(hook) = self.hooks.state_mut(name).and_then(|h| h.on_draw.as_mut()) {
                let view = View::new(&self.states, &self.entities);
                hook(&view, &mut self.stage);
            }
        }

        // 6. Per-entity draw hooks, in registration order.
        for entity in self.entities.iter() {
            if let Some(hook) = self
                .hooks
                .kind_mut(entity.kind())
                .and_then(|k| k.on_draw.as_mut())
            {
                hook(entity, &mut self.stage);
            }
        }

        self.ticks += 1;
    }

    /// Filtered move pass: for every entity whose name starts with `prefix`
    /// (`None` = all) and whose collision class equals `class` (0 = all),
    /// run its move hook, then apply `pos += vel`. Entities spawned during
    /// the pass are not visited until the next pass.
    pub fn move_entities(&mut self, prefix: Option<&str>, class: u32) {
        let mut control = TickControl::default();
        self.run_move_pass(prefix, class, &mut control);
    }

    fn run_move_pass(&mut self, prefix: Option<&str>, class: u32, control: &mut TickControl) {
        self.entities.begin_pass();
        let count = self.entities.slot_count();
        for index in 0..count {
            let Some(mut entity) = self.entities.take_slot(index) else {
                continue;
            };
            if !entity.matches(prefix, class) {
                self.entities.put_back(index, entity);
                continue;
            }
            if let Some(hook) = self
                .hooks
                .kind_mut(entity.kind())
                .and_then(|k| k.on_move.as_mut())
            {
                let mut frame = Frame::new(
                    &mut self.stage,
                    &mut self.states,
                    &mut self.timers,
                    &mut self.entities,
                    control,
                );
                hook(&mut entity, &mut frame);
            }
            entity.apply_velocity();
            self.entities.put_back(index, entity);
        }
        self.entities.end_pass();
    }
}
