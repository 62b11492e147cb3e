//! Hook tables: capability dispatch for states and entity kinds.
//!
//! Per-state and per-entity behavior is a small set of function values keyed
//! by state name or entity kind, registered once at setup. The table is only
//! reachable through [`FrameScheduler::hooks_mut`](crate::FrameScheduler::hooks_mut),
//! never through a [`Frame`], so callbacks cannot rebind hooks mid-tick.

use crate::entity::Entity;
use crate::frame::{Frame, View};
use crate::stage::Stage;
use std::collections::HashMap;

/// Enter/update callback for a state.
pub type StateHook = Box<dyn FnMut(&mut Frame<'_>)>;
/// Draw callback for a state; receives a read-only world view.
pub type StateDrawHook = Box<dyn FnMut(&View<'_>, &mut dyn Stage)>;
/// Move callback for an entity kind; runs before `pos += vel` is applied.
pub type MoveHook = Box<dyn FnMut(&mut Entity, &mut Frame<'_>)>;
/// Draw callback for an entity kind; the entity is read-only here.
pub type EntityDrawHook = Box<dyn FnMut(&Entity, &mut dyn Stage)>;

#[derive(Default)]
pub(crate) struct StateHooks {
    pub on_enter: Option<StateHook>,
    pub on_update: Option<StateHook>,
    pub on_draw: Option<StateDrawHook>,
}

#[derive(Default)]
pub(crate) struct KindHooks {
    pub on_move: Option<MoveHook>,
    pub on_draw: Option<EntityDrawHook>,
}

/// Registry mapping state names and entity kinds to their callbacks.
#[derive(Default)]
pub struct HookTable {
    states: HashMap<String, StateHooks>,
    kinds: HashMap<String, KindHooks>,
}

impl HookTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires once when `state` becomes active, right after its activation
    /// commits, before timers and updates run.
    pub fn on_enter(&mut self, state: &str, f: impl FnMut(&mut Frame<'_>) + 'static) {
        self.states.entry(state.to_string()).or_default().on_enter = Some(Box::new(f));
    }

    /// Fires every tick while `state` is active, before entities move.
    pub fn on_update(&mut self, state: &str, f: impl FnMut(&mut Frame<'_>) + 'static) {
        self.states.entry(state.to_string()).or_default().on_update = Some(Box::new(f));
    }

    /// Fires every tick while `state` is active, during the draw pass.
    pub fn on_draw(&mut self, state: &str, f: impl FnMut(&View<'_>, &mut dyn Stage) + 'static) {
        self.states.entry(state.to_string()).or_default().on_draw = Some(Box::new(f));
    }

    /// Fires for each entity of `kind` visited by a move pass, before its
    /// velocity is applied to its position.
    pub fn on_move(&mut self, kind: &str, f: impl FnMut(&mut Entity, &mut Frame<'_>) + 'static) {
        self.kinds.entry(kind.to_string()).or_default().on_move = Some(Box::new(f));
    }

    /// Fires for each entity of `kind` during the draw pass.
    pub fn on_entity_draw(
        &mut self,
        kind: &str,
        f: impl FnMut(&Entity, &mut dyn Stage) + 'static,
    ) {
        self.kinds.entry(kind.to_string()).or_default().on_draw = Some(Box::new(f));
    }

    pub(crate) fn state_mut(&mut self, name: &str) -> Option<&mut StateHooks> {
        self.states.get_mut(name)
    }

    pub(crate) fn kind_mut(&mut self, kind: &str) -> Option<&mut KindHooks> {
        self.kinds.get_mut(kind)
    }
}
