//! Game State Machine — layered named states with batched transitions.
//!
//! Any number of states may be active at once (e.g. "StartGame" layered over
//! "InGame"). Transition requests made mid-frame are queued and applied
//! atomically at the next tick boundary, so `is_active` always reflects the
//! committed set, never the queue. States are created on first reference and
//! never destroyed; only their active flag toggles.

/// A queued transition request, applied in request order at commit.
#[derive(Debug, Clone)]
enum Transition {
    Add(String),
    Remove(String),
    ReplaceAll(String),
}

/// Layered active-state set with a pending-transition queue.
///
/// The "next frame" semantics are an explicit data structure: mutators only
/// touch the queue, and [`FrameScheduler::tick`](crate::FrameScheduler::tick)
/// drains it exactly once per tick before any callback fires.
#[derive(Default)]
pub struct StateMachine {
    /// Committed active states, in activation order.
    active: Vec<String>,
    /// Requests queued since the last commit, in request order.
    pending: Vec<Transition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that `name` become active starting next tick.
    ///
    /// Idempotent: adding a state that is already active (or already queued)
    /// is a no-op at commit time.
    pub fn add_state(&mut self, name: &str) {
        self.pending.push(Transition::Add(name.to_string()));
    }

    /// Request that `name` become the sole active state starting next tick.
    ///
    /// Clears the whole active set before inserting, so a `set_state`
    /// followed by `add_state` in the same frame yields exactly those two
    /// states after commit.
    pub fn set_state(&mut self, name: &str) {
        self.pending.push(Transition::ReplaceAll(name.to_string()));
    }

    /// Request deactivation of `name` starting next tick.
    ///
    /// Timers bound to `name` are cancelled by the scheduler once the
    /// removal commits (they never fire).
    pub fn remove_state(&mut self, name: &str) {
        self.pending.push(Transition::Remove(name.to_string()));
    }

    /// Whether `name` is in the committed active set. Queued requests are
    /// not visible here until the next tick boundary.
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|s| s == name)
    }

    /// Committed active states in activation order.
    pub fn active_states(&self) -> &[String] {
        &self.active
    }

    /// Whether any transition requests are waiting for the next commit.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Apply all queued requests atomically.
    ///
    /// Returns `(entered, exited)`: states newly active after the commit (in
    /// request insertion order, which is also their activation order) and
    /// states that dropped out of the active set.
    pub(crate) fn commit(&mut self) -> (Vec<String>, Vec<String>) {
        if self.pending.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let before = self.active.clone();
        for transition in self.pending.drain(..) {
            match transition {
                Transition::Add(name) => {
                    if !self.active.iter().any(|s| s == &name) {
                        self.active.push(name);
                    }
                }
                Transition::Remove(name) => {
                    self.active.retain(|s| s != &name);
                }
                Transition::ReplaceAll(name) => {
                    self.active.clear();
                    self.active.push(name);
                }
            }
        }

        let entered: Vec<String> = self
            .active
            .iter()
            .filter(|s| !before.contains(s))
            .cloned()
            .collect();
        let exited: Vec<String> = before
            .into_iter()
            .filter(|s| !self.active.contains(s))
            .collect();

        if !entered.is_empty() || !exited.is_empty() {
            log::debug!("state commit: entered={:?} exited={:?}", entered, exited);
        }

        (entered, exited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_deferred_until_commit() {
        let mut sm = StateMachine::new();
        sm.add_state("Title");
        assert!(!sm.is_active("Title"));
        assert!(sm.has_pending());

        let (entered, exited) = sm.commit();
        assert!(sm.is_active("Title"));
        assert_eq!(entered, vec!["Title"]);
        assert!(exited.is_empty());
    }

    #[test]
    fn set_replaces_all_active() {
        let mut sm = StateMachine::new();
        sm.add_state("A");
        sm.add_state("B");
        sm.commit();

        sm.set_state("X");
        sm.commit();
        assert!(sm.is_active("X"));
        assert!(!sm.is_active("A"));
        assert!(!sm.is_active("B"));
        assert_eq!(sm.active_states(), ["X"]);
    }

    #[test]
    fn set_then_add_same_frame() {
        let mut sm = StateMachine::new();
        sm.add_state("Title");
        sm.commit();

        sm.set_state("StartGame");
        sm.add_state("InGame");
        let (entered, exited) = sm.commit();

        assert_eq!(sm.active_states(), ["StartGame", "InGame"]);
        assert_eq!(entered, vec!["StartGame", "InGame"]);
        assert_eq!(exited, vec!["Title"]);
    }

    #[test]
    fn add_is_idempotent() {
        let mut sm = StateMachine::new();
        sm.add_state("A");
        sm.add_state("A");
        let (entered, _) = sm.commit();
        assert_eq!(entered, vec!["A"]);

        sm.add_state("A");
        let (entered, exited) = sm.commit();
        assert!(entered.is_empty());
        assert!(exited.is_empty());
        assert_eq!(sm.active_states(), ["A"]);
    }

    #[test]
    fn remove_then_commit() {
        let mut sm = StateMachine::new();
        sm.add_state("A");
        sm.add_state("B");
        sm.commit();

        sm.remove_state("A");
        assert!(sm.is_active("A")); // still committed until the boundary
        let (entered, exited) = sm.commit();
        assert!(entered.is_empty());
        assert_eq!(exited, vec!["A"]);
        assert_eq!(sm.active_states(), ["B"]);
    }

    #[test]
    fn add_then_remove_same_frame_nets_out() {
        let mut sm = StateMachine::new();
        sm.add_state("A");
        sm.remove_state("A");
        let (entered, exited) = sm.commit();
        assert!(entered.is_empty());
        assert!(exited.is_empty());
        assert!(!sm.is_active("A"));
    }

    #[test]
    fn replace_with_already_active_state_is_not_an_enter() {
        let mut sm = StateMachine::new();
        sm.add_state("A");
        sm.add_state("B");
        sm.commit();

        sm.set_state("A");
        let (entered, exited) = sm.commit();
        assert!(entered.is_empty());
        assert_eq!(exited, vec!["B"]);
        assert_eq!(sm.active_states(), ["A"]);
    }

    #[test]
    fn empty_commit_is_a_no_op() {
        let mut sm = StateMachine::new();
        sm.add_state("A");
        sm.commit();
        let (entered, exited) = sm.commit();
        assert!(entered.is_empty());
        assert!(exited.is_empty());
    }
}
