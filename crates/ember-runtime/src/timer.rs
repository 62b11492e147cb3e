//! Tick-counted timers bound to named states.
//!
//! Timers carry no wall-clock dependency: one `advance` equals one tick, so
//! behavior is deterministic under frame skip. A timer bound to a state that
//! is inactive when the pool advances is removed silently — no alarm fires.

use crate::frame::Frame;
use crate::state::StateMachine;

/// Alarm callback invoked when a timer's countdown reaches zero.
pub type AlarmFn = Box<dyn FnMut(&mut Frame<'_>)>;

struct Timer {
    remaining: u32,
    interval: u32,
    one_shot: bool,
    bound_state: String,
    /// Taken out of the slot while the alarm runs, so the alarm may freely
    /// schedule new timers through its `Frame`.
    alarm: Option<AlarmFn>,
    fired: bool,
}

/// Registration-ordered pool of running timers.
///
/// Same-tick expiries fire in registration order. One-shot timers are removed
/// after firing; repeating timers reset to their original countdown.
#[derive(Default)]
pub struct TimerPool {
    timers: Vec<Timer>,
}

impl TimerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a running timer.
    ///
    /// `ticks` is the number of advances until the alarm; `bound_state` ties
    /// the timer's life to that state — if the state goes inactive first, the
    /// timer is dropped without firing.
    pub fn schedule(
        &mut self,
        ticks: u32,
        one_shot: bool,
        bound_state: &str,
        alarm: impl FnMut(&mut Frame<'_>) + 'static,
    ) {
        log::trace!(
            "timer scheduled: {} ticks, one_shot={}, bound to {:?}",
            ticks,
            one_shot,
            bound_state
        );
        self.timers.push(Timer {
            remaining: ticks,
            interval: ticks,
            one_shot,
            bound_state: bound_state.to_string(),
            alarm: Some(Box::new(alarm)),
            fired: false,
        });
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drop every timer whose bound state is not currently active.
    pub(crate) fn cancel_unbound(&mut self, states: &StateMachine) {
        let before = self.timers.len();
        self.timers.retain(|t| states.is_active(&t.bound_state));
        let cancelled = before - self.timers.len();
        if cancelled > 0 {
            log::debug!("cancelled {} timer(s) with inactive bound state", cancelled);
        }
    }

    /// Decrement every registered timer by one tick and return the indices
    /// that reached zero, in registration order.
    ///
    /// The list is snapshotted before any alarm runs: timers scheduled from
    /// inside an alarm start counting on the next tick.
    pub(crate) fn advance(&mut self) -> Vec<usize> {
        let mut due = Vec::new();
        for (i, timer) in self.timers.iter_mut().enumerate() {
            timer.remaining = timer.remaining.saturating_sub(1);
            if timer.remaining == 0 {
                timer.fired = true;
                due.push(i);
            }
        }
        due
    }

    /// Take ownership of a due timer's alarm so it can be invoked without
    /// holding a borrow on the pool.
    pub(crate) fn take_alarm(&mut self, index: usize) -> Option<AlarmFn> {
        self.timers.get_mut(index).and_then(|t| t.alarm.take())
    }

    /// Return an alarm after invocation. Repeating timers get their alarm
    /// back and reset to the original countdown; one-shot timers stay spent
    /// until [`sweep`](Self::sweep).
    pub(crate) fn settle(&mut self, index: usize, alarm: AlarmFn) {
        let Some(timer) = self.timers.get_mut(index) else {
            return;
        };
        if timer.one_shot {
            log::debug!("one-shot timer for {:?} fired", timer.bound_state);
        } else {
            timer.alarm = Some(alarm);
            timer.remaining = timer.interval;
            timer.fired = false;
        }
    }

    /// Remove spent one-shot timers.
    pub(crate) fn sweep(&mut self) {
        self.timers.retain(|t| !(t.one_shot && t.fired));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> impl FnMut(&mut Frame<'_>) + 'static {
        |_frame| {}
    }

    #[test]
    fn advance_counts_down_and_reports_due() {
        let mut pool = TimerPool::new();
        pool.schedule(3, true, "S", noop());

        assert!(pool.advance().is_empty());
        assert!(pool.advance().is_empty());
        assert_eq!(pool.advance(), vec![0]);
    }

    #[test]
    fn due_timers_fire_in_registration_order() {
        let mut pool = TimerPool::new();
        pool.schedule(1, true, "S", noop());
        pool.schedule(2, true, "S", noop());
        pool.schedule(1, true, "S", noop());

        assert_eq!(pool.advance(), vec![0, 2]);
    }

    #[test]
    fn sweep_removes_spent_one_shots_only() {
        let mut pool = TimerPool::new();
        pool.schedule(1, true, "S", noop());
        pool.schedule(1, false, "S", noop());

        for index in pool.advance() {
            let alarm = pool.take_alarm(index).unwrap();
            pool.settle(index, alarm);
        }
        pool.sweep();

        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn repeating_timer_resets_to_original_interval() {
        let mut pool = TimerPool::new();
        pool.schedule(2, false, "S", noop());

        assert!(pool.advance().is_empty());
        let due = pool.advance();
        assert_eq!(due, vec![0]);
        let alarm = pool.take_alarm(0).unwrap();
        pool.settle(0, alarm);
        pool.sweep();

        // Counts a full interval again.
        assert!(pool.advance().is_empty());
        assert_eq!(pool.advance(), vec![0]);
    }

    #[test]
    fn cancel_unbound_drops_timers_for_inactive_states() {
        let mut states = StateMachine::new();
        states.add_state("Alive");
        states.commit();

        let mut pool = TimerPool::new();
        pool.schedule(5, true, "Alive", noop());
        pool.schedule(5, true, "Gone", noop());

        pool.cancel_unbound(&states);
        assert_eq!(pool.len(), 1);
    }
}
