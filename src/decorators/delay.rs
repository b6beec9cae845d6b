//! One-shot activation gate.

use crate::core::{BoxedState, Clock, SharedClock, State, StateMachine};

/// Holds the wrapped state back until `delay_ms` has passed since the gate
/// was built, then installs it as the machine's current state.
///
/// Before the deadline a tick does nothing: the wrapped state is not run and
/// the context is untouched. Once `now > started_at + delay_ms` the gate hands
/// its state to the machine and is itself released by that transition.
pub struct Delay<C> {
    clock: SharedClock,
    delay_ms: u64,
    started_at: u64,
    inner: Option<BoxedState<C>>,
}

impl<C> Delay<C> {
    /// Build the gate. The delay window starts now, not on first tick.
    pub fn new<S>(clock: SharedClock, delay_ms: u64, inner: S) -> Self
    where
        S: State<C> + 'static,
    {
        let started_at = clock.now_ms();
        Self {
            clock,
            delay_ms,
            started_at,
            inner: Some(inner.boxed()),
        }
    }

    fn deadline(&self) -> u64 {
        self.started_at.saturating_add(self.delay_ms)
    }
}

impl<C: 'static> State<C> for Delay<C> {
    fn on_tick(&mut self, machine: &mut StateMachine<C>) {
        let now = self.clock.now_ms();
        if now <= self.deadline() {
            tracing::trace!(now, deadline = self.deadline(), "delay pending");
            return;
        }

        // The inner state is only missing once released, and a released gate
        // has already been replaced as current.
        if let Some(inner) = self.inner.take() {
            tracing::debug!(
                now,
                delay_ms = self.delay_ms,
                inner = inner.name(),
                "delay elapsed"
            );
            machine.transition_to(inner);
        }
    }

    fn name(&self) -> &'static str {
        "Delay"
    }
}
