//! Bounded-duration watchdog with a fallback state.

use crate::core::{BoxedState, Clock, SharedClock, State, StateMachine};

/// Lets the wrapped state run for at most `max_duration_ms`, then replaces
/// it with the recovery state.
///
/// The clock starts on the first tick, i.e. once the decorator is actually
/// running as (part of) the current state. While `now <= started_at +
/// max_duration_ms` every tick is delegated to the wrapped state; past that
/// the machine is moved to the recovery state and the wrapped state is
/// abandoned for good.
///
/// Elapsed time is only checked between ticks. A long `on_tick` in the
/// wrapped state is never interrupted.
pub struct Recovery<C> {
    clock: SharedClock,
    max_duration_ms: u64,
    inner: BoxedState<C>,
    recovery: Option<BoxedState<C>>,
    started_at: Option<u64>,
}

impl<C> Recovery<C> {
    pub fn new<S, R>(clock: SharedClock, max_duration_ms: u64, recovery: R, inner: S) -> Self
    where
        S: State<C> + 'static,
        R: State<C> + 'static,
    {
        Self {
            clock,
            max_duration_ms,
            inner: inner.boxed(),
            recovery: Some(recovery.boxed()),
            started_at: None,
        }
    }

    /// Two-level recovery: `recovery` is itself guarded for another
    /// `max_duration_ms` and falls back to `secondary` if it overruns too.
    pub fn nested<S, R, T>(
        clock: SharedClock,
        max_duration_ms: u64,
        recovery: R,
        secondary: T,
        inner: S,
    ) -> Self
    where
        S: State<C> + 'static,
        R: State<C> + 'static,
        T: State<C> + 'static,
        C: 'static,
    {
        let guarded = Recovery::new(clock.clone(), max_duration_ms, secondary, recovery);
        Self::new(clock, max_duration_ms, guarded, inner)
    }
}

impl<C: 'static> State<C> for Recovery<C> {
    fn on_tick(&mut self, machine: &mut StateMachine<C>) {
        let now = self.clock.now_ms();
        let started_at = match self.started_at {
            Some(started_at) => started_at,
            None => {
                tracing::debug!(
                    now,
                    max_duration_ms = self.max_duration_ms,
                    inner = self.inner.name(),
                    "recovery watch started"
                );
                self.started_at = Some(now);
                now
            }
        };

        if now <= started_at.saturating_add(self.max_duration_ms) {
            self.inner.on_tick(machine);
            return;
        }

        // Only missing after a timeout, by which point this decorator is no
        // longer current.
        if let Some(recovery) = self.recovery.take() {
            tracing::warn!(
                max_duration_ms = self.max_duration_ms,
                elapsed_ms = now - started_at,
                abandoned = self.inner.name(),
                recovery = recovery.name(),
                "state overran its deadline, recovering"
            );
            machine.transition_to(recovery);
        }
    }

    fn name(&self) -> &'static str {
        "Recovery"
    }
}
