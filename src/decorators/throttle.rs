//! Rate-limiting decorator.

use crate::core::{BoxedState, Clock, SharedClock, State, StateMachine};

/// Runs the wrapped state at most once per `interval_ms`.
///
/// A tick fires when `now >= last_fired + interval_ms`; the first tick always
/// fires. Firing resets the window to the firing time, so irregular ticks do
/// not snap to a fixed grid. Suppressed ticks have no effect at all.
pub struct Throttle<C> {
    clock: SharedClock,
    interval_ms: u64,
    inner: BoxedState<C>,
    last_fired: Option<u64>,
}

impl<C> Throttle<C> {
    pub fn new<S>(clock: SharedClock, interval_ms: u64, inner: S) -> Self
    where
        S: State<C> + 'static,
    {
        Self {
            clock,
            interval_ms,
            inner: inner.boxed(),
            last_fired: None,
        }
    }

    fn is_due(&self, now: u64) -> bool {
        match self.last_fired {
            None => true,
            Some(last) => now >= last.saturating_add(self.interval_ms),
        }
    }
}

impl<C: 'static> State<C> for Throttle<C> {
    fn on_tick(&mut self, machine: &mut StateMachine<C>) {
        let now = self.clock.now_ms();
        if !self.is_due(now) {
            tracing::trace!(
                now,
                interval_ms = self.interval_ms,
                "throttled tick suppressed"
            );
            return;
        }

        tracing::debug!(now, inner = self.inner.name(), "throttle fired");
        self.last_fired = Some(now);
        self.inner.on_tick(machine);
    }

    fn name(&self) -> &'static str {
        "Throttle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::from_fn;
    use crate::core::{Clock, ManualClock};

    #[derive(Default)]
    struct Ctx {
        fired_at: Vec<u64>,
    }

    fn recorder(clock: &ManualClock) -> impl State<Ctx> + 'static {
        let clock = clock.clone();
        from_fn("Recorder", move |m: &mut StateMachine<Ctx>| {
            m.context_mut().fired_at.push(clock.now_ms());
        })
    }

    fn run(interval: u64, times: &[u64]) -> Vec<u64> {
        let clock = ManualClock::new();
        let throttle = Throttle::new(clock.shared(), interval, recorder(&clock));
        let mut machine = StateMachine::new(Ctx::default(), throttle);
        for &t in times {
            clock.set(t);
            machine.tick();
        }
        machine.into_context().fired_at
    }

    #[test]
    fn fires_on_inclusive_boundary() {
        assert_eq!(run(100, &[0, 50, 100, 150]), vec![0, 100]);
    }

    #[test]
    fn first_tick_always_fires() {
        assert_eq!(run(u64::MAX, &[0]), vec![0]);
        assert_eq!(run(1_000, &[7]), vec![7]);
    }

    #[test]
    fn window_resets_to_firing_time() {
        assert_eq!(run(100, &[0, 130, 200, 230, 329, 330]), vec![0, 130, 230, 330]);
    }

    #[test]
    fn zero_interval_fires_every_tick() {
        assert_eq!(run(0, &[0, 0, 1]), vec![0, 0, 1]);
    }

    #[test]
    fn suppressed_tick_leaves_timer_alone() {
        let clock = ManualClock::new();
        let mut throttle: Throttle<Ctx> = Throttle::new(clock.shared(), 100, recorder(&clock));
        let idle = from_fn("Idle", |_: &mut StateMachine<Ctx>| {});
        let mut machine = StateMachine::new(Ctx::default(), idle);

        throttle.on_tick(&mut machine);
        clock.set(60);
        throttle.on_tick(&mut machine);

        assert_eq!(throttle.last_fired, Some(0));
        assert_eq!(machine.context().fired_at, vec![0]);
    }

    #[test]
    fn wraps_other_decorators() {
        use crate::decorators::Delay;

        let clock = ManualClock::new();
        let delay = Delay::new(clock.shared(), 10, recorder(&clock));
        let throttle = Throttle::new(clock.shared(), 5, delay).boxed();
        let mut machine = StateMachine::new(Ctx::default(), throttle);

        machine.tick();
        clock.set(11);
        let result = machine.tick();

        assert_eq!(
            result,
            crate::core::TickResult::Transitioned {
                from: "Throttle",
                to: "Recorder"
            }
        );
        assert!(machine.context().fired_at.is_empty());
    }
}
