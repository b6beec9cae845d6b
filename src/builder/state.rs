//! Consuming builder that chains decorators around a state.

use crate::config::{into_result, ConfigError, TimingPolicy};
use crate::core::{BoxedState, SharedClock, State};
use crate::decorators::{Delay, Recovery, Throttle};
use std::rc::Rc;

/// Recovery targets used when applying a [`TimingPolicy`].
pub enum Fallback<C> {
    /// No recovery target; the policy must not set `recovery_ms`.
    None,
    /// Recover into one state.
    Single(BoxedState<C>),
    /// Recover into the first state, and from it into the second if it
    /// overruns as well.
    Nested(BoxedState<C>, BoxedState<C>),
}

impl<C> Fallback<C> {
    pub fn single<R>(recovery: R) -> Self
    where
        R: State<C> + 'static,
    {
        Self::Single(recovery.boxed())
    }

    pub fn nested<R, T>(recovery: R, secondary: T) -> Self
    where
        R: State<C> + 'static,
        T: State<C> + 'static,
    {
        Self::Nested(recovery.boxed(), secondary.boxed())
    }
}

/// Wraps a state in decorators, outside-in in call order.
///
/// Every combinator consumes the builder and returns a new one whose chain
/// wraps the previous one, so the state handed to [`new`](Self::new) can
/// never be reached from anywhere else. All timed decorators share the
/// builder's clock.
///
/// # Example
///
/// ```rust
/// use tickset::builder::{from_fn, StateBuilder};
/// use tickset::core::{ManualClock, State, StateMachine};
///
/// #[derive(Default)]
/// struct Ctx {
///     log: Vec<&'static str>,
/// }
///
/// fn visit(name: &'static str) -> impl State<Ctx> {
///     from_fn(name, move |m: &mut StateMachine<Ctx>| m.context_mut().log.push(name))
/// }
///
/// let clock = ManualClock::new();
/// let chain = StateBuilder::new(&clock.shared(), visit("work"))
///     .with_nested_recovery(3_000, visit("error"), visit("error"))
///     .throttled(100)
///     .delayed(1_000)
///     .build();
/// assert_eq!(chain.name(), "Delay");
///
/// let mut machine = StateMachine::new(Ctx::default(), chain);
/// machine.tick();
/// assert!(machine.context().log.is_empty());
///
/// clock.set(1_001);
/// machine.tick();
/// machine.tick();
/// assert_eq!(machine.context().log, vec!["work"]);
/// ```
///
/// A state cannot be wrapped twice:
///
/// ```compile_fail
/// use tickset::builder::{from_fn, StateBuilder};
/// use tickset::core::{ManualClock, StateMachine};
///
/// let clock = ManualClock::new().shared();
/// let work = from_fn("Work", |_: &mut StateMachine<()>| {});
///
/// let throttled = StateBuilder::new(&clock, work).throttled(100).build();
/// let delayed = StateBuilder::new(&clock, work).delayed(100).build();
/// ```
pub struct StateBuilder<C> {
    clock: SharedClock,
    state: BoxedState<C>,
}

impl<C: 'static> StateBuilder<C> {
    pub fn new<S>(clock: &SharedClock, state: S) -> Self
    where
        S: State<C> + 'static,
    {
        Self {
            clock: Rc::clone(clock),
            state: state.boxed(),
        }
    }

    /// Rate-limit the chain to one tick per `interval_ms`.
    pub fn throttled(self, interval_ms: u64) -> Self {
        let state = Throttle::new(Rc::clone(&self.clock), interval_ms, self.state).boxed();
        Self { state, ..self }
    }

    /// Keep the chain out of the machine until `delay_ms` after this call.
    pub fn delayed(self, delay_ms: u64) -> Self {
        let state = Delay::new(Rc::clone(&self.clock), delay_ms, self.state).boxed();
        Self { state, ..self }
    }

    /// Move to `recovery` if the chain runs longer than `max_duration_ms`.
    pub fn with_recovery<R>(self, max_duration_ms: u64, recovery: R) -> Self
    where
        R: State<C> + 'static,
    {
        let state =
            Recovery::new(Rc::clone(&self.clock), max_duration_ms, recovery, self.state).boxed();
        Self { state, ..self }
    }

    /// Like [`with_recovery`](Self::with_recovery), with `recovery` itself
    /// bounded by the same duration and falling back to `secondary`.
    pub fn with_nested_recovery<R, T>(
        self,
        max_duration_ms: u64,
        recovery: R,
        secondary: T,
    ) -> Self
    where
        R: State<C> + 'static,
        T: State<C> + 'static,
    {
        let state = Recovery::nested(
            Rc::clone(&self.clock),
            max_duration_ms,
            recovery,
            secondary,
            self.state,
        )
        .boxed();
        Self { state, ..self }
    }

    /// Apply every decorator a [`TimingPolicy`] sets: recovery, then
    /// throttle, then delay.
    pub fn with_policy(
        self,
        policy: &TimingPolicy,
        fallback: Fallback<C>,
    ) -> Result<Self, ConfigError> {
        into_result(policy.validate())?;

        let mut builder = match (policy.recovery_ms, fallback) {
            (None, _) => self,
            (Some(_), Fallback::None) => return Err(ConfigError::MissingFallback),
            (Some(ms), Fallback::Single(recovery)) => self.with_recovery(ms, recovery),
            (Some(ms), Fallback::Nested(recovery, secondary)) => {
                self.with_nested_recovery(ms, recovery, secondary)
            }
        };
        if let Some(ms) = policy.throttle_ms {
            builder = builder.throttled(ms);
        }
        if let Some(ms) = policy.delay_ms {
            builder = builder.delayed(ms);
        }
        Ok(builder)
    }

    /// Finish the chain.
    pub fn build(self) -> BoxedState<C> {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::from_fn;
    use crate::core::{ManualClock, StateMachine};

    #[derive(Default)]
    struct Ctx {
        log: Vec<&'static str>,
    }

    fn visit(name: &'static str) -> impl State<Ctx> + 'static {
        from_fn(name, move |m: &mut StateMachine<Ctx>| {
            m.context_mut().log.push(name);
        })
    }

    #[test]
    fn combinators_wrap_outside_in() {
        let clock = ManualClock::new().shared();
        let built = StateBuilder::new(&clock, visit("work"))
            .with_recovery(3_000, visit("error"))
            .throttled(100)
            .build();
        assert_eq!(built.name(), "Throttle");

        let built = StateBuilder::new(&clock, visit("work"))
            .throttled(100)
            .with_recovery(3_000, visit("error"))
            .build();
        assert_eq!(built.name(), "Recovery");

        let bare = StateBuilder::new(&clock, visit("work")).build();
        assert_eq!(bare.name(), "work");
    }

    #[test]
    fn empty_policy_leaves_state_bare() {
        let clock = ManualClock::new().shared();
        let built = StateBuilder::new(&clock, visit("work"))
            .with_policy(&TimingPolicy::default(), Fallback::None)
            .unwrap()
            .build();
        assert_eq!(built.name(), "work");
    }

    #[test]
    fn policy_recovery_requires_fallback() {
        let clock = ManualClock::new().shared();
        let policy = TimingPolicy {
            recovery_ms: Some(500),
            ..TimingPolicy::default()
        };
        let result =
            StateBuilder::new(&clock, visit("work")).with_policy(&policy, Fallback::None);
        assert!(matches!(result, Err(ConfigError::MissingFallback)));
    }

    #[test]
    fn policy_rejects_invalid_timings() {
        let clock = ManualClock::new().shared();
        let policy = TimingPolicy {
            throttle_ms: Some(0),
            ..TimingPolicy::default()
        };
        let result = StateBuilder::new(&clock, visit("work"))
            .with_policy(&policy, Fallback::single(visit("error")));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn policy_applies_delay_outermost() {
        let clock = ManualClock::new();
        let policy = TimingPolicy {
            recovery_ms: Some(50),
            throttle_ms: Some(10),
            delay_ms: Some(100),
        };
        let built = StateBuilder::new(&clock.shared(), visit("work"))
            .with_policy(&policy, Fallback::nested(visit("first"), visit("second")))
            .unwrap()
            .build();
        assert_eq!(built.name(), "Delay");

        let mut machine = StateMachine::new(Ctx::default(), built);
        clock.set(101);
        machine.tick();
        assert_eq!(machine.current_state().map(|s| s.name()), Some("Throttle"));

        machine.tick();
        clock.set(152);
        machine.tick();
        assert_eq!(machine.context().log, vec!["work"]);
        assert_eq!(machine.current_state().map(|s| s.name()), Some("Recovery"));
    }
}
