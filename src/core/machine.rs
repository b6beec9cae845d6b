//! Tick-driven state machine.

use super::history::{TransitionLog, TransitionRecord};
use super::state::{BoxedState, State};
use crate::config::MachineConfig;

/// Outcome of a single [`StateMachine::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// The current state stayed installed.
    Stayed,

    /// The current state requested a transition during the tick.
    Transitioned {
        from: &'static str,
        to: &'static str,
    },
}

/// Polling state machine.
///
/// Owns the application context and the root of the active state chain. The
/// caller decides the cadence: each call to [`tick`](Self::tick) runs the
/// current state exactly once.
///
/// # Example
///
/// ```rust
/// use tickset::builder::from_fn;
/// use tickset::core::{StateMachine, TickResult};
///
/// #[derive(Default)]
/// struct Ctx {
///     done: bool,
/// }
///
/// let start = from_fn("Start", |m: &mut StateMachine<Ctx>| {
///     m.transition_to(from_fn("Finish", |m: &mut StateMachine<Ctx>| {
///         m.context_mut().done = true;
///     }));
/// });
///
/// let mut machine = StateMachine::new(Ctx::default(), start);
/// assert_eq!(
///     machine.tick(),
///     TickResult::Transitioned { from: "Start", to: "Finish" }
/// );
/// assert!(!machine.context().done);
///
/// machine.tick();
/// assert!(machine.context().done);
/// ```
pub struct StateMachine<C> {
    context: C,
    current: Option<BoxedState<C>>,
    in_tick: bool,
    ticks: u64,
    history: TransitionLog,
}

impl<C> StateMachine<C> {
    /// Create a machine with the default configuration.
    pub fn new<S>(context: C, initial: S) -> Self
    where
        S: State<C> + 'static,
    {
        Self::with_config(context, initial, &MachineConfig::default())
    }

    /// Create a machine with an explicit configuration.
    ///
    /// The configuration is taken as-is; validate it first or go through
    /// [`crate::builder::StateMachineBuilder`].
    pub fn with_config<S>(context: C, initial: S, config: &MachineConfig) -> Self
    where
        S: State<C> + 'static,
    {
        Self {
            context,
            current: Some(initial.boxed()),
            in_tick: false,
            ticks: 0,
            history: TransitionLog::with_capacity(config.history_capacity),
        }
    }

    /// Run the current state once.
    ///
    /// A transition requested by the state is installed immediately and the
    /// outgoing state is released before this returns. The new state is not
    /// ticked until the next call.
    pub fn tick(&mut self) -> TickResult {
        if self.in_tick {
            tracing::warn!(tick = self.ticks, "re-entrant tick ignored");
            return TickResult::Stayed;
        }
        let Some(mut state) = self.current.take() else {
            return TickResult::Stayed;
        };

        self.ticks += 1;
        self.in_tick = true;
        tracing::trace!(tick = self.ticks, state = state.name(), "tick");
        state.on_tick(self);
        self.in_tick = false;

        match &self.current {
            None => {
                self.current = Some(state);
                TickResult::Stayed
            }
            Some(next) => {
                let from = state.name();
                let to = next.name();
                drop(state);
                self.record(from, to);
                TickResult::Transitioned { from, to }
            }
        }
    }

    /// Install `state` as the current state.
    ///
    /// Safe to call from inside `on_tick`. Called outside a tick, the
    /// previous state is released right away.
    pub fn transition_to<S>(&mut self, state: S)
    where
        S: State<C> + 'static,
    {
        let next = state.boxed();
        if self.in_tick {
            // Last request in a tick wins; the tick loop records it.
            self.current = Some(next);
            return;
        }

        let to = next.name();
        if let Some(previous) = self.current.replace(next) {
            let from = previous.name();
            drop(previous);
            self.record(from, to);
        }
    }

    /// The current state, or `None` while a tick is running it.
    pub fn current_state(&self) -> Option<&dyn State<C>> {
        self.current.as_deref()
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    /// Tear the machine down, releasing the state chain and returning the
    /// context.
    pub fn into_context(self) -> C {
        self.context
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Recent transitions, bounded by the configured capacity.
    pub fn history(&self) -> &TransitionLog {
        &self.history
    }

    fn record(&mut self, from: &'static str, to: &'static str) {
        tracing::debug!(tick = self.ticks, from, to, "transition");
        self.history.record(TransitionRecord {
            tick: self.ticks,
            from,
            to,
        });
    }
}

impl<C> std::fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current.as_ref().map(|s| s.name()))
            .field("ticks", &self.ticks)
            .field("transitions", &self.history.len())
            .finish()
    }
}
