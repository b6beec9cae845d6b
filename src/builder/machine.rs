//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::{into_result, MachineConfig};
use crate::core::{BoxedState, State, StateMachine};

/// Builder for constructing state machines with a fluent API.
///
/// Unlike [`StateMachine::new`], the builder validates its configuration and
/// reports missing pieces as errors.
///
/// # Example
///
/// ```rust
/// use tickset::builder::{from_fn, StateMachineBuilder};
/// use tickset::config::MachineConfig;
/// use tickset::core::StateMachine;
///
/// let machine = StateMachineBuilder::new()
///     .context(0u32)
///     .initial(from_fn("Count", |m: &mut StateMachine<u32>| *m.context_mut() += 1))
///     .config(MachineConfig { history_capacity: 4 })
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.history().capacity(), 4);
/// ```
pub struct StateMachineBuilder<C> {
    context: Option<C>,
    initial: Option<BoxedState<C>>,
    config: MachineConfig,
}

impl<C> StateMachineBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            context: None,
            initial: None,
            config: MachineConfig::default(),
        }
    }

    /// Set the context the machine will own (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the initial state (required).
    pub fn initial<S>(mut self, state: S) -> Self
    where
        S: State<C> + 'static,
    {
        self.initial = Some(state.boxed());
        self
    }

    /// Replace the default configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Shorthand for setting only the transition log size.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.config.history_capacity = capacity;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the configuration
    /// is invalid.
    pub fn build(self) -> Result<StateMachine<C>, BuildError>
    where
        C: 'static,
    {
        let context = self.context.ok_or(BuildError::MissingContext)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        into_result(self.config.validate())?;

        Ok(StateMachine::with_config(context, initial, &self.config))
    }
}

impl<C> Default for StateMachineBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
