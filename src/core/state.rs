//! The State trait implemented by leaf states and decorators alike.
//!
//! A state reacts to ticks. It may read and write the machine's context and
//! may ask the machine to install a different state; it never returns a value.

use super::machine::StateMachine;

/// Owning handle to a state of any concrete type.
pub type BoxedState<C> = Box<dyn State<C>>;

/// Trait for state machine states.
///
/// `on_tick` runs once per [`StateMachine::tick`] while the state is current,
/// or whenever a wrapping decorator chooses to delegate to it. Completion is
/// signalled through the context, which the caller's loop inspects.
///
/// States are owned exclusively: handing one to a decorator or to a machine
/// moves it, so a consumed state cannot be reused anywhere else.
///
/// # Example
///
/// ```rust
/// use tickset::core::{State, StateMachine};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// struct CountToThree;
///
/// impl State<Counter> for CountToThree {
///     fn on_tick(&mut self, machine: &mut StateMachine<Counter>) {
///         machine.context_mut().hits += 1;
///     }
///
///     fn name(&self) -> &'static str {
///         "CountToThree"
///     }
/// }
///
/// let mut machine = StateMachine::new(Counter::default(), CountToThree);
/// while machine.context().hits < 3 {
///     machine.tick();
/// }
/// assert_eq!(machine.ticks(), 3);
/// ```
pub trait State<C> {
    /// React to one tick.
    fn on_tick(&mut self, machine: &mut StateMachine<C>);

    /// Name used in logs and in the transition log.
    ///
    /// Defaults to the Rust type name.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Move this state behind an owning handle.
    fn boxed(self) -> BoxedState<C>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<C> State<C> for BoxedState<C> {
    fn on_tick(&mut self, machine: &mut StateMachine<C>) {
        (**self).on_tick(machine);
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn boxed(self) -> BoxedState<C> {
        self
    }
}

/// Leaf state backed by a closure.
///
/// Built with [`crate::builder::from_fn`].
pub struct FnState<F> {
    name: &'static str,
    handler: F,
}

impl<F> FnState<F> {
    pub fn new(name: &'static str, handler: F) -> Self {
        Self { name, handler }
    }
}

impl<C, F> State<C> for FnState<F>
where
    F: FnMut(&mut StateMachine<C>),
{
    fn on_tick(&mut self, machine: &mut StateMachine<C>) {
        (self.handler)(machine);
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Ctx {
        visits: Vec<&'static str>,
    }

    struct Named;

    impl State<Ctx> for Named {
        fn on_tick(&mut self, machine: &mut StateMachine<Ctx>) {
            machine.context_mut().visits.push("named");
        }

        fn name(&self) -> &'static str {
            "Named"
        }
    }

    struct Anonymous;

    impl State<Ctx> for Anonymous {
        fn on_tick(&mut self, _machine: &mut StateMachine<Ctx>) {}
    }

    #[test]
    fn default_name_is_type_name() {
        assert!(State::<Ctx>::name(&Anonymous).ends_with("Anonymous"));
    }

    #[test]
    fn boxed_state_keeps_name() {
        let boxed: BoxedState<Ctx> = Named.boxed();
        assert_eq!(boxed.name(), "Named");
    }

    #[test]
    fn boxing_a_boxed_state_does_not_nest() {
        let boxed: BoxedState<Ctx> = Named.boxed();
        let ptr = &*boxed as *const dyn State<Ctx> as *const ();
        let again = boxed.boxed();
        let again_ptr = &*again as *const dyn State<Ctx> as *const ();
        assert_eq!(ptr, again_ptr);
    }

    #[test]
    fn boxed_state_delegates_ticks() {
        let mut machine = StateMachine::new(Ctx::default(), Named.boxed());
        machine.tick();
        assert_eq!(machine.context().visits, vec!["named"]);
    }

    #[test]
    fn fn_state_runs_closure() {
        let state = FnState::new("closure", |machine: &mut StateMachine<Ctx>| {
            machine.context_mut().visits.push("closure");
        });
        assert_eq!(State::<Ctx>::name(&state), "closure");

        let mut machine = StateMachine::new(Ctx::default(), state);
        machine.tick();
        machine.tick();
        assert_eq!(machine.context().visits, vec!["closure", "closure"]);
    }
}
