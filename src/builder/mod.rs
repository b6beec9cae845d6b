//! Builder API for ergonomic machine and state-chain construction.
//!
//! - [`StateMachineBuilder`] validates configuration before creating a machine
//! - [`StateBuilder`] chains decorators around a state with consuming calls
//! - [`from_fn`] turns a closure into a leaf state

pub mod error;
pub mod machine;
pub mod state;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::{Fallback, StateBuilder};

use crate::core::{FnState, StateMachine};

/// Create a named leaf state from a closure.
///
/// # Example
///
/// ```
/// use tickset::builder::from_fn;
/// use tickset::core::{State, StateMachine};
///
/// let greet = from_fn("Greet", |m: &mut StateMachine<Vec<String>>| {
///     m.context_mut().push("hello".to_string());
/// });
/// assert_eq!(State::<Vec<String>>::name(&greet), "Greet");
///
/// let mut machine = StateMachine::new(Vec::new(), greet);
/// machine.tick();
/// assert_eq!(machine.context(), &vec!["hello".to_string()]);
/// ```
pub fn from_fn<C, F>(name: &'static str, handler: F) -> FnState<F>
where
    F: FnMut(&mut StateMachine<C>),
{
    FnState::new(name, handler)
}
