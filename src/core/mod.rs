//! Core runtime types.
//!
//! This module contains the machine driver and the pieces it is built from:
//! - The `State` trait every leaf and decorator implements
//! - The `StateMachine` that owns the context and the current state
//! - Clock sources consumed by the timed decorators
//! - A bounded transition log

mod clock;
mod history;
mod machine;
mod state;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use history::{TransitionLog, TransitionRecord};
pub use machine::{StateMachine, TickResult};
pub use state::{BoxedState, FnState, State};
