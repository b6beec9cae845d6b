//! Tickset: a polling-driven state machine runtime
//!
//! A caller-owned loop repeatedly ticks a [`StateMachine`]; the current state
//! reacts and may ask for a transition. Three decorators change when or
//! whether a state runs without touching its logic, and chain in call order.
//!
//! # Core Concepts
//!
//! - **State**: anything implementing [`State`], reacting to one tick at a time
//! - **Machine**: owns the context and the current state chain
//! - **Decorators**: [`Throttle`], [`Delay`] and [`Recovery`]
//! - **Clock**: an external millisecond source the decorators read but never
//!   advance
//!
//! Everything is single-threaded and non-blocking. States are owned
//! exclusively: wrapping or installing one moves it.
//!
//! # Example
//!
//! ```rust
//! use tickset::builder::{from_fn, StateBuilder};
//! use tickset::core::{ManualClock, StateMachine};
//!
//! #[derive(Default)]
//! struct Ctx {
//!     completed: bool,
//!     log: Vec<&'static str>,
//! }
//!
//! let clock = ManualClock::new();
//! let shared = clock.shared();
//!
//! let work = from_fn("Work", |m: &mut StateMachine<Ctx>| {
//!     m.context_mut().log.push("work");
//!     m.transition_to(from_fn("Done", |m: &mut StateMachine<Ctx>| {
//!         m.context_mut().completed = true;
//!     }));
//! });
//! let error = from_fn("Error", |m: &mut StateMachine<Ctx>| {
//!     m.context_mut().log.push("error");
//!     m.context_mut().completed = true;
//! });
//!
//! let chain = StateBuilder::new(&shared, work)
//!     .with_recovery(3_000, error)
//!     .throttled(100)
//!     .delayed(1_000)
//!     .build();
//!
//! let mut machine = StateMachine::new(Ctx::default(), chain);
//! while !machine.context().completed {
//!     machine.tick();
//!     clock.advance(10);
//! }
//! assert_eq!(machine.context().log, vec!["work"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod decorators;

// Re-export commonly used types
pub use builder::{from_fn, BuildError, StateBuilder, StateMachineBuilder};
pub use config::{ConfigError, MachineConfig, TimingPolicy};
pub use crate::core::{
    BoxedState, Clock, ManualClock, SharedClock, State, StateMachine, SystemClock, TickResult,
};
pub use decorators::{Delay, Recovery, Throttle};
