//! Behavior decorators.
//!
//! Each decorator wraps exactly one state (recovery also owns its fallback)
//! and changes when or whether that state runs, without touching its logic:
//!
//! - [`Throttle`] rate-limits how often the wrapped state is ticked
//! - [`Delay`] keeps the wrapped state out of the machine until a fixed
//!   time after construction, then installs it
//! - [`Recovery`] bounds how long the wrapped state may run before the
//!   machine is moved to a fallback
//!
//! Decorators read time through a [`crate::core::SharedClock`] and never
//! advance it. Use [`crate::builder::StateBuilder`] to chain them.

mod delay;
mod recovery;
mod throttle;

pub use delay::Delay;
pub use recovery::Recovery;
pub use throttle::Throttle;
