//! Millisecond clock sources.
//!
//! The runtime never advances time itself. Every timed decorator reads
//! "now" through a [`SharedClock`] handed to it at construction, so hosts
//! can plug in a hardware timer and tests can drive time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic, non-decreasing millisecond counter.
///
/// Any `Fn() -> u64` closure is a clock, which keeps embedding a
/// platform `millis()` function a one-liner.
///
/// # Example
///
/// ```rust
/// use tickset::core::Clock;
///
/// let fixed = || 42u64;
/// assert_eq!(fixed.now_ms(), 42);
/// ```
pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now_ms(&self) -> u64 {
        self()
    }
}

/// Shared handle to a clock. Decorators hold one of these; none of them owns
/// the underlying source.
pub type SharedClock = Rc<dyn Clock>;

/// Monotonic wall-independent clock measuring milliseconds since creation.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Wrap a fresh system clock in a [`SharedClock`].
    pub fn shared() -> SharedClock {
        Rc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Hand-driven clock for deterministic tests and simulations.
///
/// Clones share the same counter, so a test keeps one handle and gives a
/// [`SharedClock`] view of it to the decorators under test. Time never moves
/// backwards: setting an earlier value is ignored.
///
/// # Example
///
/// ```rust
/// use tickset::core::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let shared = clock.shared();
///
/// clock.advance(250);
/// assert_eq!(shared.now_ms(), 250);
///
/// clock.set(100);
/// assert_eq!(shared.now_ms(), 250);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Start at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at an arbitrary time.
    pub fn starting_at(ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(ms)),
        }
    }

    /// Move time forward to `ms`. Earlier values are ignored.
    pub fn set(&self, ms: u64) {
        self.now.set(self.now.get().max(ms));
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// A [`SharedClock`] reading this counter.
    pub fn shared(&self) -> SharedClock {
        Rc::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
