//! Greeting Flow
//!
//! Drives a small machine with the system clock:
//! - `Initial` greets and installs a decorated `Second` state
//! - the chain waits 1s, then ticks `Second` at most every 100ms, and falls
//!   back to `Error` (twice) if it runs past 3s
//! - `Second` hands over to `Final`, which completes the run
//!
//! Run with: RUST_LOG=tickset=debug cargo run --example greeting

use std::time::Duration;

use tickset::builder::StateBuilder;
use tickset::core::{SharedClock, State, StateMachine, SystemClock};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Default)]
struct GreetingContext {
    completed: bool,
}

struct ErrorState;

impl State<GreetingContext> for ErrorState {
    fn on_tick(&mut self, machine: &mut StateMachine<GreetingContext>) {
        if !machine.context().completed {
            tracing::error!("second state never finished");
            machine.context_mut().completed = true;
        }
    }

    fn name(&self) -> &'static str {
        "Error"
    }
}

struct FinalState;

impl State<GreetingContext> for FinalState {
    fn on_tick(&mut self, machine: &mut StateMachine<GreetingContext>) {
        if !machine.context().completed {
            tracing::info!("performing final work");
            machine.context_mut().completed = true;
        }
    }

    fn name(&self) -> &'static str {
        "Final"
    }
}

struct SecondState;

impl State<GreetingContext> for SecondState {
    fn on_tick(&mut self, machine: &mut StateMachine<GreetingContext>) {
        tracing::info!("performing second work");
        machine.transition_to(FinalState);
    }

    fn name(&self) -> &'static str {
        "Second"
    }
}

struct InitialState {
    clock: SharedClock,
}

impl State<GreetingContext> for InitialState {
    fn on_tick(&mut self, machine: &mut StateMachine<GreetingContext>) {
        tracing::info!("performing initial work");
        let next = StateBuilder::new(&self.clock, SecondState)
            .with_nested_recovery(3_000, ErrorState, ErrorState)
            .throttled(100)
            .delayed(1_000)
            .build();
        machine.transition_to(next);
    }

    fn name(&self) -> &'static str {
        "Initial"
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tickset=debug,greeting=info".into()),
        )
        .with(fmt::layer().with_target(false))
        .init();

    let clock = SystemClock::shared();
    let mut machine = StateMachine::new(GreetingContext::default(), InitialState { clock });

    while !machine.context().completed {
        machine.tick();
        std::thread::sleep(Duration::from_millis(10));
    }

    tracing::info!(
        ticks = machine.ticks(),
        path = ?machine.history().path(),
        "greeting flow complete"
    );
}
