//! Observability: structured logging setup and decision metrics.
//!
//! Library code only emits `tracing` events and `metrics` counters; installing
//! a subscriber is left to the binary (see [`init_tracing`]).

pub mod metrics;
#[cfg(feature = "cli")]
mod tracing_init;

#[cfg(feature = "cli")]
pub use tracing_init::*;
