//! Fine-grained reactivity for vuf forms
//!
//! A small Signal/Effect runtime with automatic dependency tracking, plus
//! [`SignalReactivity`], the adapter that lets the form engine store field
//! values in signals and watch them with effects.
//!
//! Effects run synchronously: `Signal::set` returns only after every dependent
//! effect has re-run.

pub mod adapter;
pub mod effect;
pub mod runtime;
pub mod signal;

pub use adapter::SignalReactivity;
pub use effect::Effect;
pub use runtime::{NodeId, untrack, with_runtime};
pub use signal::Signal;
