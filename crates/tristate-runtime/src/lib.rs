#![forbid(unsafe_code)]

//! Tristate runtime
//!
//! Single-threaded, deterministic scheduling for controls that must defer
//! work past the current event dispatch.
//!
//! # Key Components
//!
//! - [`DeferredQueue`] - microtask FIFO plus timers on a virtual clock
//! - [`Pending`] - queue depth snapshot
//! - [`TimerId`] - handle for a scheduled timer

pub mod deferred;

pub use deferred::{DeferredQueue, Pending, TimerId};
