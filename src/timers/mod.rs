//! Nested wall clock timers used to profile the updater.

#![allow(clippy::module_inception)]
mod timers;
pub use self::timers::Timers;
pub(crate) use self::timers::{notimeit, timeit};
