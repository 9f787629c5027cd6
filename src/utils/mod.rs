//! Utility Module
//!
//! - [`Timer`]: frame delta and elapsed time tracking

pub mod time;

pub use time::Timer;
