//! Utility Module
//!
//! - [`time`]: frame timing for the external render loop

pub mod time;

pub use time::Timer;
