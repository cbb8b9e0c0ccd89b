//! Background tasks module
//!
//! This module contains background tasks that run alongside the HTTP server.

pub mod tick_driver;

// Re-export main items
pub use tick_driver::{tick_driver_task, IntervalScheduler, TICK_PERIOD};
