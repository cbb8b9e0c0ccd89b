//! Competition Timer - round timer and team scoreboard server
//!
//! This library provides the countdown state machine driving the on-screen
//! round clock, the team repositories for FIRST LEGO League and Robofest
//! scoring, and the HTTP API tying both to the browser display.

pub mod api;
pub mod config;
pub mod error;
pub mod repository;
pub mod services;
pub mod state;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::AppError;
pub use state::{AppOptions, AppState};
pub use timer::TimerController;
pub use utils::signals::shutdown_signal;
