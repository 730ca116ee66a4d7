//! Core module - infrastructure shared by the whole service
//!
//! - Configuration
//! - Error handling
//! - Application state
//! - Merge-patch engine

pub mod config;
pub mod error;
pub mod patch;
pub mod state;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;
