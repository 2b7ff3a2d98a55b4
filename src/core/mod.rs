//! Core domain models
//!
//! Steps, run state, errors and the configuration/context every step shares.

pub mod config;
pub mod context;
pub mod error;
pub mod state;
pub mod step;

pub use config::MigrationConfig;
pub use context::MigrationContext;
pub use error::MigrationError;
pub use state::*;
pub use step::*;
