//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod analysis;
pub mod audit;
pub mod telemetry;

pub use analysis::*;
pub use audit::*;
pub use telemetry::*;
