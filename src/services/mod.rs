//! Services
//!
//! Business logic for the audit pipeline. Services own the network
//! boundaries and the state machine; models stay pure data.

pub mod analysis;
pub mod audit;
pub mod report;
pub mod telemetry;

pub use analysis::AnalysisClient;
pub use audit::AuditOrchestrator;
pub use telemetry::{PageSpeedClient, TelemetryConfig, TelemetryProvider};
