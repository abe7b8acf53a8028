//! Site Reporter - Website Audit Library
//!
//! Core library for the two-stage website audit pipeline. It includes:
//! - The audit orchestrator and its state machine
//! - Telemetry fetching and normalization (PageSpeed Insights)
//! - Schema-constrained analysis through a generative provider
//! - Report composition and shared data models

pub mod models;
pub mod services;
pub mod utils;

pub use models::analysis::{ActionItem, AnalysisResult};
pub use models::audit::{AuditReport, AuditState};
pub use models::telemetry::{Strategy, TelemetryRecord};
pub use services::{
    AnalysisClient, AuditOrchestrator, PageSpeedClient, TelemetryConfig, TelemetryProvider,
};
pub use utils::error::{AppError, AppResult};
