//! Integration Tests Module
//!
//! End-to-end tests for the audit pipeline. Tests cover the orchestrator
//! state machine with both stages mocked, and the serialized shapes of the
//! records and reports the pipeline emits.

// Orchestrator lifecycle and failure-path tests
mod audit_flow_test;
