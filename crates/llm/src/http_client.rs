//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with an optional
//! transport timeout.

use std::time::Duration;

/// Build a `reqwest::Client` with the resolved timeout configuration.
///
/// - `Some(timeout)` -> bound the whole request/response exchange
/// - `None` -> no client-side deadline (the single attempt may block on a
///   hung upstream until the OS gives up)
pub fn build_http_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder.build().expect("failed to build reqwest client")
}
