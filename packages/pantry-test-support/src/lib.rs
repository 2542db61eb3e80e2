//! Shared helpers for the pantry API test suites.
//!
//! Logging bootstrap and problem-details assertions live here so that both the
//! library's unit tests and the integration test binaries can use them without
//! depending on backend types.

pub mod logging;
pub mod problem_details;
