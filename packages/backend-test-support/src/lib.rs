//! Backend test support utilities
//!
//! Shared helpers for the backend's unit and integration tests: unified
//! logging initialization, unique identifier generation and checks on the
//! problem+json error contract.

pub mod error_contract;
pub mod test_logging;
pub mod unique_helpers;
