//! Repository functions for domain layer.

pub mod distributions;
pub mod games;
