//! Web boundary helpers shared by middleware and error rendering.

pub mod timestamps;
pub mod trace_ctx;
