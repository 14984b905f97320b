pub mod allocator;
pub mod distributions;
pub mod games;
