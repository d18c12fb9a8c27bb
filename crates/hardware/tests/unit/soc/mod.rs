//! # Memory System Tests

/// Sparse RAM and the `Memory` trait defaults.
pub mod memory;
