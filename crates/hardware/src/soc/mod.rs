//! Memory system seen by the core.
//!
//! The core only talks to the [`Memory`](traits::Memory) trait; [`Ram`] is the
//! sparse implementation used by [`Hart`](crate::core::hart::Hart) and the tests.

/// Sparse page-mapped memory.
pub mod memory;

/// Memory trait definition.
pub mod traits;

pub use memory::Ram;
pub use traits::Memory;
