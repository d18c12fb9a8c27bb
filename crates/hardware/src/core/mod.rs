//! Core processor implementation.
//!
//! This module contains the architectural state, the execution units, and the
//! thread abstraction instructions execute against.

/// Architectural register files (integer, float, misc).
pub mod arch;

/// One fetched occurrence of a decoded instruction.
pub mod dynamic;

/// Functional hart driving the decoder and execution.
pub mod hart;

/// Thread context and syscall traits.
pub mod thread;

/// Execution units (ALU, BRU, FPU, LSU).
pub mod units;

pub use self::dynamic::DynamicInstruction;
pub use self::hart::Hart;
pub use self::thread::{SyscallHandler, Thread};
