//! Common utilities and types used throughout the MIPS32 instruction-set core.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the core. It includes:
//! 1. **Constants:** Word sizes, register counts, page geometry, FCSR layout.
//! 2. **Memory Access:** Definitions for categorizing memory operations (Fetch/Read/Write).
//! 3. **Error Handling:** The fatal `SimError` and the `MemoryFault` it wraps.
//! 4. **Register Management:** The combined register file with its speculative shadow.

/// Common constants used throughout the core.
pub mod constants;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Combined register file implementation.
pub mod reg;

pub use data::AccessType;
pub use error::{FaultKind, MemoryFault, SimError, SimResult, UnimplementedGroup};
pub use reg::{ArchState, RegisterFile};
