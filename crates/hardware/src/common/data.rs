//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used by the core.
//! These types are used for the following:
//! 1. **Fault Reporting:** Telling fetch faults apart from data faults.
//! 2. **Diagnostics:** Rendering readable fault messages.

use std::fmt;

/// Type of memory access operation.
///
/// Used to distinguish between instruction fetches, data loads, and data stores
/// when a memory access faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Occurs when the decoder reads the word at a program counter.
    Fetch,

    /// Data read access.
    ///
    /// Occurs during load instructions when reading data from memory into registers.
    Read,

    /// Data write access.
    ///
    /// Occurs during store instructions when writing data from registers to memory.
    Write,
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
