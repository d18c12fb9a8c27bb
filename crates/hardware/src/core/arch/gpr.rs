//! MIPS32 General-Purpose Register File.
//!
//! This module implements the integer register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`$0`-`$31`).
//! 2. **Zero Register:** Stores writes to `$zero` like any other register; the
//!    dynamic instruction wrapper clears it before every execute.
//! 3. **Debugging:** Provides utilities for dumping the complete register state.

use tracing::debug;

use crate::common::constants::NUM_GPRS;
use crate::isa::abi::REG_NAMES;

/// General-Purpose Register file.
///
/// Contains 32 general-purpose registers used for integer operations. Indexing
/// past register 31 is a decoder bug and panics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntRegisterFile {
    regs: [u32; NUM_GPRS],
}

impl IntRegisterFile {
    /// Creates a new general-purpose register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Returns
    ///
    /// The 32-bit value stored in the specified register.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        self.regs[idx]
    }

    /// Writes a value to a general-purpose register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The 32-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        self.regs[idx] = val;
    }

    /// Forces `$zero` back to 0.
    #[inline]
    pub fn clear_zero(&mut self) {
        self.regs[0] = 0;
    }

    /// Dumps the contents of all general-purpose registers at `debug` level.
    ///
    /// Displays registers in pairs with hexadecimal formatting.
    pub fn dump(&self) {
        for i in (0..NUM_GPRS).step_by(2) {
            debug!(
                "{:>4}={:#010x} {:>4}={:#010x}",
                REG_NAMES[i],
                self.regs[i],
                REG_NAMES[i + 1],
                self.regs[i + 1]
            );
        }
    }
}
