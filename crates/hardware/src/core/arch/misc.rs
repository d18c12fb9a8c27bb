//! Miscellaneous Architectural Registers.
//!
//! Holds the registers that are neither general-purpose nor floating-point:
//! the multiply/divide result pair (`lo`, `hi`), the effective address of the
//! last memory operation (`ea`), and the floating-point control/status register
//! (`fcsr`) with its eight condition-code bits.

use crate::common::constants::{FCSR_CC0_BIT, FCSR_CC1_BIT, FCSR_RM_MASK};
use crate::isa::deps::MiscReg;

/// Miscellaneous register file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MiscRegisterFile {
    /// Low word of a multiply result, or a division quotient.
    pub lo: u32,
    /// High word of a multiply result, or a division remainder.
    pub hi: u32,
    /// Effective address computed by the last load or store.
    pub ea: u32,
    /// Floating-point control/status register.
    pub fcsr: u32,
}

/// Returns the FCSR bit position of condition code `cc` (0-7).
#[inline]
const fn fcc_bit(cc: u32) -> u32 {
    if cc == 0 {
        FCSR_CC0_BIT
    } else {
        FCSR_CC1_BIT + cc - 1
    }
}

impl MiscRegisterFile {
    /// Creates a misc register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a misc register by dependency index.
    pub const fn read(&self, reg: MiscReg) -> u32 {
        match reg {
            MiscReg::Lo => self.lo,
            MiscReg::Hi => self.hi,
            MiscReg::Ea => self.ea,
            MiscReg::Fcsr => self.fcsr,
        }
    }

    /// Writes a misc register by dependency index.
    pub const fn write(&mut self, reg: MiscReg, val: u32) {
        match reg {
            MiscReg::Lo => self.lo = val,
            MiscReg::Hi => self.hi = val,
            MiscReg::Ea => self.ea = val,
            MiscReg::Fcsr => self.fcsr = val,
        }
    }

    /// Returns floating-point condition code `cc`.
    ///
    /// # Arguments
    ///
    /// * `cc` - Condition code index (0-7). CC0 lives at FCSR bit 23,
    ///   CC1-CC7 at bits 25-31.
    #[inline]
    pub const fn fcc(&self, cc: u32) -> bool {
        (self.fcsr >> fcc_bit(cc)) & 1 != 0
    }

    /// Sets or clears floating-point condition code `cc`.
    #[inline]
    pub const fn set_fcc(&mut self, cc: u32, value: bool) {
        let bit = 1 << fcc_bit(cc);
        if value {
            self.fcsr |= bit;
        } else {
            self.fcsr &= !bit;
        }
    }

    /// Returns the FCSR rounding mode (0 nearest, 1 zero, 2 +inf, 3 -inf).
    #[inline]
    pub const fn rounding_mode(&self) -> u32 {
        self.fcsr & FCSR_RM_MASK
    }
}
