//! MIPS32 Floating-Point Register File.
//!
//! This module implements the coprocessor-1 register bank. It performs the following:
//! 1. **Storage:** One 128-byte little-endian buffer backs all 32 registers.
//! 2. **Aliasing:** Four typed views over that buffer: 32 singles, 32 raw words,
//!    16 doubles, 16 raw doublewords. Double and doubleword accessors take a
//!    single-register index and address the pair at `reg / 2`, so `$f4` and `$f5`
//!    together hold the double at index 4 (even register = low word).
//! 3. **Reinterpretation:** Every view is an explicit `to_bits`/`from_bits`
//!    conversion at a fixed byte offset.

use crate::common::constants::FPR_BANK_BYTES;

/// Floating-Point Register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloatRegisterFile {
    bank: [u8; FPR_BANK_BYTES],
}

impl Default for FloatRegisterFile {
    fn default() -> Self {
        Self {
            bank: [0; FPR_BANK_BYTES],
        }
    }
}

impl FloatRegisterFile {
    /// Creates a new floating-point register file with all registers zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte offset of single register `reg`.
    #[inline]
    const fn word_offset(reg: usize) -> usize {
        reg * 4
    }

    /// Byte offset of the double register pair containing `reg`.
    #[inline]
    const fn pair_offset(reg: usize) -> usize {
        (reg / 2) * 8
    }

    /// Reads a register as its raw 32-bit pattern.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register index (0-31).
    pub fn get_uint(&self, reg: usize) -> u32 {
        let o = Self::word_offset(reg);
        let b = &self.bank[o..o + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Writes a raw 32-bit pattern into a register.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register index (0-31).
    /// * `val` - Raw bits to store.
    pub fn set_uint(&mut self, reg: usize, val: u32) {
        let o = Self::word_offset(reg);
        self.bank[o..o + 4].copy_from_slice(&val.to_le_bytes());
    }

    /// Reads a register as an IEEE-754 single.
    pub fn get_float(&self, reg: usize) -> f32 {
        f32::from_bits(self.get_uint(reg))
    }

    /// Writes an IEEE-754 single into a register.
    pub fn set_float(&mut self, reg: usize, val: f32) {
        self.set_uint(reg, val.to_bits());
    }

    /// Reads the register pair holding `reg` as a raw 64-bit pattern.
    ///
    /// # Arguments
    ///
    /// * `reg` - Single-register index (0-31); the pair at `reg / 2` is read.
    pub fn get_ulong(&self, reg: usize) -> u64 {
        let o = Self::pair_offset(reg);
        let b = &self.bank[o..o + 8];
        u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// Writes a raw 64-bit pattern into the register pair holding `reg`.
    pub fn set_ulong(&mut self, reg: usize, val: u64) {
        let o = Self::pair_offset(reg);
        self.bank[o..o + 8].copy_from_slice(&val.to_le_bytes());
    }

    /// Reads the register pair holding `reg` as an IEEE-754 double.
    pub fn get_double(&self, reg: usize) -> f64 {
        f64::from_bits(self.get_ulong(reg))
    }

    /// Writes an IEEE-754 double into the register pair holding `reg`.
    pub fn set_double(&mut self, reg: usize, val: f64) {
        self.set_ulong(reg, val.to_bits());
    }
}
