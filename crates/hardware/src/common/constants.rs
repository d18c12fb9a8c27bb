//! Global ISA Constants.
//!
//! This module defines constants shared across the instruction-set core. It includes:
//! 1. **Word Constants:** Instruction and data word sizes.
//! 2. **Register Constants:** Register counts and float bank geometry.
//! 3. **Memory Constants:** Page sizes and masks used by the flat RAM model.
//! 4. **Control Constants:** Jump region masks and FCSR condition-code layout.

/// Size of a MIPS32 instruction (and data word) in bytes.
pub const WORD_SIZE: u32 = 4;

/// Number of general-purpose integer registers.
pub const NUM_GPRS: usize = 32;

/// Number of single-precision floating-point registers.
pub const NUM_FPRS: usize = 32;

/// Number of double-precision register pairs in the float bank.
pub const NUM_FPR_PAIRS: usize = NUM_FPRS / 2;

/// Size of the float register bank in bytes (32 x 32-bit slots).
pub const FPR_BANK_BYTES: usize = NUM_FPRS * 4;

/// Page size in bytes (4KB).
pub const PAGE_SIZE: u32 = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u32 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: u32 = PAGE_SIZE - 1;

/// Mask selecting the 256MB region a `j`/`jal` target stays inside.
pub const JUMP_REGION_MASK: u32 = 0xF000_0000;

/// Number of floating-point condition codes held in FCSR.
pub const NUM_FP_CONDITION_CODES: u32 = 8;

/// FCSR bit holding condition code 0.
pub const FCSR_CC0_BIT: u32 = 23;

/// FCSR bit holding condition code 1; codes 1..=7 occupy bits 25..=31.
pub const FCSR_CC1_BIT: u32 = 25;

/// Mask of the FCSR rounding-mode field (bits 1:0).
pub const FCSR_RM_MASK: u32 = 0x3;
