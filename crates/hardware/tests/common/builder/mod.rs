//! Instruction word encoders.

/// Raw MIPS32 encodings by format, plus named helpers.
pub mod instruction;
