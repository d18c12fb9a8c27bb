//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the MIPS32 field catalog, the decode tree, the static instruction
//! record, and the disassembler.
//!
//! # Layers
//!
//! * `bitfield` and `word`: named bit ranges and the raw 32-bit word.
//! * `decode`: word to [`StaticInst`](instruction::StaticInst), plus the PC-keyed cache.
//! * `instruction`: instruction kinds, flags, dependencies, and execution dispatch.
//! * `disasm`: text rendering for traces and diagnostics.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Named instruction fields and extraction.
pub mod bitfield;

/// Instruction decoding tree and decode cache.
pub mod decode;

/// Register dependency descriptors.
pub mod deps;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction property flags and functional-unit classes.
pub mod flags;

/// Static instruction records and execution dispatch.
pub mod instruction;

/// The raw machine word and its shape predicates.
pub mod word;
