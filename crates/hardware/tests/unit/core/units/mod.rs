//! # Execution Unit Tests
//!
//! Each unit is driven through whole instructions on a hart, so the decode
//! payloads and the unit semantics are checked together.

/// Integer arithmetic, overflow policy, `hi`/`lo`, and traps.
pub mod alu;

/// Branches, jumps, and the delay slot.
pub mod bru;

/// Float arithmetic, compares, conversions, and CP1 moves.
pub mod fpu;
