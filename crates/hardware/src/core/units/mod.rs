//! Execution units.
//!
//! Each unit is a set of free functions over a thread's architectural state,
//! called from [`StaticInst::execute`](crate::isa::instruction::StaticInst::execute).

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit for branches and jumps.
pub mod bru;

/// Floating-Point Unit (coprocessor 1).
pub mod fpu;

/// Load/Store Unit for memory access operations.
pub mod lsu;
