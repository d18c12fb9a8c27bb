//! MIPS o32 Application Binary Interface (ABI) register names.
//!
//! Defines the conventional names of the 32 integer registers and the indices
//! the syscall and calling conventions rely on.

/// Register `$0` (hardwired zero).
pub const REG_ZERO: usize = 0;
/// Register `$1` (assembler temporary, at).
pub const REG_AT: usize = 1;
/// Register `$2` (first return value and syscall number, v0).
pub const REG_V0: usize = 2;
/// Register `$3` (second return value, v1).
pub const REG_V1: usize = 3;
/// Register `$4` (first argument, a0).
pub const REG_A0: usize = 4;
/// Register `$7` (fourth argument, a3; syscall error flag).
pub const REG_A3: usize = 7;
/// Register `$28` (global pointer, gp).
pub const REG_GP: usize = 28;
/// Register `$29` (stack pointer, sp).
pub const REG_SP: usize = 29;
/// Register `$31` (return address, ra).
pub const REG_RA: usize = 31;

/// ABI register names for `$0`-`$31`.
pub const REG_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp", "s8",
    "ra",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("??")
}
