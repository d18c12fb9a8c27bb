//! ALU shift operations.
//!
//! Implements shift-left logical, shift-right logical, shift-right arithmetic,
//! and rotate-right. Shift amounts are masked to 5 bits (0-31): constant shifts
//! carry a 5-bit `sa` field and variable shifts use the low 5 bits of `rs`.

use crate::isa::instruction::ShiftOp;

/// Bit mask for a MIPS32 shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Shifts or rotates `value` by `amount`.
///
/// # Arguments
///
/// * `op` - The shift variant.
/// * `value` - The value to be shifted (`rt`).
/// * `amount` - Shift amount; only the low 5 bits are used.
pub const fn execute(op: ShiftOp, value: u32, amount: u32) -> u32 {
    let sh = amount & SHAMT_MASK;
    match op {
        ShiftOp::Sll => value << sh,
        ShiftOp::Srl => value >> sh,
        ShiftOp::Sra => ((value as i32) >> sh) as u32,
        ShiftOp::Rotr => value.rotate_right(sh),
    }
}
