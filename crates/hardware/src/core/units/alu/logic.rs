//! ALU logical, comparison, and bit-manipulation operations.
//!
//! Covers the bitwise operations, set-on-less-than, trap conditions, the
//! release-2 byte shuffles (`wsbh`, `seb`, `seh`), and the bit-field
//! extract/insert pair. The result of every comparison is 0 or 1.

use crate::isa::instruction::{ByteOp, TrapCond};

/// Signed less-than, as 0 or 1.
#[inline]
pub const fn slt(a: u32, b: u32) -> u32 {
    ((a as i32) < (b as i32)) as u32
}

/// Unsigned less-than, as 0 or 1.
#[inline]
pub const fn sltu(a: u32, b: u32) -> u32 {
    (a < b) as u32
}

/// Evaluates a trap condition.
pub const fn trap_taken(cond: TrapCond, a: u32, b: u32) -> bool {
    match cond {
        TrapCond::Ge => (a as i32) >= (b as i32),
        TrapCond::Geu => a >= b,
        TrapCond::Lt => (a as i32) < (b as i32),
        TrapCond::Ltu => a < b,
        TrapCond::Eq => a == b,
        TrapCond::Ne => a != b,
    }
}

/// Applies a byte or halfword shuffle.
pub const fn byte_op(op: ByteOp, value: u32) -> u32 {
    match op {
        ByteOp::Wsbh => ((value & 0x00ff_00ff) << 8) | ((value >> 8) & 0x00ff_00ff),
        ByteOp::Seb => value as u8 as i8 as i32 as u32,
        ByteOp::Seh => value as u16 as i16 as i32 as u32,
    }
}

/// Right-aligned mask of `size` ones, `size` in 1-32.
#[inline]
const fn low_mask(size: u32) -> u32 {
    u32::MAX >> (32 - size)
}

/// `ext`: extracts `size` bits of `value` starting at `pos`.
pub const fn extract(value: u32, pos: u32, size: u32) -> u32 {
    (value >> pos) & low_mask(size)
}

/// `ins`: replaces `size` bits of `target` starting at `pos` with the low bits of `value`.
pub const fn insert(target: u32, value: u32, pos: u32, size: u32) -> u32 {
    let mask = low_mask(size) << pos;
    (target & !mask) | ((value << pos) & mask)
}
