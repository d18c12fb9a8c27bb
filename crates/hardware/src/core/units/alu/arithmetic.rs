//! ALU arithmetic operations.
//!
//! Implements 32-bit addition and subtraction with overflow detection, the
//! low-word `mul`, and the `hi`/`lo` multiply, multiply-accumulate, and divide
//! family. Register values are raw `u32` bit patterns; signed operations
//! reinterpret them as two's complement.

use crate::isa::instruction::HiLoOp;

/// Number of bits in a MIPS32 word (used to split 64-bit products).
const WORD_BITS: u32 = 32;

/// Adds two words as signed integers.
///
/// # Returns
///
/// The wrapped sum and whether signed overflow occurred.
#[inline]
pub const fn add(a: u32, b: u32) -> (u32, bool) {
    let (sum, overflow) = (a as i32).overflowing_add(b as i32);
    (sum as u32, overflow)
}

/// Subtracts `b` from `a` as signed integers.
///
/// # Returns
///
/// The wrapped difference and whether signed overflow occurred.
#[inline]
pub const fn sub(a: u32, b: u32) -> (u32, bool) {
    let (diff, overflow) = (a as i32).overflowing_sub(b as i32);
    (diff as u32, overflow)
}

/// Low 32 bits of the signed product (`mul`).
#[inline]
pub const fn mul(a: u32, b: u32) -> u32 {
    (a as i32).wrapping_mul(b as i32) as u32
}

#[inline]
const fn join(hi: u32, lo: u32) -> u64 {
    ((hi as u64) << WORD_BITS) | lo as u64
}

#[inline]
const fn split(value: u64) -> (u32, u32) {
    ((value >> WORD_BITS) as u32, value as u32)
}

/// Computes a `hi`/`lo` operation.
///
/// # Arguments
///
/// * `op` - The multiply or divide variant.
/// * `a`, `b` - The `rs` and `rt` operands.
/// * `hi`, `lo` - Current accumulator, read by the multiply-add/subtract forms.
///
/// # Returns
///
/// The new `(hi, lo)` pair, or `None` for a division by zero (the result is
/// architecturally unpredictable and the registers are left unchanged).
pub const fn hilo(op: HiLoOp, a: u32, b: u32, hi: u32, lo: u32) -> Option<(u32, u32)> {
    let signed = (a as i32 as i64).wrapping_mul(b as i32 as i64) as u64;
    let unsigned = (a as u64) * (b as u64);
    let acc = join(hi, lo);
    match op {
        HiLoOp::Mult => Some(split(signed)),
        HiLoOp::Multu => Some(split(unsigned)),
        HiLoOp::Madd => Some(split(acc.wrapping_add(signed))),
        HiLoOp::Maddu => Some(split(acc.wrapping_add(unsigned))),
        HiLoOp::Msub => Some(split(acc.wrapping_sub(signed))),
        HiLoOp::Msubu => Some(split(acc.wrapping_sub(unsigned))),
        HiLoOp::Div => {
            if b == 0 {
                None
            } else {
                let (a, b) = (a as i32, b as i32);
                Some((a.wrapping_rem(b) as u32, a.wrapping_div(b) as u32))
            }
        }
        HiLoOp::Divu => {
            if b == 0 {
                None
            } else {
                Some((a % b, a / b))
            }
        }
    }
}
