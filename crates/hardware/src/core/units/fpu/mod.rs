//! Floating-Point Unit (FPU).
//!
//! This module implements coprocessor 1 over the aliased float register bank.
//! It handles single- and double-precision arithmetic, conversions between the
//! S, D, W, and L formats, compares that set FCSR condition codes, conditional
//! moves, and the GPR/FPR control moves.
//!
//! Doubles and longs are addressed by their single-register index; the bank
//! maps them onto the even/odd pair. Integer conversions that overflow or see
//! a NaN produce the MIPS default result (`0x7fff_ffff` or `0x7fff_ffff_ffff_ffff`).
//!
//! Operations are organized into submodules:
//! - [`rounding_modes`]: `FCSR.RM` decoding and integral rounding.

/// Rounding mode definitions and support.
pub mod rounding_modes;

use crate::common::reg::RegisterFile;
use crate::core::arch::FloatRegisterFile;
use crate::isa::instruction::{Cp1MoveOp, FpArithOp, FpFormat, FpUnaryOp, Rounding};

use self::rounding_modes::RoundingMode;

/// Bit mask for the sign bit in a 32-bit IEEE 754 float (bit 31).
const F32_SIGN_BIT: u32 = 0x8000_0000;

/// Bit mask for the sign bit in a 64-bit IEEE 754 float (bit 63).
const F64_SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// Result of an invalid conversion to W format.
const W_INVALID: u32 = 0x7fff_ffff;

/// Result of an invalid conversion to L format.
const L_INVALID: u64 = 0x7fff_ffff_ffff_ffff;

/// FCSR control register number readable through `cfc1`.
pub const FCSR_REGNUM: usize = 31;

/// Compare condition bit: true when either operand is NaN.
const COND_UNORDERED: u32 = 0b001;
/// Compare condition bit: true when operands are equal.
const COND_EQUAL: u32 = 0b010;
/// Compare condition bit: true when `fs < ft`.
const COND_LESS: u32 = 0b100;

/// Reads `reg` in `fmt` as an `f64` (exact for S, D, and W).
fn read(fpr: &FloatRegisterFile, fmt: FpFormat, reg: usize) -> f64 {
    match fmt {
        FpFormat::Single => f64::from(fpr.get_float(reg)),
        FpFormat::Double => fpr.get_double(reg),
        FpFormat::Word => f64::from(fpr.get_uint(reg) as i32),
        FpFormat::Long => fpr.get_ulong(reg) as i64 as f64,
    }
}

/// Copies the raw bits of `fs` into `fd` in `fmt`.
fn copy(fpr: &mut FloatRegisterFile, fmt: FpFormat, fd: usize, fs: usize) {
    if fmt.is_wide() {
        let bits = fpr.get_ulong(fs);
        fpr.set_ulong(fd, bits);
    } else {
        let bits = fpr.get_uint(fs);
        fpr.set_uint(fd, bits);
    }
}

/// Executes `add`, `sub`, `mul`, or `div` in S or D format.
pub fn arith(
    regs: &mut RegisterFile,
    op: FpArithOp,
    fmt: FpFormat,
    fd: usize,
    fs: usize,
    ft: usize,
) {
    let fpr = regs.fpr_mut();
    if fmt == FpFormat::Single {
        let (a, b) = (fpr.get_float(fs), fpr.get_float(ft));
        let r = match op {
            FpArithOp::Add => a + b,
            FpArithOp::Sub => a - b,
            FpArithOp::Mul => a * b,
            FpArithOp::Div => a / b,
        };
        fpr.set_float(fd, r);
    } else {
        let (a, b) = (fpr.get_double(fs), fpr.get_double(ft));
        let r = match op {
            FpArithOp::Add => a + b,
            FpArithOp::Sub => a - b,
            FpArithOp::Mul => a * b,
            FpArithOp::Div => a / b,
        };
        fpr.set_double(fd, r);
    }
}

/// Executes `sqrt`, `abs`, `mov`, or `neg` in S or D format.
///
/// `abs` and `neg` only touch the sign bit, so NaN payloads pass through.
pub fn unary(regs: &mut RegisterFile, op: FpUnaryOp, fmt: FpFormat, fd: usize, fs: usize) {
    let fpr = regs.fpr_mut();
    match (op, fmt.is_wide()) {
        (FpUnaryOp::Mov, _) => copy(fpr, fmt, fd, fs),
        (FpUnaryOp::Sqrt, false) => {
            let v = fpr.get_float(fs).sqrt();
            fpr.set_float(fd, v);
        }
        (FpUnaryOp::Sqrt, true) => {
            let v = fpr.get_double(fs).sqrt();
            fpr.set_double(fd, v);
        }
        (FpUnaryOp::Abs, false) => {
            let bits = fpr.get_uint(fs) & !F32_SIGN_BIT;
            fpr.set_uint(fd, bits);
        }
        (FpUnaryOp::Abs, true) => {
            let bits = fpr.get_ulong(fs) & !F64_SIGN_BIT;
            fpr.set_ulong(fd, bits);
        }
        (FpUnaryOp::Neg, false) => {
            let bits = fpr.get_uint(fs) ^ F32_SIGN_BIT;
            fpr.set_uint(fd, bits);
        }
        (FpUnaryOp::Neg, true) => {
            let bits = fpr.get_ulong(fs) ^ F64_SIGN_BIT;
            fpr.set_ulong(fd, bits);
        }
    }
}

/// Rounds `value` to a W-format integer.
fn to_word(value: f64, mode: RoundingMode) -> u32 {
    let r = mode.apply(value);
    if r.is_nan() || r < f64::from(i32::MIN) || r > f64::from(i32::MAX) {
        W_INVALID
    } else {
        r as i32 as u32
    }
}

/// Rounds `value` to an L-format integer.
fn to_long(value: f64, mode: RoundingMode) -> u64 {
    let r = mode.apply(value);
    // i64::MAX is not representable as f64; 2^63 is the first out-of-range value.
    if r.is_nan() || r < -9_223_372_036_854_775_808.0 || r >= 9_223_372_036_854_775_808.0 {
        L_INVALID
    } else {
        r as i64 as u64
    }
}

/// Executes a format conversion.
///
/// # Arguments
///
/// * `from`, `to` - Source and destination formats.
/// * `rounding` - Rounding for integer destinations; `Current` reads `FCSR.RM`.
/// * `fd`, `fs` - Destination and source registers.
pub fn convert(
    regs: &mut RegisterFile,
    from: FpFormat,
    to: FpFormat,
    rounding: Rounding,
    fd: usize,
    fs: usize,
) {
    let mode = RoundingMode::resolve(rounding, regs.misc().fcsr);
    let fpr = regs.fpr_mut();
    let value = read(fpr, from, fs);
    match to {
        FpFormat::Single => {
            let single = if from == FpFormat::Word {
                fpr.get_uint(fs) as i32 as f32
            } else {
                value as f32
            };
            fpr.set_float(fd, single);
        }
        FpFormat::Double => fpr.set_double(fd, value),
        FpFormat::Word => fpr.set_uint(fd, to_word(value, mode)),
        FpFormat::Long => fpr.set_ulong(fd, to_long(value, mode)),
    }
}

/// Evaluates a compare condition.
///
/// # Arguments
///
/// * `cond` - The 4-bit `COND` field; bit 3 (signalling) does not affect the result.
pub fn compare_holds(cond: u32, a: f64, b: f64) -> bool {
    let unordered = a.is_nan() || b.is_nan();
    let equal = !unordered && a == b;
    let less = !unordered && a < b;
    (cond & COND_UNORDERED != 0 && unordered)
        || (cond & COND_EQUAL != 0 && equal)
        || (cond & COND_LESS != 0 && less)
}

/// Executes `c.cond.fmt`, writing the result to condition code `cc`.
pub fn compare(
    regs: &mut RegisterFile,
    fmt: FpFormat,
    cond: u32,
    cc: u32,
    fs: usize,
    ft: usize,
) {
    let fpr = regs.fpr();
    let result = compare_holds(cond, read(fpr, fmt, fs), read(fpr, fmt, ft));
    regs.misc_mut().set_fcc(cc, result);
}

/// Executes `movf.fmt`/`movt.fmt`.
pub fn move_cc(
    regs: &mut RegisterFile,
    fmt: FpFormat,
    fd: usize,
    fs: usize,
    cc: u32,
    on_true: bool,
) {
    if regs.misc().fcc(cc) == on_true {
        copy(regs.fpr_mut(), fmt, fd, fs);
    }
}

/// Executes `movz.fmt` (`on_zero`) or `movn.fmt`.
pub fn move_gpr(
    regs: &mut RegisterFile,
    fmt: FpFormat,
    fd: usize,
    fs: usize,
    rt: usize,
    on_zero: bool,
) {
    if (regs.gpr(rt) == 0) == on_zero {
        copy(regs.fpr_mut(), fmt, fd, fs);
    }
}

/// Executes `mfc1`, `cfc1`, `mtc1`, or `ctc1`.
///
/// `cfc1` yields the FCSR only for control register 31 and 0 otherwise.
/// `ctc1` to control register 0 (the read-only FIR) is ignored.
pub fn cp1_move(regs: &mut RegisterFile, op: Cp1MoveOp, rt: usize, fs: usize) {
    match op {
        Cp1MoveOp::Mfc1 => {
            let v = regs.fpr().get_uint(fs);
            regs.set_gpr(rt, v);
        }
        Cp1MoveOp::Cfc1 => {
            let v = if fs == FCSR_REGNUM {
                regs.misc().fcsr
            } else {
                0
            };
            regs.set_gpr(rt, v);
        }
        Cp1MoveOp::Mtc1 => {
            let v = regs.gpr(rt);
            regs.fpr_mut().set_uint(fs, v);
        }
        Cp1MoveOp::Ctc1 => {
            if fs != 0 {
                let v = regs.gpr(rt);
                regs.misc_mut().fcsr = v;
            }
        }
    }
}
