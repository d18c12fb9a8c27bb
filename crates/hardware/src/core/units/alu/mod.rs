//! Arithmetic Logic Unit (ALU).
//!
//! This module executes the integer instruction families against a thread's
//! registers: register-register and register-immediate ALU operations, shifts,
//! the `hi`/`lo` multiply/divide family, bit manipulation, integer conditional
//! moves, and traps.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: add, sub (overflow detecting), mul, mult/div/madd/msub
//! - [`logic`]:      slt, sltu, trap conditions, byte shuffles, ext/ins
//! - [`shifts`]:     sll, srl, sra, rotr
//!
//! Signed overflow on `add`, `addi`, and `sub` follows the thread's
//! [`OverflowPolicy`]: the approximate policy wraps and warns, the trap policy
//! stops the simulation.

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Logical, comparison, and bit-manipulation operations.
pub mod logic;

/// Shift and rotate operations.
pub mod shifts;

use tracing::{error, warn};

use crate::common::error::{SimError, SimResult};
use crate::common::reg::RegisterFile;
use crate::config::OverflowPolicy;
use crate::core::thread::Thread;
use crate::isa::instruction::{
    ByteOp, HiLoMoveOp, HiLoOp, ImmOp, IntOp, ShiftOp, TrapCond, TrapOperand,
};

/// Applies the overflow policy to an overflow-detecting result.
///
/// # Errors
///
/// [`SimError::IntegerOverflow`] when `overflowed` is set under [`OverflowPolicy::Trap`].
fn overflow_checked(
    regs: &RegisterFile,
    policy: OverflowPolicy,
    mnemonic: &'static str,
    (value, overflowed): (u32, bool),
) -> SimResult<u32> {
    if overflowed {
        let pc = regs.pc();
        match policy {
            OverflowPolicy::Approximate => {
                warn!("integer overflow in `{mnemonic}` at pc {pc:#010x} ignored; result wrapped");
            }
            OverflowPolicy::Trap => return Err(SimError::IntegerOverflow { pc, mnemonic }),
        }
    }
    Ok(value)
}

/// Executes a register-register operation: `rd = rs op rt`.
///
/// # Errors
///
/// [`SimError::IntegerOverflow`] for a trapped `add`/`sub` overflow; `rd` is not written.
pub fn int_op(
    thread: &mut dyn Thread,
    mnemonic: &'static str,
    op: IntOp,
    rd: usize,
    rs: usize,
    rt: usize,
) -> SimResult<()> {
    let policy = thread.overflow_policy();
    let regs = thread.regs_mut();
    let (a, b) = (regs.gpr(rs), regs.gpr(rt));
    let value = match op {
        IntOp::Add => overflow_checked(regs, policy, mnemonic, arithmetic::add(a, b))?,
        IntOp::Sub => overflow_checked(regs, policy, mnemonic, arithmetic::sub(a, b))?,
        IntOp::Addu => a.wrapping_add(b),
        IntOp::Subu => a.wrapping_sub(b),
        IntOp::And => a & b,
        IntOp::Or => a | b,
        IntOp::Xor => a ^ b,
        IntOp::Nor => !(a | b),
        IntOp::Slt => logic::slt(a, b),
        IntOp::Sltu => logic::sltu(a, b),
        IntOp::Sllv => shifts::execute(ShiftOp::Sll, b, a),
        IntOp::Srlv => shifts::execute(ShiftOp::Srl, b, a),
        IntOp::Srav => shifts::execute(ShiftOp::Sra, b, a),
        IntOp::Rotrv => shifts::execute(ShiftOp::Rotr, b, a),
        IntOp::Movz | IntOp::Movn => {
            if (b == 0) == (op == IntOp::Movz) {
                regs.set_gpr(rd, a);
            }
            return Ok(());
        }
        IntOp::Mul => arithmetic::mul(a, b),
    };
    regs.set_gpr(rd, value);
    Ok(())
}

/// Executes a register-immediate operation: `rt = rs op imm`.
///
/// `imm` arrives already extended the way `op` requires.
///
/// # Errors
///
/// [`SimError::IntegerOverflow`] for a trapped `addi` overflow; `rt` is not written.
pub fn int_imm(
    thread: &mut dyn Thread,
    mnemonic: &'static str,
    op: ImmOp,
    rt: usize,
    rs: usize,
    imm: u32,
) -> SimResult<()> {
    let policy = thread.overflow_policy();
    let regs = thread.regs_mut();
    let a = regs.gpr(rs);
    let value = match op {
        ImmOp::Addi => overflow_checked(regs, policy, mnemonic, arithmetic::add(a, imm))?,
        ImmOp::Addiu => a.wrapping_add(imm),
        ImmOp::Slti => logic::slt(a, imm),
        ImmOp::Sltiu => logic::sltu(a, imm),
        ImmOp::Andi => a & imm,
        ImmOp::Ori => a | imm,
        ImmOp::Xori => a ^ imm,
        ImmOp::Lui => imm << 16,
    };
    regs.set_gpr(rt, value);
    Ok(())
}

/// Executes a constant shift: `rd = rt shift sa`.
pub fn shift(regs: &mut RegisterFile, op: ShiftOp, rd: usize, rt: usize, sa: u32) {
    let value = shifts::execute(op, regs.gpr(rt), sa);
    regs.set_gpr(rd, value);
}

/// Executes a multiply/divide into `hi`/`lo`.
///
/// Division by zero leaves `hi`/`lo` unchanged and logs a warning.
pub fn hilo(regs: &mut RegisterFile, op: HiLoOp, rs: usize, rt: usize) {
    let (a, b) = (regs.gpr(rs), regs.gpr(rt));
    let misc = regs.misc();
    match arithmetic::hilo(op, a, b, misc.hi, misc.lo) {
        Some((hi, lo)) => {
            let misc = regs.misc_mut();
            misc.hi = hi;
            misc.lo = lo;
        }
        None => warn!(
            "division by zero at pc {:#010x}; hi/lo left unchanged",
            regs.pc()
        ),
    }
}

/// Executes `mfhi`, `mflo`, `mthi`, `mtlo`.
pub fn hilo_move(regs: &mut RegisterFile, op: HiLoMoveOp, reg: usize) {
    match op {
        HiLoMoveOp::Mfhi => {
            let v = regs.misc().hi;
            regs.set_gpr(reg, v);
        }
        HiLoMoveOp::Mflo => {
            let v = regs.misc().lo;
            regs.set_gpr(reg, v);
        }
        HiLoMoveOp::Mthi => {
            let v = regs.gpr(reg);
            regs.misc_mut().hi = v;
        }
        HiLoMoveOp::Mtlo => {
            let v = regs.gpr(reg);
            regs.misc_mut().lo = v;
        }
    }
}

/// Executes `clz` (`ones == false`) or `clo`.
pub fn count_bits(regs: &mut RegisterFile, ones: bool, rd: usize, rs: usize) {
    let a = regs.gpr(rs);
    let count = if ones {
        a.leading_ones()
    } else {
        a.leading_zeros()
    };
    regs.set_gpr(rd, count);
}

/// Executes `wsbh`, `seb`, `seh`.
pub fn byte_op(regs: &mut RegisterFile, op: ByteOp, rd: usize, rt: usize) {
    let value = logic::byte_op(op, regs.gpr(rt));
    regs.set_gpr(rd, value);
}

/// Executes `ext`.
pub fn ext(regs: &mut RegisterFile, rt: usize, rs: usize, pos: u32, size: u32) {
    let value = logic::extract(regs.gpr(rs), pos, size);
    regs.set_gpr(rt, value);
}

/// Executes `ins`.
pub fn ins(regs: &mut RegisterFile, rt: usize, rs: usize, pos: u32, size: u32) {
    let value = logic::insert(regs.gpr(rt), regs.gpr(rs), pos, size);
    regs.set_gpr(rt, value);
}

/// Executes integer `movf`/`movt`: `rd = rs` when condition code `cc` equals `on_true`.
pub fn mov_cc(regs: &mut RegisterFile, rd: usize, rs: usize, cc: u32, on_true: bool) {
    if regs.misc().fcc(cc) == on_true {
        let v = regs.gpr(rs);
        regs.set_gpr(rd, v);
    }
}

/// Evaluates a trap instruction.
///
/// # Errors
///
/// [`SimError::Trap`] when the condition holds.
pub fn trap(
    regs: &RegisterFile,
    mnemonic: &'static str,
    cond: TrapCond,
    rs: usize,
    rhs: TrapOperand,
) -> SimResult<()> {
    let a = regs.gpr(rs);
    let b = match rhs {
        TrapOperand::Reg(rt) => regs.gpr(rt),
        TrapOperand::Imm(imm) => imm,
    };
    if logic::trap_taken(cond, a, b) {
        let pc = regs.pc();
        error!("trap `{mnemonic}` taken at pc {pc:#010x} ({a:#010x} vs {b:#010x})");
        return Err(SimError::Trap { pc, mnemonic });
    }
    Ok(())
}
