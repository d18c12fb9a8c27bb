//! Load/Store Unit (LSU).
//!
//! This module executes memory instructions against a thread's [`Memory`]. It
//! provides:
//! 1. **Integer Access:** Byte, halfword, and word loads (signed or zero
//!    extended) and stores.
//! 2. **Unaligned Access:** The `lwl`/`lwr`/`swl`/`swr` merges, see [`unaligned`].
//! 3. **Float Access:** `lwc1`/`swc1` on one register, `ldc1`/`sdc1` on a pair.
//! 4. **Linked Access:** `ll` loads a word and `sc` always succeeds.
//!
//! Every access records its effective address in the `ea` misc register before
//! touching memory. Faults propagate as [`SimError::Memory`](crate::common::error::SimError).
//!
//! [`Memory`]: crate::soc::traits::Memory

/// Partial-word merge arithmetic for `lwl`, `lwr`, `swl`, `swr`.
pub mod unaligned;

use crate::common::error::SimResult;
use crate::common::reg::RegisterFile;
use crate::core::thread::Thread;
use crate::isa::instruction::{Side, Width};

/// Computes `gpr[base] + offset` and records it as the effective address.
pub fn effective_address(regs: &mut RegisterFile, base: usize, offset: i32) -> u32 {
    let ea = regs.gpr(base).wrapping_add_signed(offset);
    regs.misc_mut().ea = ea;
    ea
}

/// Executes `lb`, `lbu`, `lh`, `lhu`, `lw`, or `ll`.
///
/// # Errors
///
/// Any fault reported by the thread's memory; `rt` is not written.
pub fn load(
    thread: &mut dyn Thread,
    width: Width,
    signed: bool,
    rt: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    let ea = effective_address(thread.regs_mut(), base, offset);
    let mem = thread.memory();
    let value = match (width, signed) {
        (Width::Byte, true) => mem.read_u8(ea)? as i8 as i32 as u32,
        (Width::Byte, false) => u32::from(mem.read_u8(ea)?),
        (Width::Half, true) => mem.read_u16(ea)? as i16 as i32 as u32,
        (Width::Half, false) => u32::from(mem.read_u16(ea)?),
        (Width::Word, _) => mem.read_u32(ea)?,
    };
    thread.regs_mut().set_gpr(rt, value);
    Ok(())
}

/// Executes `sb`, `sh`, or `sw`.
///
/// # Errors
///
/// Any fault reported by the thread's memory.
pub fn store(
    thread: &mut dyn Thread,
    width: Width,
    rt: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    let regs = thread.regs_mut();
    let ea = effective_address(regs, base, offset);
    let value = regs.gpr(rt);
    let mem = thread.memory();
    match width {
        Width::Byte => mem.write_u8(ea, value as u8)?,
        Width::Half => mem.write_u16(ea, value as u16)?,
        Width::Word => mem.write_u32(ea, value)?,
    }
    Ok(())
}

/// Executes `lwl` or `lwr` on the aligned word containing the effective address.
///
/// # Errors
///
/// Any fault reported by the thread's memory; `rt` is not written.
pub fn load_partial(
    thread: &mut dyn Thread,
    side: Side,
    rt: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    let ea = effective_address(thread.regs_mut(), base, offset);
    let mem = thread.memory().read_u32(unaligned::aligned(ea))?;
    let regs = thread.regs_mut();
    let reg = regs.gpr(rt);
    let value = match side {
        Side::Left => unaligned::load_left(ea, mem, reg),
        Side::Right => unaligned::load_right(ea, mem, reg),
    };
    regs.set_gpr(rt, value);
    Ok(())
}

/// Executes `swl` or `swr` on the aligned word containing the effective address.
///
/// # Errors
///
/// Any fault reported by the thread's memory; memory is left unchanged.
pub fn store_partial(
    thread: &mut dyn Thread,
    side: Side,
    rt: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    let regs = thread.regs_mut();
    let ea = effective_address(regs, base, offset);
    let reg = regs.gpr(rt);
    let addr = unaligned::aligned(ea);
    let mem = thread.memory();
    let word = mem.read_u32(addr)?;
    let merged = match side {
        Side::Left => unaligned::store_left(ea, word, reg),
        Side::Right => unaligned::store_right(ea, word, reg),
    };
    mem.write_u32(addr, merged)?;
    Ok(())
}

/// Executes `sc`: stores the word and writes 1 to `rt`.
///
/// There is only one hart per memory, so the link is never broken.
///
/// # Errors
///
/// Any fault reported by the thread's memory; `rt` is not written.
pub fn store_conditional(
    thread: &mut dyn Thread,
    rt: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    store(thread, Width::Word, rt, base, offset)?;
    thread.regs_mut().set_gpr(rt, 1);
    Ok(())
}

/// Executes `lwc1` or `ldc1`.
///
/// # Errors
///
/// Any fault reported by the thread's memory; `ft` is not written.
pub fn load_fp(
    thread: &mut dyn Thread,
    double: bool,
    ft: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    let ea = effective_address(thread.regs_mut(), base, offset);
    if double {
        let bits = thread.memory().read_u64(ea)?;
        thread.regs_mut().fpr_mut().set_ulong(ft, bits);
    } else {
        let bits = thread.memory().read_u32(ea)?;
        thread.regs_mut().fpr_mut().set_uint(ft, bits);
    }
    Ok(())
}

/// Executes `swc1` or `sdc1`.
///
/// # Errors
///
/// Any fault reported by the thread's memory.
pub fn store_fp(
    thread: &mut dyn Thread,
    double: bool,
    ft: usize,
    base: usize,
    offset: i32,
) -> SimResult<()> {
    let regs = thread.regs_mut();
    let ea = effective_address(regs, base, offset);
    if double {
        let bits = regs.fpr().get_ulong(ft);
        thread.memory().write_u64(ea, bits)?;
    } else {
        let bits = regs.fpr().get_uint(ft);
        thread.memory().write_u32(ea, bits)?;
    }
    Ok(())
}
