//! Branch Resolution Unit (BRU).
//!
//! This module resolves branches and jumps under the MIPS delay-slot model.
//! The instruction after a control transfer always executes, so control
//! instructions never touch `pc` or `npc` directly; they redirect `nnpc`, the
//! address that follows the delay slot. It provides:
//! 1. **Branches:** PC-relative targets computed from `npc`, optional linking.
//! 2. **Float Branches:** Condition-code tests, with the likely forms annulling
//!    the delay slot when not taken.
//! 3. **Jumps:** Region jumps (`j`, `jal`) and register jumps (`jr`, `jalr`).

use crate::common::constants::{JUMP_REGION_MASK, WORD_SIZE};
use crate::common::reg::RegisterFile;
use crate::isa::abi::REG_RA;
use crate::isa::instruction::BranchCond;

/// PC-relative target: `npc + disp`.
#[inline]
pub const fn branch_target(regs: &RegisterFile, disp: i32) -> u32 {
    regs.npc().wrapping_add_signed(disp)
}

/// Region jump target: the top nibble of `npc` joined with `target`.
#[inline]
pub const fn jump_target(regs: &RegisterFile, target: u32) -> u32 {
    (regs.npc() & JUMP_REGION_MASK) | target
}

/// Evaluates an integer branch condition.
pub const fn taken(cond: BranchCond, a: u32, b: u32) -> bool {
    let sa = a as i32;
    match cond {
        BranchCond::Always => true,
        BranchCond::Eq => a == b,
        BranchCond::Ne => a != b,
        BranchCond::Lez => sa <= 0,
        BranchCond::Gtz => sa > 0,
        BranchCond::Ltz => sa < 0,
        BranchCond::Gez => sa >= 0,
    }
}

/// Executes an integer branch.
///
/// Linking forms write `$ra = nnpc` whether or not the branch is taken. A taken
/// branch sets `nnpc` to `npc + disp`; a branch not taken leaves `nnpc` alone.
///
/// # Arguments
///
/// * `regs` - The thread's register file.
/// * `cond` - Branch condition.
/// * `rs`, `rt` - Compared registers (`rt` only for `Eq`/`Ne`).
/// * `disp` - Byte displacement, already `sign_extend(offset << 2, 18)`.
/// * `link` - Whether to write the return address.
pub fn branch(
    regs: &mut RegisterFile,
    cond: BranchCond,
    rs: usize,
    rt: usize,
    disp: i32,
    link: bool,
) {
    let is_taken = taken(cond, regs.gpr(rs), regs.gpr(rt));
    if link {
        let ret = regs.nnpc();
        regs.set_gpr(REG_RA, ret);
    }
    if is_taken {
        let target = branch_target(regs, disp);
        regs.set_nnpc(target);
    }
}

/// Executes `bc1f`, `bc1t`, `bc1fl`, or `bc1tl`.
///
/// When a likely branch is not taken the delay slot is annulled by advancing
/// both `npc` and `nnpc` one word.
pub fn fp_branch(regs: &mut RegisterFile, cc: u32, on_true: bool, likely: bool, disp: i32) {
    if regs.misc().fcc(cc) == on_true {
        let target = branch_target(regs, disp);
        regs.set_nnpc(target);
    } else if likely {
        let (npc, nnpc) = (regs.npc(), regs.nnpc());
        regs.set_npc(npc.wrapping_add(WORD_SIZE));
        regs.set_nnpc(nnpc.wrapping_add(WORD_SIZE));
    }
}

/// Executes `j` or `jal`.
pub fn jump(regs: &mut RegisterFile, target: u32, link: bool) {
    if link {
        let ret = regs.nnpc();
        regs.set_gpr(REG_RA, ret);
    }
    let dest = jump_target(regs, target);
    regs.set_nnpc(dest);
}

/// Executes `jr` or `jalr`.
///
/// The target is read before the link register is written, so `jalr $t9, $t9`
/// jumps to the old value of `$t9`.
pub fn jump_reg(regs: &mut RegisterFile, rs: usize, link: Option<usize>) {
    let dest = regs.gpr(rs);
    if let Some(rd) = link {
        let ret = regs.nnpc();
        regs.set_gpr(rd, ret);
    }
    regs.set_nnpc(dest);
}
