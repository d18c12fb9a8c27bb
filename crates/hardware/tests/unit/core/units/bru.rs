//! Control Transfer Tests.
//!
//! Branches redirect `nnpc`, so the instruction after a branch (the delay
//! slot) always runs before the target.

use mipsim_core::common::RegisterFile;
use mipsim_core::core::Thread;
use mipsim_core::core::units::bru;
use mipsim_core::isa::abi::REG_RA;
use mipsim_core::isa::instruction::BranchCond;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::{TEXT_BASE, TestContext};

fn regs_at(pc: u32) -> RegisterFile {
    let mut regs = RegisterFile::new();
    regs.reset_pc(pc);
    regs
}

#[test]
fn branch_not_taken_leaves_nnpc() {
    let mut regs = regs_at(0x100);
    regs.set_gpr(8, 1);
    bru::branch(&mut regs, BranchCond::Eq, 8, 9, 0x40, false);
    assert_eq!(regs.nnpc(), 0x108);
}

#[test]
fn branch_taken_targets_delay_slot_relative() {
    let mut regs = regs_at(0x100);
    bru::branch(&mut regs, BranchCond::Eq, 8, 9, -8, false);
    assert_eq!(regs.nnpc(), 0x104 - 8);
    assert_eq!(regs.npc(), 0x104);
}

#[rstest]
#[case::lez_zero(BranchCond::Lez, 0, true)]
#[case::gtz_negative(BranchCond::Gtz, 0x8000_0000, false)]
#[case::ltz_negative(BranchCond::Ltz, 0xFFFF_FFFF, true)]
#[case::gez_positive(BranchCond::Gez, 1, true)]
#[case::ne_equal(BranchCond::Ne, 0, false)]
fn conditions_compare_signed(#[case] cond: BranchCond, #[case] a: u32, #[case] taken: bool) {
    assert_eq!(bru::taken(cond, a, 0), taken);
}

#[test]
fn linking_branch_writes_ra_even_when_not_taken() {
    let mut regs = regs_at(0x100);
    regs.set_gpr(4, 0xFFFF_FFFF);
    bru::branch(&mut regs, BranchCond::Gez, 4, 0, 0x40, true);
    assert_eq!(regs.gpr(REG_RA), 0x108);
    assert_eq!(regs.nnpc(), 0x108);
}

#[test]
fn taken_beq_runs_delay_slot_then_target() {
    let mut ctx = TestContext::new().with_program(&[
        beq(8, 9, 8),
        addiu(10, 0, 1),
        addiu(11, 0, 1),
        addiu(12, 0, 1),
    ]);
    ctx.run(3);
    assert_eq!((ctx.gpr(10), ctx.gpr(11), ctx.gpr(12)), (1, 0, 1));
    assert_eq!(ctx.hart.regs().pc(), TEXT_BASE + 16);
}

#[test]
fn untaken_bne_falls_through() {
    let mut ctx = TestContext::new().with_program(&[
        bne(8, 9, 8),
        addiu(10, 0, 1),
        addiu(11, 0, 1),
        addiu(12, 0, 1),
    ]);
    ctx.run(3);
    assert_eq!((ctx.gpr(10), ctx.gpr(11), ctx.gpr(12)), (1, 1, 1));
}

#[test]
fn jal_links_past_delay_slot() {
    let mut ctx = TestContext::new().with_program(&[jal(TEXT_BASE + 0x20), nop()]);
    ctx.run(2);
    assert_eq!(ctx.gpr(REG_RA), TEXT_BASE + 8);
    assert_eq!(ctx.hart.regs().pc(), TEXT_BASE + 0x20);
}

#[test]
fn jalr_reads_target_before_linking() {
    let mut ctx = TestContext::new().with_program(&[jalr(25, 25), nop()]);
    ctx.set_gpr(25, TEXT_BASE + 0x40);
    ctx.run(2);
    assert_eq!(ctx.hart.regs().pc(), TEXT_BASE + 0x40);
    assert_eq!(ctx.gpr(25), TEXT_BASE + 8);
}

#[test]
fn jr_returns_through_ra() {
    let mut ctx = TestContext::new().with_program(&[jr(31), addiu(8, 0, 9)]);
    ctx.set_gpr(REG_RA, TEXT_BASE + 0x100);
    ctx.run(2);
    assert_eq!(ctx.gpr(8), 9);
    assert_eq!(ctx.hart.regs().pc(), TEXT_BASE + 0x100);
}

#[test]
fn untaken_likely_float_branch_annuls_delay_slot() {
    let mut ctx = TestContext::new().with_program(&[
        bc1(0, true, true, 8),
        addiu(10, 0, 1),
        addiu(11, 0, 1),
    ]);
    ctx.run(2);
    assert_eq!(ctx.gpr(10), 0);
    assert_eq!(ctx.gpr(11), 1);
}

#[test]
fn taken_likely_float_branch_keeps_delay_slot() {
    let mut ctx = TestContext::new().with_program(&[
        bc1(0, true, true, 8),
        addiu(10, 0, 1),
        addiu(11, 0, 1),
        addiu(12, 0, 1),
    ]);
    ctx.hart.regs_mut().misc_mut().set_fcc(0, true);
    ctx.run(3);
    assert_eq!((ctx.gpr(10), ctx.gpr(11), ctx.gpr(12)), (1, 0, 1));
}

#[test]
fn plain_float_branch_not_taken_runs_delay_slot() {
    let mut ctx = TestContext::new().with_program(&[
        bc1(2, false, true, 8),
        addiu(10, 0, 1),
        addiu(11, 0, 1),
    ]);
    ctx.hart.regs_mut().misc_mut().set_fcc(0, true);
    ctx.run(3);
    assert_eq!((ctx.gpr(10), ctx.gpr(11)), (1, 1));
}
