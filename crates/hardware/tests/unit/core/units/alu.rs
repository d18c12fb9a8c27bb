//! Integer Execution Tests.
//!
//! Register-register arithmetic, the overflow policies, the `hi`/`lo` family,
//! and traps.

use mipsim_core::common::SimError;
use mipsim_core::core::Thread;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::{TEXT_BASE, TestContext};

#[test]
fn addiu_chain_writes_destinations() {
    let mut ctx = TestContext::new().with_program(&[addiu(8, 0, 5), addiu(9, 8, 7)]);
    ctx.run(2);
    assert_eq!(ctx.gpr(8), 5);
    assert_eq!(ctx.gpr(9), 12);
    assert_eq!(ctx.gpr(0), 0);
}

#[test]
fn writes_to_zero_are_not_observed() {
    let mut ctx = TestContext::new().with_program(&[addiu(0, 0, 5), addu(8, 0, 0)]);
    ctx.run(2);
    assert_eq!(ctx.gpr(8), 0);
}

#[rstest]
#[case::add(add(8, 9, 10))]
#[case::addi(addi(8, 9, 1))]
fn approximate_policy_wraps_overflow(#[case] word: u32) {
    let mut ctx = TestContext::new().with_program(&[word]);
    ctx.set_gpr(9, 0x7FFF_FFFF);
    ctx.set_gpr(10, 1);
    ctx.run(1);
    assert_eq!(ctx.gpr(8), 0x8000_0000);
}

#[rstest]
#[case::add(add(8, 9, 10), "add")]
#[case::addi(addi(8, 9, 1), "addi")]
fn trap_policy_stops_on_overflow(#[case] word: u32, #[case] mnemonic: &'static str) {
    let mut ctx = TestContext::with_overflow_trap().with_program(&[word]);
    ctx.set_gpr(8, 0xAAAA_AAAA);
    ctx.set_gpr(9, 0x7FFF_FFFF);
    ctx.set_gpr(10, 1);

    let err = ctx.hart.step(&mut ctx.decoder).unwrap_err();

    assert_eq!(
        err,
        SimError::IntegerOverflow {
            pc: TEXT_BASE,
            mnemonic
        }
    );
    // Destination untouched and the PC still names the faulting instruction.
    assert_eq!(ctx.gpr(8), 0xAAAA_AAAA);
    assert_eq!(ctx.hart.regs().pc(), TEXT_BASE);
}

#[test]
fn sub_overflow_under_trap_policy() {
    let mut ctx = TestContext::with_overflow_trap().with_program(&[sub(8, 9, 10)]);
    ctx.set_gpr(9, 0x8000_0000);
    ctx.set_gpr(10, 1);
    assert!(matches!(
        ctx.hart.step(&mut ctx.decoder),
        Err(SimError::IntegerOverflow { mnemonic: "sub", .. })
    ));
}

#[test]
fn addu_never_checks_overflow() {
    let mut ctx = TestContext::with_overflow_trap().with_program(&[addu(8, 9, 10)]);
    ctx.set_gpr(9, 0x7FFF_FFFF);
    ctx.set_gpr(10, 1);
    ctx.run(1);
    assert_eq!(ctx.gpr(8), 0x8000_0000);
}

#[test]
fn divide_splits_quotient_and_remainder() {
    let mut ctx = TestContext::new().with_program(&[div(9, 10), mflo(8), mfhi(11)]);
    ctx.set_gpr(9, -7i32 as u32);
    ctx.set_gpr(10, 2);
    ctx.run(3);
    assert_eq!(ctx.gpr(8), -3i32 as u32);
    assert_eq!(ctx.gpr(11), -1i32 as u32);
}

#[test]
fn divide_by_zero_leaves_hi_lo() {
    let mut ctx = TestContext::new().with_program(&[div(9, 0), mflo(8), mfhi(11)]);
    ctx.hart.regs_mut().misc_mut().lo = 0x1111;
    ctx.hart.regs_mut().misc_mut().hi = 0x2222;
    ctx.set_gpr(9, 40);
    ctx.run(3);
    assert_eq!(ctx.gpr(8), 0x1111);
    assert_eq!(ctx.gpr(11), 0x2222);
}

#[test]
fn teq_traps_when_equal() {
    let mut ctx = TestContext::new().with_program(&[teq(9, 10)]);
    ctx.set_gpr(9, 3);
    ctx.set_gpr(10, 3);
    assert_eq!(
        ctx.hart.step(&mut ctx.decoder),
        Err(SimError::Trap {
            pc: TEXT_BASE,
            mnemonic: "teq"
        })
    );
}

#[test]
fn teq_falls_through_when_different() {
    let mut ctx = TestContext::new().with_program(&[teq(9, 10), addiu(8, 0, 1)]);
    ctx.set_gpr(9, 3);
    ctx.run(2);
    assert_eq!(ctx.gpr(8), 1);
}

#[test]
fn break_is_fatal() {
    let mut ctx = TestContext::new().with_program(&[brk()]);
    assert!(matches!(
        ctx.hart.step(&mut ctx.decoder),
        Err(SimError::Trap { mnemonic: "break", .. })
    ));
}
