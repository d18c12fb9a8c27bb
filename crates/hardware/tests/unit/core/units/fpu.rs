//! Floating-Point Execution Tests.

use mipsim_core::core::Thread;
use mipsim_core::core::units::fpu;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::{TEXT_BASE, TestContext};

const COND_UN: u32 = 0x1;
const COND_EQ: u32 = 0x2;
const COND_OLT: u32 = 0x4;
const COND_LT: u32 = 0xC;
const COND_LE: u32 = 0xE;

#[test]
fn add_d_reads_register_pairs() {
    let mut ctx = TestContext::new().with_program(&[fr_type(FMT_D, 4, 2, 0, FN_FADD)]);
    ctx.hart.regs_mut().fpr_mut().set_double(2, 1.5);
    ctx.hart.regs_mut().fpr_mut().set_double(4, 2.25);
    ctx.run(1);
    assert_eq!(ctx.hart.regs().fpr().get_double(0), 3.75);
}

#[test]
fn add_s_rounds_to_single() {
    let mut ctx = TestContext::new().with_program(&[fr_type(FMT_S, 2, 1, 0, FN_FADD)]);
    ctx.hart.regs_mut().fpr_mut().set_float(1, 0.1);
    ctx.hart.regs_mut().fpr_mut().set_float(2, 0.2);
    ctx.run(1);
    assert_eq!(ctx.hart.regs().fpr().get_float(0), 0.1f32 + 0.2f32);
}

#[test]
fn neg_and_abs_only_touch_sign_bit() {
    let mut ctx = TestContext::new().with_program(&[
        fr_type(FMT_S, 0, 1, 3, FN_FNEG),
        fr_type(FMT_S, 0, 3, 4, FN_FABS),
    ]);
    ctx.hart.regs_mut().fpr_mut().set_uint(1, 0x7FC0_0001);
    ctx.run(2);
    assert_eq!(ctx.hart.regs().fpr().get_uint(3), 0xFFC0_0001);
    assert_eq!(ctx.hart.regs().fpr().get_uint(4), 0x7FC0_0001);
}

#[rstest]
#[case::lt_holds(COND_LT, 1.0, 2.0, true)]
#[case::lt_fails_on_equal(COND_LT, 2.0, 2.0, false)]
#[case::le_holds_on_equal(COND_LE, 2.0, 2.0, true)]
#[case::eq(COND_EQ, -0.0, 0.0, true)]
#[case::un_with_nan(COND_UN, f64::NAN, 1.0, true)]
#[case::olt_with_nan(COND_OLT, f64::NAN, 1.0, false)]
#[case::eq_with_nan(COND_EQ, f64::NAN, f64::NAN, false)]
#[case::false_never_holds(0, 1.0, 1.0, false)]
fn compare_conditions(#[case] cond: u32, #[case] a: f64, #[case] b: f64, #[case] holds: bool) {
    assert_eq!(fpu::compare_holds(cond, a, b), holds);
}

#[test]
fn compare_then_bc1t_takes_branch() {
    let mut ctx = TestContext::new().with_program(&[
        c_cond(FMT_D, COND_LT, 0, 2, 4),
        bc1(0, false, true, 8),
        addiu(10, 0, 1),
        addiu(11, 0, 1),
        addiu(12, 0, 1),
    ]);
    ctx.hart.regs_mut().fpr_mut().set_double(2, 1.0);
    ctx.hart.regs_mut().fpr_mut().set_double(4, 2.0);
    ctx.run(4);
    assert!(ctx.hart.regs().misc().fcc(0));
    assert_eq!((ctx.gpr(10), ctx.gpr(11), ctx.gpr(12)), (1, 0, 1));
    assert_eq!(ctx.hart.regs().pc(), TEXT_BASE + 20);
}

#[test]
fn compare_writes_only_its_condition_code() {
    let mut ctx = TestContext::new().with_program(&[c_cond(FMT_S, COND_EQ, 5, 1, 2)]);
    ctx.hart.regs_mut().misc_mut().set_fcc(0, true);
    ctx.run(1);
    let misc = ctx.hart.regs().misc();
    assert!(misc.fcc(5));
    assert!(misc.fcc(0));
    assert_eq!(misc.fcsr, (1 << 23) | (1 << 29));
}

#[rstest]
#[case::truncates_toward_zero(-2.7, -2i32 as u32)]
#[case::exact(7.0, 7)]
#[case::too_large(3.0e10, 0x7FFF_FFFF)]
#[case::nan(f64::NAN, 0x7FFF_FFFF)]
fn trunc_w_d(#[case] value: f64, #[case] expected: u32) {
    let mut ctx = TestContext::new().with_program(&[fr_type(FMT_D, 0, 2, 0, FN_TRUNC_W)]);
    ctx.hart.regs_mut().fpr_mut().set_double(2, value);
    ctx.run(1);
    assert_eq!(ctx.hart.regs().fpr().get_uint(0), expected);
}

#[rstest]
#[case::nearest(0, 2.5, 2)]
#[case::toward_zero(1, 2.9, 2)]
#[case::up(2, 2.1, 3)]
#[case::down(3, -2.1, -3i32 as u32)]
fn cvt_w_d_follows_fcsr_rounding_mode(#[case] rm: u32, #[case] value: f64, #[case] expected: u32) {
    let mut ctx = TestContext::new().with_program(&[fr_type(FMT_D, 0, 2, 0, FN_CVT_W)]);
    ctx.hart.regs_mut().misc_mut().fcsr = rm;
    ctx.hart.regs_mut().fpr_mut().set_double(2, value);
    ctx.run(1);
    assert_eq!(ctx.hart.regs().fpr().get_uint(0), expected);
}

#[test]
fn cvt_d_w_reads_signed_word() {
    let mut ctx = TestContext::new().with_program(&[fr_type(FMT_W, 0, 1, 2, FN_CVT_D)]);
    ctx.hart.regs_mut().fpr_mut().set_uint(1, -5i32 as u32);
    ctx.run(1);
    assert_eq!(ctx.hart.regs().fpr().get_double(2), -5.0);
}

#[test]
fn mtc1_then_mfc1_moves_raw_bits() {
    let mut ctx = TestContext::new().with_program(&[cp1_move(4, 8, 3), cp1_move(0, 9, 3)]);
    ctx.set_gpr(8, 0x3F80_0000);
    ctx.run(2);
    assert_eq!(ctx.hart.regs().fpr().get_float(3), 1.0);
    assert_eq!(ctx.gpr(9), 0x3F80_0000);
}

#[test]
fn control_moves_reach_only_fcsr() {
    let mut ctx = TestContext::new().with_program(&[
        cp1_move(6, 8, 31),
        cp1_move(2, 9, 31),
        cp1_move(2, 10, 0),
    ]);
    ctx.set_gpr(8, 0x0080_0003);
    ctx.set_gpr(10, 0xFFFF_FFFF);
    ctx.run(3);
    assert_eq!(ctx.hart.regs().misc().fcsr, 0x0080_0003);
    assert_eq!(ctx.gpr(9), 0x0080_0003);
    assert_eq!(ctx.gpr(10), 0);
}

#[test]
fn ctc1_to_register_zero_is_ignored() {
    let mut ctx = TestContext::new().with_program(&[cp1_move(6, 8, 0)]);
    ctx.set_gpr(8, 0x0000_0003);
    ctx.run(1);
    assert_eq!(ctx.hart.regs().misc().fcsr, 0);
}
