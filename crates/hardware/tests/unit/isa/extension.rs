//! Immediate Extension.
//!
//! The arithmetic immediates are sign-extended; the logical ones and `sltiu`
//! are zero-extended. The decoder stores the already-extended value in the
//! payload, so both the record and the executed result are checked.

use mipsim_core::isa::decode::decode_word;
use mipsim_core::isa::instruction::{ImmOp, Kind};
use mipsim_core::isa::word::MachineWord;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::*;
use crate::common::harness::TestContext;

#[test]
fn intimm_field_has_both_readings() {
    let w = MachineWord::new(i_type(OP_ADDIU, 0, 8, 0x8000));
    assert_eq!(w.sext_imm(), -32768);
    assert_eq!(w.zext_imm(), 32768);
}

#[rstest]
#[case::addi(OP_ADDI, ImmOp::Addi, 0xFFFF_8000)]
#[case::addiu(OP_ADDIU, ImmOp::Addiu, 0xFFFF_8000)]
#[case::slti(OP_SLTI, ImmOp::Slti, 0xFFFF_8000)]
#[case::sltiu(OP_SLTIU, ImmOp::Sltiu, 0x0000_8000)]
#[case::andi(OP_ANDI, ImmOp::Andi, 0x0000_8000)]
#[case::ori(OP_ORI, ImmOp::Ori, 0x0000_8000)]
fn payload_carries_extended_immediate(#[case] opcode: u32, #[case] op: ImmOp, #[case] imm: u32) {
    let inst = decode_word(i_type(opcode, 9, 8, 0x8000));
    assert_eq!(
        *inst.kind(),
        Kind::IntImm {
            op,
            rt: 8,
            rs: 9,
            imm
        }
    );
}

#[test]
fn lui_places_immediate_in_upper_half() {
    let mut ctx = TestContext::new().with_program(&[lui(8, 0x8001)]);
    ctx.run(1);
    assert_eq!(ctx.gpr(8), 0x8001_0000);
}

#[rstest]
// 0x9000 < 0x0000_8000 is false; a sign-extended reading would compare against 0xFFFF_8000.
#[case::sltiu_high_bit(OP_SLTIU, 0x9000, 0)]
#[case::sltiu_below(OP_SLTIU, 0x7000, 1)]
#[case::slti_negative(OP_SLTI, 0xFFFF_0000, 1)]
#[case::slti_positive(OP_SLTI, 0, 0)]
#[case::andi_keeps_low_half(OP_ANDI, 0xFFFF_FFFF, 0x8000)]
#[case::ori_no_upper_bits(OP_ORI, 0, 0x8000)]
#[case::addiu_subtracts(OP_ADDIU, 0x0001_0000, 0x8000)]
fn executed_result_follows_extension(#[case] opcode: u32, #[case] rs_value: u32, #[case] expected: u32) {
    let mut ctx = TestContext::new().with_program(&[i_type(opcode, 9, 8, 0x8000)]);
    ctx.set_gpr(9, rs_value);
    ctx.run(1);
    assert_eq!(ctx.gpr(8), expected);
}
