//! Dynamic Instruction Binding.

use std::sync::Arc;

use mipsim_core::core::{DynamicInstruction, Thread};
use mipsim_core::isa::decode::decode_word;
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::*;
use crate::common::harness::{TEXT_BASE, TestContext};

#[test]
fn execute_clears_zero_first() {
    let mut ctx = TestContext::new();
    ctx.hart.regs_mut().set_gpr(0, 0xFFFF_FFFF);
    let inst = Arc::new(decode_word(addu(8, 0, 0)));
    let mut dyn_inst = DynamicInstruction::new(&mut ctx.hart, TEXT_BASE, inst);
    dyn_inst.execute().unwrap();
    assert_eq!(ctx.gpr(8), 0);
    assert_eq!(ctx.gpr(0), 0);
}

#[test]
fn shares_the_static_record() {
    let mut ctx = TestContext::new();
    let inst = Arc::new(decode_word(addiu(8, 0, 1)));
    let dyn_inst = DynamicInstruction::new(&mut ctx.hart, TEXT_BASE, Arc::clone(&inst));
    assert_eq!(dyn_inst.pc(), TEXT_BASE);
    assert_eq!(dyn_inst.inst(), &*inst);
    assert_eq!(Arc::strong_count(&inst), 2);
}

#[test]
fn disassembles_at_its_pc() {
    let mut ctx = TestContext::new();
    let dyn_inst = DynamicInstruction::new(&mut ctx.hart, 0x0040_0010, Arc::new(decode_word(jr(31))));
    assert_eq!(dyn_inst.disassemble(), "0x00400010 : 0x03e00008 jr $ra");
}

#[test]
fn branch_target_ignores_condition() {
    let mut ctx = TestContext::new();
    ctx.set_gpr(8, 1);
    let inst = Arc::new(decode_word(beq(8, 9, 0x20)));
    let dyn_inst = DynamicInstruction::new(&mut ctx.hart, TEXT_BASE, inst);
    assert_eq!(dyn_inst.target_pc(), Some(TEXT_BASE + 4 + 0x20));
}

#[test]
fn register_jump_target_reads_rs() {
    let mut ctx = TestContext::new();
    ctx.set_gpr(31, 0x0040_1000);
    let dyn_inst = DynamicInstruction::new(&mut ctx.hart, TEXT_BASE, Arc::new(decode_word(jr(31))));
    assert_eq!(dyn_inst.target_pc(), Some(0x0040_1000));
}

#[test]
fn non_control_has_no_target() {
    let mut ctx = TestContext::new();
    let dyn_inst = DynamicInstruction::new(&mut ctx.hart, TEXT_BASE, Arc::new(decode_word(nop())));
    assert_eq!(dyn_inst.target_pc(), None);
    assert!(format!("{dyn_inst:?}").contains("hart0"));
}
