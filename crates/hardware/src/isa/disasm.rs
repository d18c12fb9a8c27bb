//! Instruction Disassembler for MIPS32.
//!
//! Renders a decoded instruction as
//! `0x{pc:08x} : 0x{word:08x} {mnemonic} {operands}` for debug tracing, logging,
//! and test diagnostics. Operand selection uses the same [`MachineWord`] shape
//! predicates as the decode tree, so the two never disagree on what a word is.
//!
//! # Usage
//!
//! ```ignore
//! use mipsim_core::isa::{decode::decode_word, disasm::disassemble};
//! let inst = decode_word(0x2408_0005);
//! assert_eq!(disassemble(0x400000, &inst), "0x00400000 : 0x24080005 addiu $t0, $zero, 5");
//! ```

use std::fmt::Write;

use super::abi::reg_name;
use super::bitfield::{BRANCH_CC, CC, HINT};
use super::instruction::{BranchCond, Kind, StaticInst};
use super::word::{MachineWord, Shape};
use crate::common::constants::{JUMP_REGION_MASK, WORD_SIZE};

/// Integer register operand, `$name`.
#[inline]
fn xreg(idx: usize) -> String {
    format!("${}", reg_name(idx))
}

/// Float register operand, `$fN`.
#[inline]
fn freg(idx: usize) -> String {
    format!("$f{idx}")
}

/// Disassembles `inst`, fetched at `pc`.
///
/// Unknown and unimplemented instructions print their mnemonic only.
///
/// # Arguments
///
/// * `pc` - Address the instruction was fetched from.
/// * `inst` - The decoded instruction.
///
/// # Returns
///
/// The formatted line, without trailing whitespace.
pub fn disassemble(pc: u32, inst: &StaticInst) -> String {
    let w = inst.word();
    let mut line = format!("0x{pc:08x} : 0x{:08x} {}", w.raw(), inst.mnemonic());
    let operands = if inst.is_unknown() || inst.is_unimplemented() || inst.is_nop() {
        String::new()
    } else {
        match w.shape() {
            Shape::R => r_operands(w, inst.kind()),
            Shape::I => i_operands(w, inst.kind()),
            Shape::J => j_operands(pc, w),
            Shape::F => f_operands(w),
        }
    };
    if !operands.is_empty() {
        line.push(' ');
        line.push_str(&operands);
    }
    line
}

fn r_operands(w: MachineWord, kind: &Kind) -> String {
    let (rs, rt, rd) = (xreg(w.rs()), xreg(w.rt()), xreg(w.rd()));
    if w.is_operandless() {
        String::new()
    } else if w.is_shift() {
        format!("{rd}, {rt}, {}", w.sa())
    } else if w.is_variable_shift() {
        format!("{rd}, {rt}, {rs}")
    } else if w.is_jr() {
        rs
    } else if w.is_jalr() {
        format!("{rd}, {rs}")
    } else if w.is_move_from_hilo() {
        rd
    } else if w.is_move_to_hilo() {
        rs
    } else if w.is_hilo_arith() || w.is_trap() {
        format!("{rs}, {rt}")
    } else if w.is_movci() {
        format!("{rd}, {rs}, $fcc{}", w.get(BRANCH_CC))
    } else if w.is_count_bits() {
        format!("{rd}, {rs}")
    } else if w.is_bshfl() {
        format!("{rd}, {rt}")
    } else if w.is_bit_field_op() {
        match *kind {
            Kind::Ext { pos, size, .. } | Kind::Ins { pos, size, .. } => {
                format!("{rt}, {rs}, {pos}, {size}")
            }
            _ => format!("{rt}, {rs}"),
        }
    } else {
        format!("{rd}, {rs}, {rt}")
    }
}

fn i_operands(w: MachineWord, kind: &Kind) -> String {
    let (rs, rt) = (xreg(w.rs()), xreg(w.rt()));
    let disp = w.branch_disp();
    if w.is_memory() {
        let data = if w.is_float_memory() {
            freg(w.ft())
        } else if w.is_load() || w.is_store() {
            rt
        } else {
            // pref and cache name an operation, not a register.
            w.get(HINT).to_string()
        };
        format!("{data}, {}({rs})", w.offset())
    } else if w.is_two_operand_branch() {
        if matches!(
            kind,
            Kind::Branch {
                cond: BranchCond::Always,
                ..
            }
        ) {
            disp.to_string()
        } else {
            format!("{rs}, {rt}, {disp}")
        }
    } else if w.is_one_operand_branch() {
        if w.rs() == 0 && matches!(kind, Kind::Branch { link: true, .. }) {
            disp.to_string()
        } else {
            format!("{rs}, {disp}")
        }
    } else if w.is_trap_imm() {
        format!("{rs}, {}", w.sext_imm())
    } else if w.is_float_branch() {
        let cc = w.get(BRANCH_CC);
        if cc == 0 {
            disp.to_string()
        } else {
            format!("$fcc{cc}, {disp}")
        }
    } else if w.is_cp1_control_register() {
        format!("{rt}, ${}", w.fs())
    } else if w.is_cp1_control() {
        format!("{rt}, {}", freg(w.fs()))
    } else if w.is_lui() {
        format!("{rt}, {:#x}", w.zext_imm())
    } else if w.is_logical_imm() {
        format!("{rt}, {rs}, {:#x}", w.zext_imm())
    } else {
        format!("{rt}, {rs}, {}", w.sext_imm())
    }
}

fn j_operands(pc: u32, w: MachineWord) -> String {
    let npc = pc.wrapping_add(WORD_SIZE);
    format!("0x{:08x}", (npc & JUMP_REGION_MASK) | w.jump_target())
}

fn f_operands(w: MachineWord) -> String {
    let (fd, fs, ft) = (freg(w.fd()), freg(w.fs()), freg(w.ft()));
    let mut out = String::new();
    if w.is_compare() {
        let cc = w.get(CC);
        if cc != 0 {
            let _ = write!(out, "$fcc{cc}, ");
        }
        let _ = write!(out, "{fs}, {ft}");
    } else if w.is_float_movcf() {
        let _ = write!(out, "{fd}, {fs}, $fcc{}", w.get(BRANCH_CC));
    } else if w.is_float_movgpr() {
        let _ = write!(out, "{fd}, {fs}, {}", xreg(w.rt()));
    } else if w.is_float_unary() {
        let _ = write!(out, "{fd}, {fs}");
    } else {
        let _ = write!(out, "{fd}, {fs}, {ft}");
    }
    out
}
