//! MIPS32 Instruction Decoder.
//!
//! This module turns raw words into [`StaticInst`]s. It provides:
//! 1. **Decode Tree:** [`decode_word`], a total function over every 32-bit pattern.
//!    Dispatch follows the MIPS32 opcode tables: `OPCODE_HI`, `OPCODE_LO`, then the
//!    per-group fields (`FUNC_HI`/`FUNC_LO` for SPECIAL, `REGIMM_HI`/`REGIMM_LO` for
//!    REGIMM, `FMT` then `FUNC` for COP1, down to `ND`/`TF` for the float branches).
//! 2. **Leaves:** A real instruction, an `Unimplemented` marker tagged with its
//!    coprocessor group, or `Unknown`.
//! 3. **Decode Cache:** [`Decoder`] fetches through a [`Memory`] and memoises the
//!    result per program counter according to the configured [`CachePolicy`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use super::bitfield::{
    BRANCH_CC, BSHFL, CC, CO, COND, FC, FD, FUNC_HI, FUNC_LO, LSB, MSB, ND, OPCODE_HI, OPCODE_LO,
    REGIMM_HI, REGIMM_LO, RS, RS_RT, RS_RT_INTIMM, RS_SRL, RT_RD, SA, SC, SRL, SRLV, TF,
};
use super::instruction::{
    BranchCond, ByteOp, Cp1MoveOp, FpArithOp, FpFormat, FpUnaryOp, HiLoMoveOp, HiLoOp, ImmOp,
    IntOp, Kind, Rounding, ShiftOp, Side, StaticInst, TrapCond, TrapOperand, Width,
};
use super::word::{COP1_BC, COP1_FMT_D, COP1_FMT_L, COP1_FMT_S, COP1_FMT_W, MachineWord};
use crate::common::error::{SimError, SimResult, UnimplementedGroup};
use crate::config::{CachePolicy, DecoderConfig};
use crate::soc::traits::Memory;
use crate::stats::DecodeStats;

/// `RS_RT_INTIMM` of the `sltiu` sentinel that reports a failed test program.
pub const SENTINEL_FAIL: u32 = 0xabc1;
/// `RS_RT_INTIMM` of the `sltiu` sentinel that reports a passed test program.
pub const SENTINEL_PASS: u32 = 0xabc2;

const COMPARE_S: [&str; 16] = [
    "c.f.s", "c.un.s", "c.eq.s", "c.ueq.s", "c.olt.s", "c.ult.s", "c.ole.s", "c.ule.s",
    "c.sf.s", "c.ngle.s", "c.seq.s", "c.ngl.s", "c.lt.s", "c.nge.s", "c.le.s", "c.ngt.s",
];

const COMPARE_D: [&str; 16] = [
    "c.f.d", "c.un.d", "c.eq.d", "c.ueq.d", "c.olt.d", "c.ult.d", "c.ole.d", "c.ule.d",
    "c.sf.d", "c.ngle.d", "c.seq.d", "c.ngl.d", "c.lt.d", "c.nge.d", "c.le.d", "c.ngt.d",
];

#[inline]
fn inst(mnemonic: &'static str, w: MachineWord, kind: Kind) -> StaticInst {
    StaticInst::new(mnemonic, w, kind)
}

#[inline]
fn unknown(w: MachineWord) -> StaticInst {
    StaticInst::new("unknown", w, Kind::Unknown)
}

#[inline]
fn unimplemented(mnemonic: &'static str, w: MachineWord, group: UnimplementedGroup) -> StaticInst {
    StaticInst::new(mnemonic, w, Kind::Unimplemented(group))
}

/// Picks the single- or double-precision spelling of a mnemonic.
#[inline]
const fn by_fmt(fmt: FpFormat, single: &'static str, double: &'static str) -> &'static str {
    match fmt {
        FpFormat::Single => single,
        _ => double,
    }
}

/// Decodes one instruction word.
///
/// Total: every input reaches exactly one leaf. Never fails and never panics.
///
/// # Arguments
///
/// * `raw` - The 32-bit instruction word.
///
/// # Returns
///
/// The decoded static instruction.
pub fn decode_word(raw: u32) -> StaticInst {
    let w = MachineWord::new(raw);
    match w.get(OPCODE_HI) {
        0 => decode_branch_row(w),
        1 => decode_imm_row(w),
        2 => decode_cop_row(w),
        3 => decode_special_row(w),
        4 => decode_load_row(w),
        5 => decode_store_row(w),
        6 => decode_load_cop_row(w),
        _ => decode_store_cop_row(w),
    }
}

/// `OPCODE_HI == 0`: SPECIAL, REGIMM, jumps and compare-and-branch.
fn decode_branch_row(w: MachineWord) -> StaticInst {
    let (rs, rt) = (w.rs(), w.rt());
    let disp = w.branch_disp();
    match w.get(OPCODE_LO) {
        0 => decode_special(w),
        1 => decode_regimm(w),
        2 => inst("j", w, Kind::Jump {
            target: w.jump_target(),
            link: false,
        }),
        3 => inst("jal", w, Kind::Jump {
            target: w.jump_target(),
            link: true,
        }),
        4 => {
            if w.get(RS_RT) == 0 {
                inst("b", w, Kind::Branch {
                    cond: BranchCond::Always,
                    rs,
                    rt,
                    disp,
                    link: false,
                })
            } else {
                inst("beq", w, Kind::Branch {
                    cond: BranchCond::Eq,
                    rs,
                    rt,
                    disp,
                    link: false,
                })
            }
        }
        5 => inst("bne", w, Kind::Branch {
            cond: BranchCond::Ne,
            rs,
            rt,
            disp,
            link: false,
        }),
        6 if rt == 0 => inst("blez", w, Kind::Branch {
            cond: BranchCond::Lez,
            rs,
            rt,
            disp,
            link: false,
        }),
        7 if rt == 0 => inst("bgtz", w, Kind::Branch {
            cond: BranchCond::Gtz,
            rs,
            rt,
            disp,
            link: false,
        }),
        _ => unknown(w),
    }
}

/// SPECIAL (`OPCODE == 0`), dispatched on `FUNC_HI` then `FUNC_LO`.
fn decode_special(w: MachineWord) -> StaticInst {
    let (rs, rt, rd, sa) = (w.rs(), w.rt(), w.rd(), w.sa());
    let int_op = |mnemonic, op| inst(mnemonic, w, Kind::IntOp { op, rd, rs, rt });
    let hilo = |mnemonic, op| {
        if rd != 0 || sa != 0 {
            unknown(w)
        } else {
            inst(mnemonic, w, Kind::HiLo { op, rs, rt })
        }
    };
    let trap = |mnemonic, cond| {
        inst(mnemonic, w, Kind::Trap {
            cond,
            rs,
            rhs: TrapOperand::Reg(rt),
        })
    };

    match (w.get(FUNC_HI), w.get(FUNC_LO)) {
        (0, 0) => {
            if w.get(RS) != 0 {
                unknown(w)
            } else if w.get(RT_RD) == 0 {
                match sa {
                    1 => inst("ssnop", w, Kind::Nop),
                    3 => inst("ehb", w, Kind::Barrier),
                    _ => inst("nop", w, Kind::Nop),
                }
            } else {
                inst("sll", w, Kind::Shift {
                    op: ShiftOp::Sll,
                    rd,
                    rt,
                    sa,
                })
            }
        }
        (0, 1) => {
            let on_true = w.get(TF) == 1;
            let mnemonic = if on_true { "movt" } else { "movf" };
            inst(mnemonic, w, Kind::MovCc {
                rd,
                rs,
                cc: w.get(BRANCH_CC),
                on_true,
            })
        }
        (0, 2) if w.get(RS_SRL) == 0 => {
            let (mnemonic, op) = if w.get(SRL) == 0 {
                ("srl", ShiftOp::Srl)
            } else {
                ("rotr", ShiftOp::Rotr)
            };
            inst(mnemonic, w, Kind::Shift { op, rd, rt, sa })
        }
        (0, 3) if rs == 0 => inst("sra", w, Kind::Shift {
            op: ShiftOp::Sra,
            rd,
            rt,
            sa,
        }),
        (0, 4) if sa == 0 => int_op("sllv", IntOp::Sllv),
        (0, 6) if w.get(SA) >> 1 == 0 => {
            if w.get(SRLV) == 0 {
                int_op("srlv", IntOp::Srlv)
            } else {
                int_op("rotrv", IntOp::Rotrv)
            }
        }
        (0, 7) if sa == 0 => int_op("srav", IntOp::Srav),

        (1, 0) => inst("jr", w, Kind::JumpReg { rs, link: None }),
        (1, 1) => inst("jalr", w, Kind::JumpReg { rs, link: Some(rd) }),
        (1, 2) => int_op("movz", IntOp::Movz),
        (1, 3) => int_op("movn", IntOp::Movn),
        (1, 4) => inst("syscall", w, Kind::Syscall),
        (1, 5) => inst("break", w, Kind::Break),
        (1, 7) => inst("sync", w, Kind::Barrier),

        (2, 0) => inst("mfhi", w, Kind::HiLoMove {
            op: HiLoMoveOp::Mfhi,
            reg: rd,
        }),
        (2, 1) => inst("mthi", w, Kind::HiLoMove {
            op: HiLoMoveOp::Mthi,
            reg: rs,
        }),
        (2, 2) => inst("mflo", w, Kind::HiLoMove {
            op: HiLoMoveOp::Mflo,
            reg: rd,
        }),
        (2, 3) => inst("mtlo", w, Kind::HiLoMove {
            op: HiLoMoveOp::Mtlo,
            reg: rs,
        }),

        (3, 0) => hilo("mult", HiLoOp::Mult),
        (3, 1) => hilo("multu", HiLoOp::Multu),
        (3, 2) => hilo("div", HiLoOp::Div),
        (3, 3) => hilo("divu", HiLoOp::Divu),

        (4, 0) => int_op("add", IntOp::Add),
        (4, 1) => int_op("addu", IntOp::Addu),
        (4, 2) => int_op("sub", IntOp::Sub),
        (4, 3) => int_op("subu", IntOp::Subu),
        (4, 4) => int_op("and", IntOp::And),
        (4, 5) => int_op("or", IntOp::Or),
        (4, 6) => int_op("xor", IntOp::Xor),
        (4, 7) => int_op("nor", IntOp::Nor),

        (5, 2) => int_op("slt", IntOp::Slt),
        (5, 3) => int_op("sltu", IntOp::Sltu),

        (6, 0) => trap("tge", TrapCond::Ge),
        (6, 1) => trap("tgeu", TrapCond::Geu),
        (6, 2) => trap("tlt", TrapCond::Lt),
        (6, 3) => trap("tltu", TrapCond::Ltu),
        (6, 4) => trap("teq", TrapCond::Eq),
        (6, 6) => trap("tne", TrapCond::Ne),

        _ => unknown(w),
    }
}

/// REGIMM (`OPCODE == 1`), dispatched on `REGIMM_HI` then `REGIMM_LO`.
fn decode_regimm(w: MachineWord) -> StaticInst {
    let rs = w.rs();
    let disp = w.branch_disp();
    let branch = |mnemonic, cond, link| {
        inst(mnemonic, w, Kind::Branch {
            cond,
            rs,
            rt: 0,
            disp,
            link,
        })
    };
    let trap = |mnemonic, cond| {
        inst(mnemonic, w, Kind::Trap {
            cond,
            rs,
            rhs: TrapOperand::Imm(w.sext_imm() as u32),
        })
    };

    match (w.get(REGIMM_HI), w.get(REGIMM_LO)) {
        (0, 0) => branch("bltz", BranchCond::Ltz, false),
        (0, 1) => branch("bgez", BranchCond::Gez, false),
        (0, 2) => unimplemented("bltzl", w, UnimplementedGroup::Generic),
        (0, 3) => unimplemented("bgezl", w, UnimplementedGroup::Generic),

        (1, 0) => trap("tgei", TrapCond::Ge),
        (1, 1) => trap("tgeiu", TrapCond::Geu),
        (1, 2) => trap("tlti", TrapCond::Lt),
        (1, 3) => trap("tltiu", TrapCond::Ltu),
        (1, 4) => trap("teqi", TrapCond::Eq),
        (1, 6) => trap("tnei", TrapCond::Ne),

        (2, 0) => branch("bltzal", BranchCond::Ltz, true),
        (2, 1) => {
            if rs == 0 {
                branch("bal", BranchCond::Always, true)
            } else {
                branch("bgezal", BranchCond::Gez, true)
            }
        }
        (2, 2) => unimplemented("bltzall", w, UnimplementedGroup::Generic),
        (2, 3) => unimplemented("bgezall", w, UnimplementedGroup::Generic),

        (3, 7) => unimplemented("synci", w, UnimplementedGroup::Generic),

        _ => unknown(w),
    }
}

/// `OPCODE_HI == 1`: register-immediate ALU operations.
fn decode_imm_row(w: MachineWord) -> StaticInst {
    let (rs, rt) = (w.rs(), w.rt());
    let imm_op = |mnemonic, op: ImmOp| {
        let imm = if op.sign_extends() {
            w.sext_imm() as u32
        } else {
            w.zext_imm()
        };
        inst(mnemonic, w, Kind::IntImm { op, rt, rs, imm })
    };

    match w.get(OPCODE_LO) {
        0 => imm_op("addi", ImmOp::Addi),
        1 => imm_op("addiu", ImmOp::Addiu),
        2 => imm_op("slti", ImmOp::Slti),
        3 => match w.get(RS_RT_INTIMM) {
            SENTINEL_FAIL => unimplemented("Fail", w, UnimplementedGroup::Generic),
            SENTINEL_PASS => unimplemented("Pass", w, UnimplementedGroup::Generic),
            _ => imm_op("sltiu", ImmOp::Sltiu),
        },
        4 => imm_op("andi", ImmOp::Andi),
        5 => imm_op("ori", ImmOp::Ori),
        6 => imm_op("xori", ImmOp::Xori),
        _ => {
            if rs == 0 {
                imm_op("lui", ImmOp::Lui)
            } else {
                unknown(w)
            }
        }
    }
}

/// `OPCODE_HI == 2`: coprocessors and the likely branches.
fn decode_cop_row(w: MachineWord) -> StaticInst {
    match w.get(OPCODE_LO) {
        0 => decode_cop0(w),
        1 => decode_cop1(w),
        2 => decode_cop2(w),
        3 => decode_cop1x(w),
        4 => unimplemented("beql", w, UnimplementedGroup::Generic),
        5 => unimplemented("bnel", w, UnimplementedGroup::Generic),
        6 => unimplemented("blezl", w, UnimplementedGroup::Generic),
        _ => unimplemented("bgtzl", w, UnimplementedGroup::Generic),
    }
}

/// COP0. Nothing in the system coprocessor is modelled; every recognised encoding
/// becomes a CP0 marker naming the intended instruction.
fn decode_cop0(w: MachineWord) -> StaticInst {
    let cp0 = |mnemonic| unimplemented(mnemonic, w, UnimplementedGroup::Cp0);
    if w.get(CO) == 1 {
        return match w.func() {
            0x01 => cp0("tlbr"),
            0x02 => cp0("tlbwi"),
            0x06 => cp0("tlbwr"),
            0x08 => cp0("tlbp"),
            0x18 => cp0("eret"),
            0x1f => cp0("deret"),
            0x20 => cp0("wait"),
            _ => unknown(w),
        };
    }
    match w.get(RS) {
        0x00 => cp0("mfc0"),
        0x04 => cp0("mtc0"),
        0x0a => cp0("rdpgpr"),
        0x0b => {
            if w.get(SC) == 1 {
                cp0("ei")
            } else {
                cp0("di")
            }
        }
        0x0e => cp0("wrpgpr"),
        _ => unknown(w),
    }
}

/// COP2 is implementation-defined; every encoding is a CP2 marker.
fn decode_cop2(w: MachineWord) -> StaticInst {
    let cp2 = |mnemonic| unimplemented(mnemonic, w, UnimplementedGroup::Cp2);
    match w.get(RS) {
        0x00 => cp2("mfc2"),
        0x02 => cp2("cfc2"),
        0x03 => cp2("mfhc2"),
        0x04 => cp2("mtc2"),
        0x06 => cp2("ctc2"),
        0x07 => cp2("mthc2"),
        0x08 => cp2("bc2"),
        0x10..=0x1f => cp2("cop2"),
        _ => unknown(w),
    }
}

/// COP1X: indexed float memory and fused multiply-add; none modelled.
fn decode_cop1x(w: MachineWord) -> StaticInst {
    let cp1 = |mnemonic| unimplemented(mnemonic, w, UnimplementedGroup::Cp1);
    match (w.get(FUNC_HI), w.get(FUNC_LO)) {
        (0, 0) => cp1("lwxc1"),
        (0, 1) => cp1("ldxc1"),
        (0, 5) => cp1("luxc1"),
        (1, 0) => cp1("swxc1"),
        (1, 1) => cp1("sdxc1"),
        (1, 5) => cp1("suxc1"),
        (1, 7) => cp1("prefx"),
        (3, 6) => cp1("alnv.ps"),
        (4..=7, fmt3) => {
            let names: [&'static str; 3] = match w.get(FUNC_HI) {
                4 => ["madd.s", "madd.d", "madd.ps"],
                5 => ["msub.s", "msub.d", "msub.ps"],
                6 => ["nmadd.s", "nmadd.d", "nmadd.ps"],
                _ => ["nmsub.s", "nmsub.d", "nmsub.ps"],
            };
            match fmt3 {
                0 => cp1(names[0]),
                1 => cp1(names[1]),
                6 => cp1(names[2]),
                _ => unknown(w),
            }
        }
        _ => unknown(w),
    }
}

/// COP1, dispatched on `FMT` (the `rs` slot).
fn decode_cop1(w: MachineWord) -> StaticInst {
    let (rt, fs) = (w.rt(), w.fs());
    let cp1_move = |mnemonic, op| {
        if w.raw() & 0x7ff != 0 {
            unknown(w)
        } else {
            inst(mnemonic, w, Kind::Cp1Move { op, rt, fs })
        }
    };

    match w.fmt() {
        0x00 => cp1_move("mfc1", Cp1MoveOp::Mfc1),
        0x02 => cp1_move("cfc1", Cp1MoveOp::Cfc1),
        0x03 => unimplemented("mfhc1", w, UnimplementedGroup::Cp1),
        0x04 => cp1_move("mtc1", Cp1MoveOp::Mtc1),
        0x06 => cp1_move("ctc1", Cp1MoveOp::Ctc1),
        0x07 => unimplemented("mthc1", w, UnimplementedGroup::Cp1),
        COP1_BC => decode_bc1(w),
        COP1_FMT_S => decode_cop1_fmt(w, FpFormat::Single),
        COP1_FMT_D => decode_cop1_fmt(w, FpFormat::Double),
        COP1_FMT_W => decode_cop1_fixed(w, FpFormat::Word),
        COP1_FMT_L => decode_cop1_fixed(w, FpFormat::Long),
        0x16 => unimplemented("ps", w, UnimplementedGroup::Cp1),
        _ => unknown(w),
    }
}

/// `bc1f`, `bc1t`, `bc1fl`, `bc1tl`, dispatched on `ND` then `TF`.
fn decode_bc1(w: MachineWord) -> StaticInst {
    let likely = w.get(ND) == 1;
    let on_true = w.get(TF) == 1;
    let mnemonic = match (likely, on_true) {
        (false, false) => "bc1f",
        (false, true) => "bc1t",
        (true, false) => "bc1fl",
        (true, true) => "bc1tl",
    };
    inst(mnemonic, w, Kind::FpBranch {
        cc: w.get(BRANCH_CC),
        on_true,
        likely,
        disp: w.branch_disp(),
    })
}

/// COP1 operations in S or D format, dispatched on `FUNC_HI` then `FUNC_LO`.
fn decode_cop1_fmt(w: MachineWord, fmt: FpFormat) -> StaticInst {
    let (fd, fs, ft) = (w.fd(), w.fs(), w.ft());
    let pick = |single, double| by_fmt(fmt, single, double);
    let arith = |single, double, op| {
        inst(pick(single, double), w, Kind::FpArith {
            op,
            fmt,
            fd,
            fs,
            ft,
        })
    };
    let unary = |single, double, op| {
        if ft != 0 {
            unknown(w)
        } else {
            inst(pick(single, double), w, Kind::FpUnary { op, fmt, fd, fs })
        }
    };
    let convert = |single, double, to, rounding| {
        if ft != 0 {
            unknown(w)
        } else {
            inst(pick(single, double), w, Kind::FpConvert {
                from: fmt,
                to,
                rounding,
                fd,
                fs,
            })
        }
    };

    match (w.get(FUNC_HI), w.get(FUNC_LO)) {
        (0, 0) => arith("add.s", "add.d", FpArithOp::Add),
        (0, 1) => arith("sub.s", "sub.d", FpArithOp::Sub),
        (0, 2) => arith("mul.s", "mul.d", FpArithOp::Mul),
        (0, 3) => arith("div.s", "div.d", FpArithOp::Div),
        (0, 4) => unary("sqrt.s", "sqrt.d", FpUnaryOp::Sqrt),
        (0, 5) => unary("abs.s", "abs.d", FpUnaryOp::Abs),
        (0, 6) => unary("mov.s", "mov.d", FpUnaryOp::Mov),
        (0, 7) => unary("neg.s", "neg.d", FpUnaryOp::Neg),

        (1, 0) => convert("round.l.s", "round.l.d", FpFormat::Long, Rounding::Round),
        (1, 1) => convert("trunc.l.s", "trunc.l.d", FpFormat::Long, Rounding::Trunc),
        (1, 2) => convert("ceil.l.s", "ceil.l.d", FpFormat::Long, Rounding::Ceil),
        (1, 3) => convert("floor.l.s", "floor.l.d", FpFormat::Long, Rounding::Floor),
        (1, 4) => convert("round.w.s", "round.w.d", FpFormat::Word, Rounding::Round),
        (1, 5) => convert("trunc.w.s", "trunc.w.d", FpFormat::Word, Rounding::Trunc),
        (1, 6) => convert("ceil.w.s", "ceil.w.d", FpFormat::Word, Rounding::Ceil),
        (1, 7) => convert("floor.w.s", "floor.w.d", FpFormat::Word, Rounding::Floor),

        (2, 1) => {
            let on_true = w.get(TF) == 1;
            let mnemonic = match (fmt, on_true) {
                (FpFormat::Single, false) => "movf.s",
                (FpFormat::Single, true) => "movt.s",
                (_, false) => "movf.d",
                (_, true) => "movt.d",
            };
            inst(mnemonic, w, Kind::FpMoveCc {
                fmt,
                fd,
                fs,
                cc: w.get(BRANCH_CC),
                on_true,
            })
        }
        (2, 2) => inst(pick("movz.s", "movz.d"), w, Kind::FpMoveGpr {
            fmt,
            fd,
            fs,
            rt: ft,
            on_zero: true,
        }),
        (2, 3) => inst(pick("movn.s", "movn.d"), w, Kind::FpMoveGpr {
            fmt,
            fd,
            fs,
            rt: ft,
            on_zero: false,
        }),
        (2, 5) => unimplemented(pick("recip.s", "recip.d"), w, UnimplementedGroup::Cp1),
        (2, 6) => unimplemented(pick("rsqrt.s", "rsqrt.d"), w, UnimplementedGroup::Cp1),

        (4, 0) if fmt == FpFormat::Double => {
            convert("cvt.s.s", "cvt.s.d", FpFormat::Single, Rounding::Current)
        }
        (4, 1) if fmt == FpFormat::Single => {
            convert("cvt.d.s", "cvt.d.d", FpFormat::Double, Rounding::Current)
        }
        (4, 4) => convert("cvt.w.s", "cvt.w.d", FpFormat::Word, Rounding::Current),
        (4, 5) => convert("cvt.l.s", "cvt.l.d", FpFormat::Long, Rounding::Current),
        (4, 6) if fmt == FpFormat::Single => {
            unimplemented("cvt.ps.s", w, UnimplementedGroup::Cp1)
        }

        (6 | 7, _) if w.get(FC) == 3 && w.get(FD) & 0x3 == 0 => {
            let cond = w.get(COND);
            let names = if fmt == FpFormat::Single {
                &COMPARE_S
            } else {
                &COMPARE_D
            };
            inst(names[cond as usize], w, Kind::FpCompare {
                fmt,
                cond,
                cc: w.get(CC),
                fs,
                ft,
            })
        }

        _ => unknown(w),
    }
}

/// COP1 conversions from the fixed-point W and L formats.
fn decode_cop1_fixed(w: MachineWord, from: FpFormat) -> StaticInst {
    if w.ft() != 0 {
        return unknown(w);
    }
    let (fd, fs) = (w.fd(), w.fs());
    let word = from == FpFormat::Word;
    let (mnemonic, to) = match (w.get(FUNC_HI), w.get(FUNC_LO)) {
        (4, 0) => (if word { "cvt.s.w" } else { "cvt.s.l" }, FpFormat::Single),
        (4, 1) => (if word { "cvt.d.w" } else { "cvt.d.l" }, FpFormat::Double),
        (4, 6) if word => return unimplemented("cvt.ps.pw", w, UnimplementedGroup::Cp1),
        _ => return unknown(w),
    };
    inst(mnemonic, w, Kind::FpConvert {
        from,
        to,
        rounding: Rounding::Current,
        fd,
        fs,
    })
}

/// `OPCODE_HI == 3`: SPECIAL2, SPECIAL3 and `jalx`.
fn decode_special_row(w: MachineWord) -> StaticInst {
    match w.get(OPCODE_LO) {
        4 => decode_special2(w),
        5 => unimplemented("jalx", w, UnimplementedGroup::Generic),
        7 => decode_special3(w),
        _ => unknown(w),
    }
}

/// SPECIAL2 (`OPCODE == 0x1c`).
fn decode_special2(w: MachineWord) -> StaticInst {
    let (rs, rt, rd) = (w.rs(), w.rt(), w.rd());
    let hilo = |mnemonic, op| inst(mnemonic, w, Kind::HiLo { op, rs, rt });
    match (w.get(FUNC_HI), w.get(FUNC_LO)) {
        (0, 0) => hilo("madd", HiLoOp::Madd),
        (0, 1) => hilo("maddu", HiLoOp::Maddu),
        (0, 2) => inst("mul", w, Kind::IntOp {
            op: IntOp::Mul,
            rd,
            rs,
            rt,
        }),
        (0, 4) => hilo("msub", HiLoOp::Msub),
        (0, 5) => hilo("msubu", HiLoOp::Msubu),
        (4, 0) => inst("clz", w, Kind::CountBits {
            ones: false,
            rd,
            rs,
        }),
        (4, 1) => inst("clo", w, Kind::CountBits { ones: true, rd, rs }),
        (7, 7) => unimplemented("sdbbp", w, UnimplementedGroup::Generic),
        _ => unknown(w),
    }
}

/// SPECIAL3 (`OPCODE == 0x1f`).
fn decode_special3(w: MachineWord) -> StaticInst {
    let (rs, rt, rd) = (w.rs(), w.rt(), w.rd());
    let (msb, lsb) = (w.get(MSB), w.get(LSB));
    match (w.get(FUNC_HI), w.get(FUNC_LO)) {
        (0, 0) => {
            let size = msb + 1;
            if lsb + size > 32 {
                unknown(w)
            } else {
                inst("ext", w, Kind::Ext {
                    rt,
                    rs,
                    pos: lsb,
                    size,
                })
            }
        }
        (0, 4) => {
            if msb < lsb {
                unknown(w)
            } else {
                inst("ins", w, Kind::Ins {
                    rt,
                    rs,
                    pos: lsb,
                    size: msb - lsb + 1,
                })
            }
        }
        (4, 0) if rs == 0 => match w.get(BSHFL) {
            0x02 => inst("wsbh", w, Kind::ByteOp {
                op: ByteOp::Wsbh,
                rd,
                rt,
            }),
            0x10 => inst("seb", w, Kind::ByteOp {
                op: ByteOp::Seb,
                rd,
                rt,
            }),
            0x18 => inst("seh", w, Kind::ByteOp {
                op: ByteOp::Seh,
                rd,
                rt,
            }),
            _ => unknown(w),
        },
        (7, 3) => unimplemented("rdhwr", w, UnimplementedGroup::Generic),
        _ => unknown(w),
    }
}

/// `OPCODE_HI == 4`: integer loads.
fn decode_load_row(w: MachineWord) -> StaticInst {
    let (rt, base, offset) = (w.rt(), w.rs(), w.offset());
    let load = |mnemonic, width, signed| {
        inst(mnemonic, w, Kind::Load {
            width,
            signed,
            rt,
            base,
            offset,
        })
    };
    let partial = |mnemonic, side| {
        inst(mnemonic, w, Kind::LoadPartial {
            side,
            rt,
            base,
            offset,
        })
    };
    match w.get(OPCODE_LO) {
        0 => load("lb", Width::Byte, true),
        1 => load("lh", Width::Half, true),
        2 => partial("lwl", Side::Left),
        3 => load("lw", Width::Word, true),
        4 => load("lbu", Width::Byte, false),
        5 => load("lhu", Width::Half, false),
        6 => partial("lwr", Side::Right),
        _ => unknown(w),
    }
}

/// `OPCODE_HI == 5`: integer stores and `cache`.
fn decode_store_row(w: MachineWord) -> StaticInst {
    let (rt, base, offset) = (w.rt(), w.rs(), w.offset());
    let store = |mnemonic, width| {
        inst(mnemonic, w, Kind::Store {
            width,
            rt,
            base,
            offset,
        })
    };
    let partial = |mnemonic, side| {
        inst(mnemonic, w, Kind::StorePartial {
            side,
            rt,
            base,
            offset,
        })
    };
    match w.get(OPCODE_LO) {
        0 => store("sb", Width::Byte),
        1 => store("sh", Width::Half),
        2 => partial("swl", Side::Left),
        3 => store("sw", Width::Word),
        6 => partial("swr", Side::Right),
        7 => unimplemented("cache", w, UnimplementedGroup::Cp0),
        _ => unknown(w),
    }
}

/// `OPCODE_HI == 6`: `ll`, coprocessor loads, `pref`.
fn decode_load_cop_row(w: MachineWord) -> StaticInst {
    let (rt, base, offset) = (w.rt(), w.rs(), w.offset());
    match w.get(OPCODE_LO) {
        0 => inst("ll", w, Kind::LoadLinked { rt, base, offset }),
        1 => inst("lwc1", w, Kind::LoadFp {
            double: false,
            ft: rt,
            base,
            offset,
        }),
        2 => unimplemented("lwc2", w, UnimplementedGroup::Cp2),
        3 => inst("pref", w, Kind::Nop),
        5 => inst("ldc1", w, Kind::LoadFp {
            double: true,
            ft: rt,
            base,
            offset,
        }),
        6 => unimplemented("ldc2", w, UnimplementedGroup::Cp2),
        _ => unknown(w),
    }
}

/// `OPCODE_HI == 7`: `sc`, coprocessor stores.
fn decode_store_cop_row(w: MachineWord) -> StaticInst {
    let (rt, base, offset) = (w.rt(), w.rs(), w.offset());
    match w.get(OPCODE_LO) {
        0 => inst("sc", w, Kind::StoreConditional { rt, base, offset }),
        1 => inst("swc1", w, Kind::StoreFp {
            double: false,
            ft: rt,
            base,
            offset,
        }),
        2 => unimplemented("swc2", w, UnimplementedGroup::Cp2),
        5 => inst("sdc1", w, Kind::StoreFp {
            double: true,
            ft: rt,
            base,
            offset,
        }),
        6 => unimplemented("sdc2", w, UnimplementedGroup::Cp2),
        _ => unknown(w),
    }
}

/// One decode cache slot.
#[derive(Debug)]
struct CacheEntry {
    word: u32,
    inst: Arc<StaticInst>,
}

/// Fetching decoder with a per-PC cache.
///
/// One instance per core. Entries live until invalidated; nothing is evicted.
#[derive(Debug, Default)]
pub struct Decoder {
    config: DecoderConfig,
    cache: HashMap<u32, CacheEntry>,
    stats: DecodeStats,
}

impl Decoder {
    /// Creates a decoder with an empty cache.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            cache: HashMap::new(),
            stats: DecodeStats::default(),
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode statistics since construction.
    pub const fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Number of cached program counters.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the instruction at `pc`, decoding it on a cache miss.
    ///
    /// # Arguments
    ///
    /// * `pc` - Address of the instruction.
    /// * `memory` - Memory the instruction word is fetched from.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Fetch`] if the word at `pc` cannot be read. Under
    /// [`CachePolicy::ByPc`] a cached entry is returned without touching memory.
    pub fn decode(&mut self, pc: u32, memory: &mut dyn Memory) -> SimResult<Arc<StaticInst>> {
        match self.config.cache_policy {
            CachePolicy::ByPc => {
                if let Some(entry) = self.cache.get(&pc) {
                    self.stats.hits += 1;
                    return Ok(Arc::clone(&entry.inst));
                }
                let word = Self::fetch(pc, memory)?;
                Ok(self.fill(pc, word))
            }
            CachePolicy::ByPcAndWord => {
                let word = Self::fetch(pc, memory)?;
                if let Some(entry) = self.cache.get(&pc) {
                    if entry.word == word {
                        self.stats.hits += 1;
                        return Ok(Arc::clone(&entry.inst));
                    }
                    debug!("stale decode at {pc:#010x}: {:#010x} -> {word:#010x}", entry.word);
                    self.stats.invalidations += 1;
                }
                Ok(self.fill(pc, word))
            }
            CachePolicy::Disabled => {
                let word = Self::fetch(pc, memory)?;
                Ok(Arc::new(self.decode_miss(pc, word)))
            }
        }
    }

    fn fetch(pc: u32, memory: &mut dyn Memory) -> SimResult<u32> {
        memory
            .read_u32(pc)
            .map_err(|fault| SimError::Fetch { pc, fault })
    }

    fn fill(&mut self, pc: u32, word: u32) -> Arc<StaticInst> {
        let inst = Arc::new(self.decode_miss(pc, word));
        let _ = self.cache.insert(
            pc,
            CacheEntry {
                word,
                inst: Arc::clone(&inst),
            },
        );
        inst
    }

    fn decode_miss(&mut self, pc: u32, word: u32) -> StaticInst {
        let inst = decode_word(word);
        self.stats.misses += 1;
        if inst.is_unknown() {
            self.stats.unknown += 1;
        } else if inst.is_unimplemented() {
            self.stats.unimplemented += 1;
        }
        trace!("decode miss at {pc:#010x}: {word:#010x} -> {}", inst.mnemonic());
        inst
    }

    /// Drops the cached decode at `pc`. Returns `true` if an entry existed.
    pub fn invalidate(&mut self, pc: u32) -> bool {
        let removed = self.cache.remove(&pc).is_some();
        if removed {
            self.stats.invalidations += 1;
            debug!("decode cache: invalidated {pc:#010x}");
        }
        removed
    }

    /// Drops every cached decode whose PC lies in `[start, start + len)`.
    ///
    /// Call after writing into a code region. Returns the number of entries removed.
    pub fn invalidate_range(&mut self, start: u32, len: u32) -> usize {
        let end = u64::from(start) + u64::from(len);
        let before = self.cache.len();
        self.cache.retain(|&pc, _| {
            let pc = u64::from(pc);
            pc < u64::from(start) || pc >= end
        });
        let removed = before - self.cache.len();
        if removed > 0 {
            self.stats.invalidations += removed as u64;
            debug!(
                "decode cache: invalidated {removed} entries in [{start:#010x}, {end:#010x})"
            );
        }
        removed
    }

    /// Empties the cache. Statistics are kept.
    pub fn clear(&mut self) {
        let removed = self.cache.len();
        self.cache.clear();
        self.stats.invalidations += removed as u64;
        debug!("decode cache: cleared {removed} entries");
    }

    /// Returns the cached instruction at `pc` without fetching.
    pub fn cached(&self, pc: u32) -> Option<Arc<StaticInst>> {
        self.cache.get(&pc).map(|entry| Arc::clone(&entry.inst))
    }
}
