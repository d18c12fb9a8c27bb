//! MIPS32 instruction encoders.
//!
//! Each helper builds the raw 32-bit word for one instruction so tests can read
//! like assembly. Field values are masked to their width.

#![allow(dead_code)]

use mipsim_core::isa::word::{OP_J, OP_JAL, OP_SPECIAL};

/// Encode an R-type (SPECIAL) instruction.
pub const fn r_type(rs: u32, rt: u32, rd: u32, sa: u32, func: u32) -> u32 {
    (OP_SPECIAL << 26)
        | (rs & 0x1F) << 21
        | (rt & 0x1F) << 16
        | (rd & 0x1F) << 11
        | (sa & 0x1F) << 6
        | (func & 0x3F)
}

/// Encode an I-type instruction.
pub const fn i_type(op: u32, rs: u32, rt: u32, imm: u32) -> u32 {
    (op & 0x3F) << 26 | (rs & 0x1F) << 21 | (rt & 0x1F) << 16 | (imm & 0xFFFF)
}

/// Encode a J-type instruction to byte address `target`.
pub const fn j_type(op: u32, target: u32) -> u32 {
    (op & 0x3F) << 26 | ((target >> 2) & 0x03FF_FFFF)
}

/// Encode a COP1 arithmetic instruction (`op.fmt fd, fs, ft`).
pub const fn fr_type(fmt: u32, ft: u32, fs: u32, fd: u32, func: u32) -> u32 {
    (OP_COP1 << 26)
        | (fmt & 0x1F) << 21
        | (ft & 0x1F) << 16
        | (fs & 0x1F) << 11
        | (fd & 0x1F) << 6
        | (func & 0x3F)
}

/// Branch offset field for a byte displacement from the delay slot.
pub const fn branch_offset(disp: i32) -> u32 {
    ((disp >> 2) as u32) & 0xFFFF
}

// ─── Opcodes ─────────────────────────────────────────────────────────────────

pub const OP_REGIMM: u32 = 0x01;
pub const OP_BEQ: u32 = 0x04;
pub const OP_BNE: u32 = 0x05;
pub const OP_ADDI: u32 = 0x08;
pub const OP_ADDIU: u32 = 0x09;
pub const OP_SLTI: u32 = 0x0A;
pub const OP_SLTIU: u32 = 0x0B;
pub const OP_ANDI: u32 = 0x0C;
pub const OP_ORI: u32 = 0x0D;
pub const OP_LUI: u32 = 0x0F;
pub const OP_COP1: u32 = 0x11;
pub const OP_LB: u32 = 0x20;
pub const OP_LH: u32 = 0x21;
pub const OP_LWL: u32 = 0x22;
pub const OP_LW: u32 = 0x23;
pub const OP_LBU: u32 = 0x24;
pub const OP_LWR: u32 = 0x26;
pub const OP_SB: u32 = 0x28;
pub const OP_SWL: u32 = 0x2A;
pub const OP_SW: u32 = 0x2B;
pub const OP_SWR: u32 = 0x2E;
pub const OP_LL: u32 = 0x30;
pub const OP_LWC1: u32 = 0x31;
pub const OP_LDC1: u32 = 0x35;
pub const OP_SC: u32 = 0x38;
pub const OP_SWC1: u32 = 0x39;
pub const OP_SDC1: u32 = 0x3D;

// ─── SPECIAL functions ───────────────────────────────────────────────────────

pub const FN_SLL: u32 = 0x00;
pub const FN_JR: u32 = 0x08;
pub const FN_JALR: u32 = 0x09;
pub const FN_SYSCALL: u32 = 0x0C;
pub const FN_BREAK: u32 = 0x0D;
pub const FN_MFHI: u32 = 0x10;
pub const FN_MFLO: u32 = 0x12;
pub const FN_DIV: u32 = 0x1A;
pub const FN_ADD: u32 = 0x20;
pub const FN_ADDU: u32 = 0x21;
pub const FN_SUB: u32 = 0x22;
pub const FN_TEQ: u32 = 0x34;

// ─── COP1 ────────────────────────────────────────────────────────────────────

pub const FMT_S: u32 = 0x10;
pub const FMT_D: u32 = 0x11;
pub const FMT_W: u32 = 0x14;
pub const FN_FADD: u32 = 0x00;
pub const FN_FABS: u32 = 0x05;
pub const FN_FNEG: u32 = 0x07;
pub const FN_TRUNC_W: u32 = 0x0D;
pub const FN_CVT_D: u32 = 0x21;
pub const FN_CVT_W: u32 = 0x24;

// ─── Named instructions ──────────────────────────────────────────────────────

pub const fn nop() -> u32 {
    0
}

pub const fn addiu(rt: u32, rs: u32, imm: i32) -> u32 {
    i_type(OP_ADDIU, rs, rt, imm as u32)
}

pub const fn addi(rt: u32, rs: u32, imm: i32) -> u32 {
    i_type(OP_ADDI, rs, rt, imm as u32)
}

pub const fn ori(rt: u32, rs: u32, imm: u32) -> u32 {
    i_type(OP_ORI, rs, rt, imm)
}

pub const fn lui(rt: u32, imm: u32) -> u32 {
    i_type(OP_LUI, 0, rt, imm)
}

pub const fn add(rd: u32, rs: u32, rt: u32) -> u32 {
    r_type(rs, rt, rd, 0, FN_ADD)
}

pub const fn addu(rd: u32, rs: u32, rt: u32) -> u32 {
    r_type(rs, rt, rd, 0, FN_ADDU)
}

pub const fn sub(rd: u32, rs: u32, rt: u32) -> u32 {
    r_type(rs, rt, rd, 0, FN_SUB)
}

pub const fn div(rs: u32, rt: u32) -> u32 {
    r_type(rs, rt, 0, 0, FN_DIV)
}

pub const fn mfhi(rd: u32) -> u32 {
    r_type(0, 0, rd, 0, FN_MFHI)
}

pub const fn mflo(rd: u32) -> u32 {
    r_type(0, 0, rd, 0, FN_MFLO)
}

pub const fn teq(rs: u32, rt: u32) -> u32 {
    r_type(rs, rt, 0, 0, FN_TEQ)
}

pub const fn syscall() -> u32 {
    r_type(0, 0, 0, 0, FN_SYSCALL)
}

pub const fn brk() -> u32 {
    r_type(0, 0, 0, 0, FN_BREAK)
}

pub const fn jr(rs: u32) -> u32 {
    r_type(rs, 0, 0, 0, FN_JR)
}

pub const fn jalr(rd: u32, rs: u32) -> u32 {
    r_type(rs, 0, rd, 0, FN_JALR)
}

pub const fn j(target: u32) -> u32 {
    j_type(OP_J, target)
}

pub const fn jal(target: u32) -> u32 {
    j_type(OP_JAL, target)
}

pub const fn beq(rs: u32, rt: u32, disp: i32) -> u32 {
    i_type(OP_BEQ, rs, rt, branch_offset(disp))
}

pub const fn bne(rs: u32, rt: u32, disp: i32) -> u32 {
    i_type(OP_BNE, rs, rt, branch_offset(disp))
}

/// `bgezal rs, disp` (`bal` when `rs == 0`).
pub const fn bgezal(rs: u32, disp: i32) -> u32 {
    i_type(OP_REGIMM, rs, 0x11, branch_offset(disp))
}

pub const fn lw(rt: u32, base: u32, offset: i32) -> u32 {
    i_type(OP_LW, base, rt, offset as u32)
}

pub const fn sw(rt: u32, base: u32, offset: i32) -> u32 {
    i_type(OP_SW, base, rt, offset as u32)
}

/// Load/store in any I-type memory format.
pub const fn mem(op: u32, rt: u32, base: u32, offset: i32) -> u32 {
    i_type(op, base, rt, offset as u32)
}

/// `mfc1` (0), `cfc1` (2), `mtc1` (4), `ctc1` (6).
pub const fn cp1_move(sub: u32, rt: u32, fs: u32) -> u32 {
    (OP_COP1 << 26) | (sub & 0x1F) << 21 | (rt & 0x1F) << 16 | (fs & 0x1F) << 11
}

/// `c.cond.fmt` writing condition code `cc`.
pub const fn c_cond(fmt: u32, cond: u32, cc: u32, fs: u32, ft: u32) -> u32 {
    fr_type(fmt, ft, fs, (cc & 0x7) << 2, 0x30 | (cond & 0xF))
}

/// `bc1f`/`bc1t`/`bc1fl`/`bc1tl` on condition code `cc`.
pub const fn bc1(cc: u32, likely: bool, on_true: bool, disp: i32) -> u32 {
    (OP_COP1 << 26)
        | 0x08 << 21
        | (cc & 0x7) << 18
        | (likely as u32) << 17
        | (on_true as u32) << 16
        | branch_offset(disp)
}
