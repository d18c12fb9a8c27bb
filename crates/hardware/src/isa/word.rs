//! The raw MIPS32 instruction word.
//!
//! [`MachineWord`] wraps one `u32` and answers two kinds of questions:
//! 1. **Fields:** `word.get(field)` for any [`BitField`], plus named shortcuts.
//! 2. **Shape:** which of the R/I/J/F formats the word uses, and ISA grouping
//!    predicates (shift, compare, syscall, float branch, ...). The decode tree and
//!    the disassembler both consult these predicates so their classifications agree.

use std::fmt;

use super::bitfield::{self, BitField, sign_extend};

/// SPECIAL primary opcode.
pub const OP_SPECIAL: u32 = 0x00;
/// REGIMM primary opcode.
pub const OP_REGIMM: u32 = 0x01;
/// `j` primary opcode.
pub const OP_J: u32 = 0x02;
/// `jal` primary opcode.
pub const OP_JAL: u32 = 0x03;
/// `beq` primary opcode.
pub const OP_BEQ: u32 = 0x04;
/// `bne` primary opcode.
pub const OP_BNE: u32 = 0x05;
/// `blez` primary opcode.
pub const OP_BLEZ: u32 = 0x06;
/// `bgtz` primary opcode.
pub const OP_BGTZ: u32 = 0x07;
/// `andi` primary opcode.
pub const OP_ANDI: u32 = 0x0c;
/// `ori` primary opcode.
pub const OP_ORI: u32 = 0x0d;
/// `xori` primary opcode.
pub const OP_XORI: u32 = 0x0e;
/// `lui` primary opcode.
pub const OP_LUI: u32 = 0x0f;
/// COP0 primary opcode.
pub const OP_COP0: u32 = 0x10;
/// COP1 primary opcode.
pub const OP_COP1: u32 = 0x11;
/// COP2 primary opcode.
pub const OP_COP2: u32 = 0x12;
/// COP1X primary opcode.
pub const OP_COP1X: u32 = 0x13;
/// SPECIAL2 primary opcode.
pub const OP_SPECIAL2: u32 = 0x1c;
/// SPECIAL3 primary opcode.
pub const OP_SPECIAL3: u32 = 0x1f;

/// COP1 `rs` value selecting the `bc1*` branches.
pub const COP1_BC: u32 = 0x08;
/// First COP1 `rs` value that names an operand format.
pub const COP1_FMT_S: u32 = 0x10;
/// COP1 double format.
pub const COP1_FMT_D: u32 = 0x11;
/// COP1 word format.
pub const COP1_FMT_W: u32 = 0x14;
/// COP1 long format.
pub const COP1_FMT_L: u32 = 0x15;

/// The four MIPS32 instruction formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Register format: SPECIAL, SPECIAL2, SPECIAL3.
    R,
    /// Immediate format: everything not covered by the other shapes.
    I,
    /// Jump format: `j`, `jal`.
    J,
    /// Floating-point format: COP1 format operations and COP1X.
    F,
}

/// A 32-bit MIPS32 instruction word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MachineWord(u32);

impl MachineWord {
    /// Wraps a raw instruction word.
    #[inline(always)]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw instruction bits.
    #[inline(always)]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Extracts `field`, right-aligned.
    #[inline(always)]
    pub const fn get(self, field: BitField) -> u32 {
        field.extract(self.0)
    }

    /// Primary opcode.
    #[inline]
    pub const fn opcode(self) -> u32 {
        self.get(bitfield::OPCODE)
    }

    /// Function code.
    #[inline]
    pub const fn func(self) -> u32 {
        self.get(bitfield::FUNC)
    }

    /// `rs` register index.
    #[inline]
    pub const fn rs(self) -> usize {
        self.get(bitfield::RS) as usize
    }

    /// `rt` register index.
    #[inline]
    pub const fn rt(self) -> usize {
        self.get(bitfield::RT) as usize
    }

    /// `rd` register index.
    #[inline]
    pub const fn rd(self) -> usize {
        self.get(bitfield::RD) as usize
    }

    /// Shift amount.
    #[inline]
    pub const fn sa(self) -> u32 {
        self.get(bitfield::SA)
    }

    /// `fs` register index.
    #[inline]
    pub const fn fs(self) -> usize {
        self.get(bitfield::FS) as usize
    }

    /// `ft` register index.
    #[inline]
    pub const fn ft(self) -> usize {
        self.get(bitfield::FT) as usize
    }

    /// `fd` register index.
    #[inline]
    pub const fn fd(self) -> usize {
        self.get(bitfield::FD) as usize
    }

    /// COP1 operand format (`rs` slot).
    #[inline]
    pub const fn fmt(self) -> u32 {
        self.get(bitfield::FMT)
    }

    /// Immediate, sign-extended from 16 bits.
    #[inline]
    pub const fn sext_imm(self) -> i32 {
        sign_extend(self.get(bitfield::INTIMM), 16)
    }

    /// Immediate, zero-extended from 16 bits.
    #[inline]
    pub const fn zext_imm(self) -> u32 {
        self.get(bitfield::INTIMM)
    }

    /// Memory displacement, sign-extended from 16 bits.
    #[inline]
    pub const fn offset(self) -> i32 {
        sign_extend(self.get(bitfield::OFFSET), 16)
    }

    /// Branch displacement in bytes: `sign_extend(OFFSET << 2, 18)`.
    #[inline]
    pub const fn branch_disp(self) -> i32 {
        sign_extend(self.get(bitfield::OFFSET) << 2, 18)
    }

    /// Jump target within the current 256MB region: `JMPTARG << 2`.
    #[inline]
    pub const fn jump_target(self) -> u32 {
        self.get(bitfield::JMPTARG) << 2
    }

    /// Instruction format.
    pub const fn shape(self) -> Shape {
        match self.opcode() {
            OP_SPECIAL | OP_SPECIAL2 | OP_SPECIAL3 => Shape::R,
            OP_J | OP_JAL => Shape::J,
            OP_COP1 if self.fmt() >= COP1_FMT_S => Shape::F,
            OP_COP1X => Shape::F,
            _ => Shape::I,
        }
    }

    /// `true` for the all-zero word (`sll $zero, $zero, 0`).
    pub const fn is_nop(self) -> bool {
        self.0 == 0
    }

    /// Constant shifts and rotates (`sll`, `srl`, `rotr`, `sra`).
    pub const fn is_shift(self) -> bool {
        self.opcode() == OP_SPECIAL && matches!(self.func(), 0x00 | 0x02 | 0x03)
    }

    /// Variable shifts and rotates (`sllv`, `srlv`, `rotrv`, `srav`).
    pub const fn is_variable_shift(self) -> bool {
        self.opcode() == OP_SPECIAL && matches!(self.func(), 0x04 | 0x06 | 0x07)
    }

    /// `syscall`.
    pub const fn is_syscall(self) -> bool {
        self.opcode() == OP_SPECIAL && self.func() == 0x0c
    }

    /// `break`.
    pub const fn is_break(self) -> bool {
        self.opcode() == OP_SPECIAL && self.func() == 0x0d
    }

    /// Register-form traps (`tge` .. `tne`).
    pub const fn is_trap(self) -> bool {
        self.opcode() == OP_SPECIAL && self.get(bitfield::FUNC_HI) == 0x6
    }

    /// Immediate-form traps (`tgei` .. `tnei`).
    pub const fn is_trap_imm(self) -> bool {
        self.opcode() == OP_REGIMM && self.get(bitfield::REGIMM_HI) == 0x1
    }

    /// `jr`.
    pub const fn is_jr(self) -> bool {
        self.opcode() == OP_SPECIAL && self.func() == 0x08
    }

    /// `jalr`.
    pub const fn is_jalr(self) -> bool {
        self.opcode() == OP_SPECIAL && self.func() == 0x09
    }

    /// `mfhi`, `mflo`.
    pub const fn is_move_from_hilo(self) -> bool {
        self.opcode() == OP_SPECIAL && matches!(self.func(), 0x10 | 0x12)
    }

    /// `mthi`, `mtlo`.
    pub const fn is_move_to_hilo(self) -> bool {
        self.opcode() == OP_SPECIAL && matches!(self.func(), 0x11 | 0x13)
    }

    /// Instructions reading only `rs` and `rt` and writing `hi`/`lo`
    /// (`mult`, `multu`, `div`, `divu`, `madd`, `maddu`, `msub`, `msubu`).
    pub const fn is_hilo_arith(self) -> bool {
        match self.opcode() {
            OP_SPECIAL => self.get(bitfield::FUNC_HI) == 0x3 && self.get(bitfield::FUNC_LO) < 4,
            OP_SPECIAL2 => matches!(self.func(), 0x00 | 0x01 | 0x04 | 0x05),
            _ => false,
        }
    }

    /// Integer `movf`/`movt`.
    pub const fn is_movci(self) -> bool {
        self.opcode() == OP_SPECIAL && self.func() == 0x01
    }

    /// `clz`, `clo`.
    pub const fn is_count_bits(self) -> bool {
        self.opcode() == OP_SPECIAL2 && matches!(self.func(), 0x20 | 0x21)
    }

    /// `ext`, `ins`.
    pub const fn is_bit_field_op(self) -> bool {
        self.opcode() == OP_SPECIAL3 && matches!(self.func(), 0x00 | 0x04)
    }

    /// `wsbh`, `seb`, `seh`.
    pub const fn is_bshfl(self) -> bool {
        self.opcode() == OP_SPECIAL3 && self.func() == 0x20
    }

    /// SPECIAL instructions without operands (`syscall`, `break`, `sync`).
    pub const fn is_operandless(self) -> bool {
        self.opcode() == OP_SPECIAL && matches!(self.func(), 0x0c | 0x0d | 0x0f)
    }

    /// Branches testing `rs` against zero (REGIMM, `blez`, `bgtz` and their likely forms).
    pub const fn is_one_operand_branch(self) -> bool {
        match self.opcode() {
            OP_REGIMM => matches!(self.get(bitfield::REGIMM_HI), 0x0 | 0x2),
            OP_BLEZ | OP_BGTZ | 0x16 | 0x17 => true,
            _ => false,
        }
    }

    /// Branches comparing `rs` with `rt` (`beq`, `bne` and their likely forms).
    pub const fn is_two_operand_branch(self) -> bool {
        matches!(self.opcode(), OP_BEQ | OP_BNE | 0x14 | 0x15)
    }

    /// `bc1f`, `bc1t`, `bc1fl`, `bc1tl`.
    pub const fn is_float_branch(self) -> bool {
        self.opcode() == OP_COP1 && self.fmt() == COP1_BC
    }

    /// `mfc1`, `cfc1`, `mtc1`, `ctc1`.
    pub const fn is_cp1_control(self) -> bool {
        self.opcode() == OP_COP1 && matches!(self.fmt(), 0x00 | 0x02 | 0x04 | 0x06)
    }

    /// `cfc1`, `ctc1` (control register rather than data register).
    pub const fn is_cp1_control_register(self) -> bool {
        self.opcode() == OP_COP1 && matches!(self.fmt(), 0x02 | 0x06)
    }

    /// `c.cond.fmt`.
    pub const fn is_compare(self) -> bool {
        self.opcode() == OP_COP1
            && matches!(self.fmt(), COP1_FMT_S | COP1_FMT_D)
            && self.get(bitfield::FUNC_HI) >= 0x6
    }

    /// Float operations reading only `fs` (`sqrt`, `abs`, `mov`, `neg`, rounding, `cvt`).
    pub const fn is_float_unary(self) -> bool {
        self.opcode() == OP_COP1
            && self.fmt() >= COP1_FMT_S
            && matches!(self.func(), 0x04..=0x0f | 0x15 | 0x16 | 0x20..=0x27)
    }

    /// `movf.fmt`, `movt.fmt`.
    pub const fn is_float_movcf(self) -> bool {
        self.opcode() == OP_COP1 && self.fmt() >= COP1_FMT_S && self.func() == 0x11
    }

    /// `movz.fmt`, `movn.fmt`.
    pub const fn is_float_movgpr(self) -> bool {
        self.opcode() == OP_COP1 && self.fmt() >= COP1_FMT_S && matches!(self.func(), 0x12 | 0x13)
    }

    /// Integer and float loads (including `ll`, `lwc1`, `ldc1`).
    pub const fn is_load(self) -> bool {
        matches!(self.opcode(), 0x20..=0x26 | 0x30 | 0x31 | 0x32 | 0x35 | 0x36)
    }

    /// Integer and float stores (including `sc`, `swc1`, `sdc1`).
    pub const fn is_store(self) -> bool {
        matches!(self.opcode(), 0x28..=0x2b | 0x2e | 0x38 | 0x39 | 0x3a | 0x3d | 0x3e)
    }

    /// Loads and stores using `offset(base)` addressing.
    pub const fn is_memory(self) -> bool {
        self.is_load() || self.is_store() || matches!(self.opcode(), 0x2f | 0x33)
    }

    /// Memory operations whose data register is a float register.
    pub const fn is_float_memory(self) -> bool {
        matches!(self.opcode(), 0x31 | 0x35 | 0x39 | 0x3d)
    }

    /// `andi`, `ori`, `xori` (zero-extended, printed in hex).
    pub const fn is_logical_imm(self) -> bool {
        matches!(self.opcode(), OP_ANDI | OP_ORI | OP_XORI)
    }

    /// `lui`.
    pub const fn is_lui(self) -> bool {
        self.opcode() == OP_LUI
    }
}

impl From<u32> for MachineWord {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for MachineWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for MachineWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
