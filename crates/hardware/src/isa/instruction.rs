//! Static (decoded) instructions.
//!
//! This module defines what the decoder produces for one instruction word. It provides:
//! 1. **Kinds:** A single [`Kind`] enum, one variant per instruction family, whose
//!    payload holds exactly the operands that family needs.
//! 2. **Classification:** [`StaticInst`] computes its flags, functional unit, and
//!    register dependency lists once, at construction.
//! 3. **Semantics:** `execute` and `target_pc` dispatch on the kind into the
//!    execution units under `core::units`.
//!
//! A `StaticInst` is immutable after decode and is shared through `Arc` by every
//! dynamic occurrence that hits the same decode cache entry.

use tracing::error;

use super::abi::{REG_A0, REG_A3, REG_RA, REG_V0, REG_V1};
use super::deps::{MiscReg, RegisterDependency};
use super::flags::{FuKind, InstFlags};
use super::word::MachineWord;
use crate::common::constants::NUM_FPRS;
use crate::common::error::{SimError, SimResult, UnimplementedGroup};
use crate::core::thread::Thread;
use crate::core::units::{alu, bru, fpu, lsu};

/// Register-register integer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntOp {
    /// Signed add, overflow checked.
    Add,
    /// Wrapping add.
    Addu,
    /// Signed subtract, overflow checked.
    Sub,
    /// Wrapping subtract.
    Subu,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOR.
    Nor,
    /// Set on signed less-than.
    Slt,
    /// Set on unsigned less-than.
    Sltu,
    /// Shift left by `rs`.
    Sllv,
    /// Logical shift right by `rs`.
    Srlv,
    /// Arithmetic shift right by `rs`.
    Srav,
    /// Rotate right by `rs`.
    Rotrv,
    /// Move `rs` to `rd` when `rt == 0`.
    Movz,
    /// Move `rs` to `rd` when `rt != 0`.
    Movn,
    /// Low 32 bits of the signed product.
    Mul,
}

/// Constant-amount shifts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    /// Shift left logical.
    Sll,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Rotate right.
    Rotr,
}

/// Register-immediate integer operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImmOp {
    /// Signed add of the sign-extended immediate, overflow checked.
    Addi,
    /// Wrapping add of the sign-extended immediate.
    Addiu,
    /// Signed compare against the sign-extended immediate.
    Slti,
    /// Unsigned compare against the zero-extended immediate.
    Sltiu,
    /// AND with the zero-extended immediate.
    Andi,
    /// OR with the zero-extended immediate.
    Ori,
    /// XOR with the zero-extended immediate.
    Xori,
    /// Load the immediate into the upper half.
    Lui,
}

impl ImmOp {
    /// Returns `true` if the operation consumes the sign-extended immediate.
    pub const fn sign_extends(self) -> bool {
        matches!(self, Self::Addi | Self::Addiu | Self::Slti)
    }
}

/// Operations writing the `hi`/`lo` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HiLoOp {
    /// Signed 32x32 multiply.
    Mult,
    /// Unsigned 32x32 multiply.
    Multu,
    /// Signed divide: `lo` = quotient, `hi` = remainder.
    Div,
    /// Unsigned divide.
    Divu,
    /// Signed multiply-accumulate.
    Madd,
    /// Unsigned multiply-accumulate.
    Maddu,
    /// Signed multiply-subtract.
    Msub,
    /// Unsigned multiply-subtract.
    Msubu,
}

/// Moves between a GPR and `hi`/`lo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HiLoMoveOp {
    /// `rd = hi`.
    Mfhi,
    /// `rd = lo`.
    Mflo,
    /// `hi = rs`.
    Mthi,
    /// `lo = rs`.
    Mtlo,
}

/// Byte and halfword shuffles from SPECIAL3 BSHFL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteOp {
    /// Swap bytes within each halfword.
    Wsbh,
    /// Sign-extend the low byte.
    Seb,
    /// Sign-extend the low halfword.
    Seh,
}

/// Integer branch conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchCond {
    /// Always taken (`b`, `bal`).
    Always,
    /// `rs == rt`.
    Eq,
    /// `rs != rt`.
    Ne,
    /// `rs <= 0` (signed).
    Lez,
    /// `rs > 0` (signed).
    Gtz,
    /// `rs < 0` (signed).
    Ltz,
    /// `rs >= 0` (signed).
    Gez,
}

/// Trap conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrapCond {
    /// Signed greater-or-equal.
    Ge,
    /// Unsigned greater-or-equal.
    Geu,
    /// Signed less-than.
    Lt,
    /// Unsigned less-than.
    Ltu,
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
}

/// Second operand of a trap comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrapOperand {
    /// Register `rt`.
    Reg(usize),
    /// Sign-extended immediate.
    Imm(u32),
}

/// Integer memory access widths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Width {
    /// 8 bits.
    Byte,
    /// 16 bits.
    Half,
    /// 32 bits.
    Word,
}

impl Width {
    /// Access size in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
        }
    }
}

/// Which end of a word an unaligned access touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// `lwl`/`swl`: the most-significant bytes.
    Left,
    /// `lwr`/`swr`: the least-significant bytes.
    Right,
}

/// Floating-point operand formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpFormat {
    /// IEEE-754 single.
    Single,
    /// IEEE-754 double (register pair).
    Double,
    /// 32-bit signed integer.
    Word,
    /// 64-bit signed integer (register pair).
    Long,
}

impl FpFormat {
    /// Mnemonic suffix.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Single => "s",
            Self::Double => "d",
            Self::Word => "w",
            Self::Long => "l",
        }
    }

    /// Returns `true` for formats occupying a register pair.
    pub const fn is_wide(self) -> bool {
        matches!(self, Self::Double | Self::Long)
    }
}

/// Binary floating-point arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpArithOp {
    /// Add.
    Add,
    /// Subtract.
    Sub,
    /// Multiply.
    Mul,
    /// Divide.
    Div,
}

/// Unary floating-point operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpUnaryOp {
    /// Square root.
    Sqrt,
    /// Absolute value.
    Abs,
    /// Copy.
    Mov,
    /// Negate.
    Neg,
}

/// Rounding applied when converting to an integer format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Mode selected by `FCSR.RM`.
    Current,
    /// Nearest, ties to even.
    Round,
    /// Toward zero.
    Trunc,
    /// Toward positive infinity.
    Ceil,
    /// Toward negative infinity.
    Floor,
}

/// Coprocessor-1 register moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cp1MoveOp {
    /// `rt = fpr[fs]`.
    Mfc1,
    /// `rt = fcsr` when `fs == 31`.
    Cfc1,
    /// `fpr[fs] = rt`.
    Mtc1,
    /// `fcsr = rt` unless `fs == 0`.
    Ctc1,
}

/// Decoded instruction semantics, one variant per family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// No architectural effect (`nop`, `ssnop`, `pref`).
    Nop,
    /// Ordering no-op that drains the pipeline (`sync`, `ehb`).
    Barrier,
    /// `rd = rs op rt`.
    IntOp {
        /// Operation.
        op: IntOp,
        /// Destination.
        rd: usize,
        /// First source.
        rs: usize,
        /// Second source.
        rt: usize,
    },
    /// `rd = rt shift sa`.
    Shift {
        /// Operation.
        op: ShiftOp,
        /// Destination.
        rd: usize,
        /// Source.
        rt: usize,
        /// Shift amount.
        sa: u32,
    },
    /// `rt = rs op imm`.
    IntImm {
        /// Operation.
        op: ImmOp,
        /// Destination.
        rt: usize,
        /// Source.
        rs: usize,
        /// Immediate, already sign- or zero-extended as the operation requires.
        imm: u32,
    },
    /// Multiply/divide into `hi`/`lo`.
    HiLo {
        /// Operation.
        op: HiLoOp,
        /// First source.
        rs: usize,
        /// Second source.
        rt: usize,
    },
    /// Moves to or from `hi`/`lo`.
    HiLoMove {
        /// Operation.
        op: HiLoMoveOp,
        /// `rd` for moves from, `rs` for moves to.
        reg: usize,
    },
    /// `clz`/`clo`.
    CountBits {
        /// Count leading ones instead of zeros.
        ones: bool,
        /// Destination.
        rd: usize,
        /// Source.
        rs: usize,
    },
    /// `wsbh`, `seb`, `seh`.
    ByteOp {
        /// Operation.
        op: ByteOp,
        /// Destination.
        rd: usize,
        /// Source.
        rt: usize,
    },
    /// `ext`: `rt = (rs >> pos) & mask(size)`.
    Ext {
        /// Destination.
        rt: usize,
        /// Source.
        rs: usize,
        /// Lowest extracted bit.
        pos: u32,
        /// Field width, 1-32.
        size: u32,
    },
    /// `ins`: replace bits `pos..pos+size` of `rt` with the low bits of `rs`.
    Ins {
        /// Destination (also read).
        rt: usize,
        /// Source.
        rs: usize,
        /// Lowest replaced bit.
        pos: u32,
        /// Field width, 1-32.
        size: u32,
    },
    /// Integer `movf`/`movt`: `rd = rs` when condition code `cc` equals `on_true`.
    MovCc {
        /// Destination.
        rd: usize,
        /// Source.
        rs: usize,
        /// Condition code 0-7.
        cc: u32,
        /// Required condition value.
        on_true: bool,
    },
    /// PC-relative integer branch.
    Branch {
        /// Condition.
        cond: BranchCond,
        /// First compared register.
        rs: usize,
        /// Second compared register (`Eq`/`Ne` only).
        rt: usize,
        /// Byte displacement from `npc`.
        disp: i32,
        /// Writes `$ra = nnpc`.
        link: bool,
    },
    /// `bc1f`, `bc1t`, `bc1fl`, `bc1tl`.
    FpBranch {
        /// Condition code 0-7.
        cc: u32,
        /// Branch when the code is set (`bc1t*`).
        on_true: bool,
        /// Skip the delay slot when not taken.
        likely: bool,
        /// Byte displacement from `npc`.
        disp: i32,
    },
    /// `j`, `jal`.
    Jump {
        /// `JMPTARG << 2`; the top nibble comes from `npc`.
        target: u32,
        /// Writes `$ra = nnpc`.
        link: bool,
    },
    /// `jr`, `jalr`.
    JumpReg {
        /// Register holding the target.
        rs: usize,
        /// Link register for `jalr`.
        link: Option<usize>,
    },
    /// Integer load.
    Load {
        /// Access width.
        width: Width,
        /// Sign-extend the loaded value.
        signed: bool,
        /// Destination.
        rt: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// Integer store.
    Store {
        /// Access width.
        width: Width,
        /// Source.
        rt: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `lwl`, `lwr`.
    LoadPartial {
        /// Which bytes are merged.
        side: Side,
        /// Destination (also read).
        rt: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `swl`, `swr`.
    StorePartial {
        /// Which bytes are merged.
        side: Side,
        /// Source.
        rt: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `ll`.
    LoadLinked {
        /// Destination.
        rt: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `sc`; always succeeds.
    StoreConditional {
        /// Source, then success flag.
        rt: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `lwc1`, `ldc1`.
    LoadFp {
        /// 64-bit access into a register pair.
        double: bool,
        /// Destination float register.
        ft: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `swc1`, `sdc1`.
    StoreFp {
        /// 64-bit access from a register pair.
        double: bool,
        /// Source float register.
        ft: usize,
        /// Base register.
        base: usize,
        /// Displacement.
        offset: i32,
    },
    /// `add`, `sub`, `mul`, `div` in S or D format.
    FpArith {
        /// Operation.
        op: FpArithOp,
        /// Operand format.
        fmt: FpFormat,
        /// Destination.
        fd: usize,
        /// First source.
        fs: usize,
        /// Second source.
        ft: usize,
    },
    /// `sqrt`, `abs`, `mov`, `neg` in S or D format.
    FpUnary {
        /// Operation.
        op: FpUnaryOp,
        /// Operand format.
        fmt: FpFormat,
        /// Destination.
        fd: usize,
        /// Source.
        fs: usize,
    },
    /// `cvt.*`, `round.w`, `trunc.w`, `ceil.w`, `floor.w`.
    FpConvert {
        /// Source format.
        from: FpFormat,
        /// Destination format.
        to: FpFormat,
        /// Rounding for integer destinations.
        rounding: Rounding,
        /// Destination.
        fd: usize,
        /// Source.
        fs: usize,
    },
    /// `c.cond.fmt`.
    FpCompare {
        /// Operand format.
        fmt: FpFormat,
        /// 4-bit condition: bit 0 unordered, bit 1 equal, bit 2 less.
        cond: u32,
        /// Condition code written, 0-7.
        cc: u32,
        /// First source.
        fs: usize,
        /// Second source.
        ft: usize,
    },
    /// `movf.fmt`, `movt.fmt`.
    FpMoveCc {
        /// Operand format.
        fmt: FpFormat,
        /// Destination.
        fd: usize,
        /// Source.
        fs: usize,
        /// Condition code 0-7.
        cc: u32,
        /// Required condition value.
        on_true: bool,
    },
    /// `movz.fmt`, `movn.fmt`.
    FpMoveGpr {
        /// Operand format.
        fmt: FpFormat,
        /// Destination.
        fd: usize,
        /// Source.
        fs: usize,
        /// Integer register tested.
        rt: usize,
        /// Move when `rt == 0` (`movz`) rather than `rt != 0`.
        on_zero: bool,
    },
    /// `mfc1`, `cfc1`, `mtc1`, `ctc1`.
    Cp1Move {
        /// Direction and register class.
        op: Cp1MoveOp,
        /// Integer register.
        rt: usize,
        /// Float or control register number.
        fs: usize,
    },
    /// Conditional trap.
    Trap {
        /// Condition.
        cond: TrapCond,
        /// First operand.
        rs: usize,
        /// Second operand.
        rhs: TrapOperand,
    },
    /// `break`.
    Break,
    /// `syscall`; the call number is read from `$v0`.
    Syscall,
    /// Not a MIPS32 instruction.
    Unknown,
    /// Recognised instruction this core does not model.
    Unimplemented(UnimplementedGroup),
}

/// A decoded instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticInst {
    mnemonic: &'static str,
    word: MachineWord,
    kind: Kind,
    flags: InstFlags,
    fu: FuKind,
    ideps: Vec<RegisterDependency>,
    odeps: Vec<RegisterDependency>,
}

/// Accumulates the classification of one instruction.
#[derive(Default)]
struct Classifier {
    flags: InstFlags,
    fu: FuKind,
    ideps: Vec<RegisterDependency>,
    odeps: Vec<RegisterDependency>,
}

impl Classifier {
    fn unit(&mut self, flags: InstFlags, fu: FuKind) -> &mut Self {
        self.flags |= flags;
        self.fu = fu;
        self
    }

    fn read_int(&mut self, idx: usize) -> &mut Self {
        self.ideps.push(RegisterDependency::int(idx));
        self
    }

    fn write_int(&mut self, idx: usize) -> &mut Self {
        self.odeps.push(RegisterDependency::int(idx));
        self
    }

    fn read_misc(&mut self, reg: MiscReg) -> &mut Self {
        self.ideps.push(RegisterDependency::misc(reg));
        self
    }

    fn write_misc(&mut self, reg: MiscReg) -> &mut Self {
        self.odeps.push(RegisterDependency::misc(reg));
        self
    }

    fn read_fp(&mut self, idx: usize, wide: bool) -> &mut Self {
        Self::push_fp(&mut self.ideps, idx, wide);
        self
    }

    fn write_fp(&mut self, idx: usize, wide: bool) -> &mut Self {
        Self::push_fp(&mut self.odeps, idx, wide);
        self
    }

    /// Wide values occupy the even/odd pair containing `idx`.
    fn push_fp(list: &mut Vec<RegisterDependency>, idx: usize, wide: bool) {
        if wide {
            let even = idx & !1;
            list.push(RegisterDependency::float(even));
            if even + 1 < NUM_FPRS {
                list.push(RegisterDependency::float(even + 1));
            }
        } else {
            list.push(RegisterDependency::float(idx));
        }
    }

    fn memory(&mut self, load: bool, floating: bool, base: usize) -> &mut Self {
        let (dir, fu) = if load {
            (InstFlags::LOAD, FuKind::ReadPort)
        } else {
            (InstFlags::STORE, FuKind::WritePort)
        };
        let class = if floating {
            InstFlags::FLOATING
        } else {
            InstFlags::INTEGER
        };
        self.unit(class | InstFlags::MEM_REF | InstFlags::DISPLACED | dir, fu)
            .read_int(base)
            .write_misc(MiscReg::Ea)
    }

    fn classify(kind: &Kind) -> Self {
        let mut c = Self::default();
        let int = InstFlags::INTEGER;
        let fp = InstFlags::FLOATING;
        match *kind {
            Kind::Nop => {
                let _ = c.unit(InstFlags::NOP, FuKind::None);
            }
            Kind::Barrier => {
                let _ = c.unit(InstFlags::NOP | InstFlags::SERIALIZING, FuKind::None);
            }
            Kind::IntOp { op, rd, rs, rt } => {
                let fu = if op == IntOp::Mul {
                    FuKind::IntMult
                } else {
                    FuKind::IntAlu
                };
                let _ = c.unit(int, fu).read_int(rs).read_int(rt).write_int(rd);
                if matches!(op, IntOp::Movz | IntOp::Movn) {
                    let _ = c.read_int(rd);
                }
            }
            Kind::Shift { rd, rt, .. } | Kind::ByteOp { rd, rt, .. } => {
                let _ = c.unit(int, FuKind::IntAlu).read_int(rt).write_int(rd);
            }
            Kind::IntImm { op, rt, rs, .. } => {
                let _ = c.unit(int, FuKind::IntAlu);
                if op != ImmOp::Lui {
                    let _ = c.read_int(rs);
                }
                let _ = c.write_int(rt);
            }
            Kind::HiLo { op, rs, rt } => {
                let fu = if matches!(op, HiLoOp::Div | HiLoOp::Divu) {
                    FuKind::IntDiv
                } else {
                    FuKind::IntMult
                };
                let _ = c.unit(int, fu).read_int(rs).read_int(rt);
                if matches!(op, HiLoOp::Madd | HiLoOp::Maddu | HiLoOp::Msub | HiLoOp::Msubu) {
                    let _ = c.read_misc(MiscReg::Lo).read_misc(MiscReg::Hi);
                }
                let _ = c.write_misc(MiscReg::Lo).write_misc(MiscReg::Hi);
            }
            Kind::HiLoMove { op, reg } => {
                let _ = c.unit(int, FuKind::IntAlu);
                let _ = match op {
                    HiLoMoveOp::Mfhi => c.read_misc(MiscReg::Hi).write_int(reg),
                    HiLoMoveOp::Mflo => c.read_misc(MiscReg::Lo).write_int(reg),
                    HiLoMoveOp::Mthi => c.read_int(reg).write_misc(MiscReg::Hi),
                    HiLoMoveOp::Mtlo => c.read_int(reg).write_misc(MiscReg::Lo),
                };
            }
            Kind::CountBits { rd, rs, .. } => {
                let _ = c.unit(int, FuKind::IntAlu).read_int(rs).write_int(rd);
            }
            Kind::Ext { rt, rs, .. } => {
                let _ = c.unit(int, FuKind::IntAlu).read_int(rs).write_int(rt);
            }
            Kind::Ins { rt, rs, .. } => {
                let _ = c
                    .unit(int, FuKind::IntAlu)
                    .read_int(rs)
                    .read_int(rt)
                    .write_int(rt);
            }
            Kind::MovCc { rd, rs, .. } => {
                let _ = c
                    .unit(int, FuKind::IntAlu)
                    .read_int(rs)
                    .read_int(rd)
                    .read_misc(MiscReg::Fcsr)
                    .write_int(rd);
            }
            Kind::Branch {
                cond, rs, rt, link, ..
            } => {
                let taken = if cond == BranchCond::Always {
                    InstFlags::UNCONDITIONAL
                } else {
                    InstFlags::CONDITIONAL
                };
                let _ = c.unit(
                    int | InstFlags::CONTROL | InstFlags::DIRECT | taken,
                    FuKind::IntAlu,
                );
                match cond {
                    BranchCond::Always => {}
                    BranchCond::Eq | BranchCond::Ne => {
                        let _ = c.read_int(rs).read_int(rt);
                    }
                    _ => {
                        let _ = c.read_int(rs);
                    }
                }
                if link {
                    let _ = c.unit(InstFlags::CALL, FuKind::IntAlu).write_int(REG_RA);
                }
            }
            Kind::FpBranch { likely, .. } => {
                let mut flags =
                    fp | InstFlags::CONTROL | InstFlags::DIRECT | InstFlags::CONDITIONAL;
                if likely {
                    flags |= InstFlags::LIKELY;
                }
                let _ = c.unit(flags, FuKind::IntAlu).read_misc(MiscReg::Fcsr);
            }
            Kind::Jump { link, .. } => {
                let _ = c.unit(
                    int | InstFlags::CONTROL | InstFlags::DIRECT | InstFlags::UNCONDITIONAL,
                    FuKind::IntAlu,
                );
                if link {
                    let _ = c.unit(InstFlags::CALL, FuKind::IntAlu).write_int(REG_RA);
                }
            }
            Kind::JumpReg { rs, link } => {
                let _ = c
                    .unit(
                        int | InstFlags::CONTROL | InstFlags::INDIRECT | InstFlags::UNCONDITIONAL,
                        FuKind::IntAlu,
                    )
                    .read_int(rs);
                match link {
                    Some(rd) => {
                        let _ = c.unit(InstFlags::CALL, FuKind::IntAlu).write_int(rd);
                    }
                    None if rs == REG_RA => {
                        let _ = c.unit(InstFlags::RETURN, FuKind::IntAlu);
                    }
                    None => {}
                }
            }
            Kind::Load { rt, base, .. } | Kind::LoadLinked { rt, base, .. } => {
                let _ = c.memory(true, false, base).write_int(rt);
            }
            Kind::LoadPartial { rt, base, .. } => {
                let _ = c.memory(true, false, base).read_int(rt).write_int(rt);
            }
            Kind::Store { rt, base, .. } | Kind::StorePartial { rt, base, .. } => {
                let _ = c.memory(false, false, base).read_int(rt);
            }
            Kind::StoreConditional { rt, base, .. } => {
                let _ = c.memory(false, false, base).read_int(rt).write_int(rt);
            }
            Kind::LoadFp {
                double, ft, base, ..
            } => {
                let _ = c.memory(true, true, base).write_fp(ft, double);
            }
            Kind::StoreFp {
                double, ft, base, ..
            } => {
                let _ = c.memory(false, true, base).read_fp(ft, double);
            }
            Kind::FpArith {
                op, fmt, fd, fs, ft,
            } => {
                let fu = match op {
                    FpArithOp::Add | FpArithOp::Sub => FuKind::FloatAdd,
                    FpArithOp::Mul => FuKind::FloatMult,
                    FpArithOp::Div => FuKind::FloatDiv,
                };
                let wide = fmt.is_wide();
                let _ = c
                    .unit(fp, fu)
                    .read_fp(fs, wide)
                    .read_fp(ft, wide)
                    .write_fp(fd, wide);
            }
            Kind::FpUnary { op, fmt, fd, fs } => {
                let fu = if op == FpUnaryOp::Sqrt {
                    FuKind::FloatSqrt
                } else {
                    FuKind::FloatAdd
                };
                let wide = fmt.is_wide();
                let _ = c.unit(fp, fu).read_fp(fs, wide).write_fp(fd, wide);
            }
            Kind::FpConvert {
                from,
                to,
                rounding,
                fd,
                fs,
            } => {
                let _ = c
                    .unit(fp, FuKind::FloatConvert)
                    .read_fp(fs, from.is_wide())
                    .write_fp(fd, to.is_wide());
                if rounding == Rounding::Current {
                    let _ = c.read_misc(MiscReg::Fcsr);
                }
            }
            Kind::FpCompare { fmt, fs, ft, .. } => {
                let wide = fmt.is_wide();
                let _ = c
                    .unit(fp, FuKind::FloatCompare)
                    .read_fp(fs, wide)
                    .read_fp(ft, wide)
                    .write_misc(MiscReg::Fcsr);
            }
            Kind::FpMoveCc { fmt, fd, fs, .. } => {
                let wide = fmt.is_wide();
                let _ = c
                    .unit(fp, FuKind::FloatAdd)
                    .read_fp(fs, wide)
                    .read_fp(fd, wide)
                    .read_misc(MiscReg::Fcsr)
                    .write_fp(fd, wide);
            }
            Kind::FpMoveGpr { fmt, fd, fs, rt, .. } => {
                let wide = fmt.is_wide();
                let _ = c
                    .unit(fp, FuKind::FloatAdd)
                    .read_fp(fs, wide)
                    .read_fp(fd, wide)
                    .read_int(rt)
                    .write_fp(fd, wide);
            }
            Kind::Cp1Move { op, rt, fs } => {
                let _ = c.unit(fp, FuKind::IntAlu);
                let _ = match op {
                    Cp1MoveOp::Mfc1 => c.read_fp(fs, false).write_int(rt),
                    Cp1MoveOp::Cfc1 => c.read_misc(MiscReg::Fcsr).write_int(rt),
                    Cp1MoveOp::Mtc1 => c.read_int(rt).write_fp(fs, false),
                    Cp1MoveOp::Ctc1 => c.read_int(rt).write_misc(MiscReg::Fcsr),
                };
            }
            Kind::Trap { rs, rhs, .. } => {
                let _ = c.unit(int | InstFlags::TRAP, FuKind::IntAlu).read_int(rs);
                if let TrapOperand::Reg(rt) = rhs {
                    let _ = c.read_int(rt);
                }
            }
            Kind::Break => {
                let _ = c.unit(InstFlags::TRAP | InstFlags::SERIALIZING, FuKind::None);
            }
            Kind::Syscall => {
                let _ = c
                    .unit(InstFlags::SYSCALL | InstFlags::SERIALIZING, FuKind::None)
                    .read_int(REG_V0);
                for arg in REG_A0..=REG_A3 {
                    let _ = c.read_int(arg);
                }
                let _ = c.write_int(REG_V0).write_int(REG_V1).write_int(REG_A3);
            }
            Kind::Unknown => {
                let _ = c.unit(InstFlags::UNKNOWN, FuKind::None);
            }
            Kind::Unimplemented(_) => {
                let _ = c.unit(InstFlags::UNIMPLEMENTED, FuKind::None);
            }
        }
        c
    }
}

impl StaticInst {
    /// Builds a static instruction and derives its classification from `kind`.
    ///
    /// # Arguments
    ///
    /// * `mnemonic` - Assembler mnemonic (or diagnostic name for sentinels).
    /// * `word` - The encoding this instruction was decoded from.
    /// * `kind` - Decoded semantics and operands.
    pub fn new(mnemonic: &'static str, word: MachineWord, kind: Kind) -> Self {
        let c = Classifier::classify(&kind);
        Self {
            mnemonic,
            word,
            kind,
            flags: c.flags,
            fu: c.fu,
            ideps: c.ideps,
            odeps: c.odeps,
        }
    }

    /// Assembler mnemonic.
    pub const fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    /// Encoding.
    pub const fn word(&self) -> MachineWord {
        self.word
    }

    /// Decoded semantics.
    pub const fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Classification flags.
    pub const fn flags(&self) -> InstFlags {
        self.flags
    }

    /// Functional unit class.
    pub const fn fu(&self) -> FuKind {
        self.fu
    }

    /// Registers read.
    pub fn ideps(&self) -> &[RegisterDependency] {
        &self.ideps
    }

    /// Registers written.
    pub fn odeps(&self) -> &[RegisterDependency] {
        &self.odeps
    }

    /// Architectural no-op.
    pub const fn is_nop(&self) -> bool {
        self.flags.contains(InstFlags::NOP)
    }

    /// Reads memory.
    pub const fn is_load(&self) -> bool {
        self.flags.contains(InstFlags::LOAD)
    }

    /// Writes memory.
    pub const fn is_store(&self) -> bool {
        self.flags.contains(InstFlags::STORE)
    }

    /// Accesses memory.
    pub const fn is_mem_ref(&self) -> bool {
        self.flags.contains(InstFlags::MEM_REF)
    }

    /// Branch or jump.
    pub const fn is_control(&self) -> bool {
        self.flags.contains(InstFlags::CONTROL)
    }

    /// Writes a return address.
    pub const fn is_call(&self) -> bool {
        self.flags.contains(InstFlags::CALL)
    }

    /// `jr $ra`.
    pub const fn is_return(&self) -> bool {
        self.flags.contains(InstFlags::RETURN)
    }

    /// Conditional control transfer.
    pub const fn is_conditional(&self) -> bool {
        self.flags.contains(InstFlags::CONDITIONAL)
    }

    /// Unconditional control transfer.
    pub const fn is_unconditional(&self) -> bool {
        self.flags.contains(InstFlags::UNCONDITIONAL)
    }

    /// Target encoded in the instruction.
    pub const fn is_direct(&self) -> bool {
        self.flags.contains(InstFlags::DIRECT)
    }

    /// Target read from a register.
    pub const fn is_indirect(&self) -> bool {
        self.flags.contains(InstFlags::INDIRECT)
    }

    /// `syscall`.
    pub const fn is_syscall(&self) -> bool {
        self.flags.contains(InstFlags::SYSCALL)
    }

    /// Floating-point operation.
    pub const fn is_floating(&self) -> bool {
        self.flags.contains(InstFlags::FLOATING)
    }

    /// Integer operation.
    pub const fn is_integer(&self) -> bool {
        self.flags.contains(InstFlags::INTEGER)
    }

    /// May trap.
    pub const fn is_trap(&self) -> bool {
        self.flags.contains(InstFlags::TRAP)
    }

    /// Recognised but not modelled.
    pub const fn is_unimplemented(&self) -> bool {
        self.flags.contains(InstFlags::UNIMPLEMENTED)
    }

    /// Not a MIPS32 instruction.
    pub const fn is_unknown(&self) -> bool {
        self.flags.contains(InstFlags::UNKNOWN)
    }

    /// Executes the instruction against `thread`.
    ///
    /// Register 0 is not cleared here; see `DynamicInstruction::execute`.
    ///
    /// # Errors
    ///
    /// Any fatal condition: a faulting load or store, an unknown or unimplemented
    /// instruction, a taken trap, a trapped overflow, or a failed syscall.
    pub fn execute(&self, thread: &mut dyn Thread) -> SimResult<()> {
        let m = self.mnemonic;
        let pc = thread.regs().pc();
        match self.kind {
            Kind::Nop | Kind::Barrier => Ok(()),
            Kind::IntOp { op, rd, rs, rt } => alu::int_op(thread, m, op, rd, rs, rt),
            Kind::Shift { op, rd, rt, sa } => {
                alu::shift(thread.regs_mut(), op, rd, rt, sa);
                Ok(())
            }
            Kind::IntImm { op, rt, rs, imm } => alu::int_imm(thread, m, op, rt, rs, imm),
            Kind::HiLo { op, rs, rt } => {
                alu::hilo(thread.regs_mut(), op, rs, rt);
                Ok(())
            }
            Kind::HiLoMove { op, reg } => {
                alu::hilo_move(thread.regs_mut(), op, reg);
                Ok(())
            }
            Kind::CountBits { ones, rd, rs } => {
                alu::count_bits(thread.regs_mut(), ones, rd, rs);
                Ok(())
            }
            Kind::ByteOp { op, rd, rt } => {
                alu::byte_op(thread.regs_mut(), op, rd, rt);
                Ok(())
            }
            Kind::Ext { rt, rs, pos, size } => {
                alu::ext(thread.regs_mut(), rt, rs, pos, size);
                Ok(())
            }
            Kind::Ins { rt, rs, pos, size } => {
                alu::ins(thread.regs_mut(), rt, rs, pos, size);
                Ok(())
            }
            Kind::MovCc {
                rd,
                rs,
                cc,
                on_true,
            } => {
                alu::mov_cc(thread.regs_mut(), rd, rs, cc, on_true);
                Ok(())
            }
            Kind::Trap { cond, rs, rhs } => alu::trap(thread.regs(), m, cond, rs, rhs),
            Kind::Branch {
                cond,
                rs,
                rt,
                disp,
                link,
            } => {
                bru::branch(thread.regs_mut(), cond, rs, rt, disp, link);
                Ok(())
            }
            Kind::FpBranch {
                cc,
                on_true,
                likely,
                disp,
            } => {
                bru::fp_branch(thread.regs_mut(), cc, on_true, likely, disp);
                Ok(())
            }
            Kind::Jump { target, link } => {
                bru::jump(thread.regs_mut(), target, link);
                Ok(())
            }
            Kind::JumpReg { rs, link } => {
                bru::jump_reg(thread.regs_mut(), rs, link);
                Ok(())
            }
            Kind::Load {
                width,
                signed,
                rt,
                base,
                offset,
            } => lsu::load(thread, width, signed, rt, base, offset),
            Kind::Store {
                width,
                rt,
                base,
                offset,
            } => lsu::store(thread, width, rt, base, offset),
            Kind::LoadPartial {
                side,
                rt,
                base,
                offset,
            } => lsu::load_partial(thread, side, rt, base, offset),
            Kind::StorePartial {
                side,
                rt,
                base,
                offset,
            } => lsu::store_partial(thread, side, rt, base, offset),
            Kind::LoadLinked { rt, base, offset } => {
                lsu::load(thread, Width::Word, true, rt, base, offset)
            }
            Kind::StoreConditional { rt, base, offset } => {
                lsu::store_conditional(thread, rt, base, offset)
            }
            Kind::LoadFp {
                double,
                ft,
                base,
                offset,
            } => lsu::load_fp(thread, double, ft, base, offset),
            Kind::StoreFp {
                double,
                ft,
                base,
                offset,
            } => lsu::store_fp(thread, double, ft, base, offset),
            Kind::FpArith {
                op,
                fmt,
                fd,
                fs,
                ft,
            } => {
                fpu::arith(thread.regs_mut(), op, fmt, fd, fs, ft);
                Ok(())
            }
            Kind::FpUnary { op, fmt, fd, fs } => {
                fpu::unary(thread.regs_mut(), op, fmt, fd, fs);
                Ok(())
            }
            Kind::FpConvert {
                from,
                to,
                rounding,
                fd,
                fs,
            } => {
                fpu::convert(thread.regs_mut(), from, to, rounding, fd, fs);
                Ok(())
            }
            Kind::FpCompare {
                fmt,
                cond,
                cc,
                fs,
                ft,
            } => {
                fpu::compare(thread.regs_mut(), fmt, cond, cc, fs, ft);
                Ok(())
            }
            Kind::FpMoveCc {
                fmt,
                fd,
                fs,
                cc,
                on_true,
            } => {
                fpu::move_cc(thread.regs_mut(), fmt, fd, fs, cc, on_true);
                Ok(())
            }
            Kind::FpMoveGpr {
                fmt,
                fd,
                fs,
                rt,
                on_zero,
            } => {
                fpu::move_gpr(thread.regs_mut(), fmt, fd, fs, rt, on_zero);
                Ok(())
            }
            Kind::Cp1Move { op, rt, fs } => {
                fpu::cp1_move(thread.regs_mut(), op, rt, fs);
                Ok(())
            }
            Kind::Syscall => {
                let number = thread.regs().gpr(REG_V0);
                thread.syscall(number)
            }
            Kind::Break => Err(self.fatal(thread, SimError::Trap { pc, mnemonic: m })),
            Kind::Unknown => Err(self.fatal(
                thread,
                SimError::Unknown {
                    pc,
                    word: self.word.raw(),
                },
            )),
            Kind::Unimplemented(group) => Err(self.fatal(
                thread,
                SimError::Unimplemented {
                    pc,
                    word: self.word.raw(),
                    mnemonic: m,
                    group,
                },
            )),
        }
    }

    /// Logs a fatal instruction and hands the error back.
    fn fatal(&self, thread: &dyn Thread, err: SimError) -> SimError {
        let pc = thread.regs().pc();
        error!(
            thread = thread.name(),
            "fatal instruction `{}` ({:#010x}) at pc {:#010x} (paddr {:#010x}): {err}",
            self.mnemonic,
            self.word.raw(),
            pc,
            thread.translate(pc)
        );
        err
    }

    /// Control-transfer target for the current register state.
    ///
    /// Branches report their target whether or not the condition holds.
    /// Returns `None` for non-control instructions.
    pub fn target_pc(&self, thread: &dyn Thread) -> Option<u32> {
        let regs = thread.regs();
        match self.kind {
            Kind::Branch { disp, .. } | Kind::FpBranch { disp, .. } => {
                Some(bru::branch_target(regs, disp))
            }
            Kind::Jump { target, .. } => Some(bru::jump_target(regs, target)),
            Kind::JumpReg { rs, .. } => Some(regs.gpr(rs)),
            _ => None,
        }
    }
}
