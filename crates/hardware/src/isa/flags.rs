//! Static instruction flags and functional-unit classes.
//!
//! This module defines the classification data attached to every decoded
//! instruction. It provides:
//! 1. **Flags:** An [`InstFlags`] bitset queried by the pipeline (load, store,
//!    control, call, return, conditional, ...).
//! 2. **Functional Units:** The [`FuKind`] tag the scheduler uses to pick an
//!    execution unit. It never influences arithmetic.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bitset of static instruction properties.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InstFlags(u32);

impl InstFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Integer operation.
    pub const INTEGER: Self = Self(1 << 0);
    /// Floating-point operation.
    pub const FLOATING: Self = Self(1 << 1);
    /// Accesses memory.
    pub const MEM_REF: Self = Self(1 << 2);
    /// Reads memory.
    pub const LOAD: Self = Self(1 << 3);
    /// Writes memory.
    pub const STORE: Self = Self(1 << 4);
    /// Uses `offset(base)` addressing.
    pub const DISPLACED: Self = Self(1 << 5);
    /// Changes control flow.
    pub const CONTROL: Self = Self(1 << 6);
    /// Target known at decode time.
    pub const DIRECT: Self = Self(1 << 7);
    /// Target read from a register.
    pub const INDIRECT: Self = Self(1 << 8);
    /// Taken only when a condition holds.
    pub const CONDITIONAL: Self = Self(1 << 9);
    /// Always taken.
    pub const UNCONDITIONAL: Self = Self(1 << 10);
    /// Writes a return address.
    pub const CALL: Self = Self(1 << 11);
    /// `jr $ra`.
    pub const RETURN: Self = Self(1 << 12);
    /// May raise a trap.
    pub const TRAP: Self = Self(1 << 13);
    /// `syscall`.
    pub const SYSCALL: Self = Self(1 << 14);
    /// Architectural no-op.
    pub const NOP: Self = Self(1 << 15);
    /// Must drain the pipeline before issuing.
    pub const SERIALIZING: Self = Self(1 << 16);
    /// Recognised but not modelled.
    pub const UNIMPLEMENTED: Self = Self(1 << 17);
    /// Not a MIPS32 instruction.
    pub const UNKNOWN: Self = Self(1 << 18);
    /// Nullifies the delay slot when not taken.
    pub const LIKELY: Self = Self(1 << 19);

    const NAMES: [(Self, &'static str); 20] = [
        (Self::INTEGER, "Integer"),
        (Self::FLOATING, "Floating"),
        (Self::MEM_REF, "MemRef"),
        (Self::LOAD, "Load"),
        (Self::STORE, "Store"),
        (Self::DISPLACED, "Displaced"),
        (Self::CONTROL, "Control"),
        (Self::DIRECT, "Direct"),
        (Self::INDIRECT, "Indirect"),
        (Self::CONDITIONAL, "Conditional"),
        (Self::UNCONDITIONAL, "Unconditional"),
        (Self::CALL, "Call"),
        (Self::RETURN, "Return"),
        (Self::TRAP, "Trap"),
        (Self::SYSCALL, "Syscall"),
        (Self::NOP, "Nop"),
        (Self::SERIALIZING, "Serializing"),
        (Self::UNIMPLEMENTED, "Unimplemented"),
        (Self::UNKNOWN, "Unknown"),
        (Self::LIKELY, "Likely"),
    ];

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if every flag in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no flag is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Union of two flag sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for InstFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for InstFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for InstFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                let _ = set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// Functional unit an instruction is scheduled on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FuKind {
    /// Needs no functional unit (nop, unknown, unimplemented).
    #[default]
    None,

    /// Integer ALU, including branches and jumps.
    IntAlu,

    /// Integer multiplier.
    IntMult,

    /// Integer divider.
    IntDiv,

    /// Floating-point adder.
    FloatAdd,

    /// Floating-point comparator.
    FloatCompare,

    /// Floating-point format converter.
    FloatConvert,

    /// Floating-point multiplier.
    FloatMult,

    /// Floating-point divider.
    FloatDiv,

    /// Floating-point square root.
    FloatSqrt,

    /// Memory read port.
    ReadPort,

    /// Memory write port.
    WritePort,
}

impl fmt::Display for FuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::IntAlu => "int-alu",
            Self::IntMult => "int-mult",
            Self::IntDiv => "int-div",
            Self::FloatAdd => "float-add",
            Self::FloatCompare => "float-compare",
            Self::FloatConvert => "float-convert",
            Self::FloatMult => "float-mult",
            Self::FloatDiv => "float-div",
            Self::FloatSqrt => "float-sqrt",
            Self::ReadPort => "read-port",
            Self::WritePort => "write-port",
        };
        f.write_str(name)
    }
}
