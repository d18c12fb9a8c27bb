//! Register dependency identifiers.
//!
//! A [`RegisterDependency`] names one architectural register an instruction reads
//! or writes. The lists are built once at decode time and consumed by the
//! pipeline's hazard tracking; execution never looks at them.

use std::fmt;

use super::abi::reg_name;

/// Register bank a dependency refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegisterKind {
    /// General-purpose integer register (0-31).
    Integer,
    /// Floating-point register (0-31, single-precision numbering).
    Float,
    /// Miscellaneous register, see [`MiscReg`].
    Misc,
}

/// Indices of the miscellaneous registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum MiscReg {
    /// Low multiply/divide result.
    Lo = 0,
    /// High multiply/divide result.
    Hi = 1,
    /// Effective address of the last memory access.
    Ea = 2,
    /// Floating-point control/status register.
    Fcsr = 3,
}

/// One register read or written by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegisterDependency {
    /// Bank.
    pub kind: RegisterKind,
    /// Index within the bank.
    pub index: u32,
}

impl RegisterDependency {
    /// Integer register `idx`.
    pub const fn int(idx: usize) -> Self {
        Self {
            kind: RegisterKind::Integer,
            index: idx as u32,
        }
    }

    /// Float register `idx`.
    pub const fn float(idx: usize) -> Self {
        Self {
            kind: RegisterKind::Float,
            index: idx as u32,
        }
    }

    /// Misc register `reg`.
    pub const fn misc(reg: MiscReg) -> Self {
        Self {
            kind: RegisterKind::Misc,
            index: reg as u32,
        }
    }
}

impl fmt::Display for RegisterDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RegisterKind::Integer => write!(f, "${}", reg_name(self.index as usize)),
            RegisterKind::Float => write!(f, "$f{}", self.index),
            RegisterKind::Misc => match self.index {
                0 => write!(f, "lo"),
                1 => write!(f, "hi"),
                2 => write!(f, "ea"),
                _ => write!(f, "fcsr"),
            },
        }
    }
}
