//! Floating-point rounding mode support.
//!
//! MIPS32 encodes the rounding mode in `FCSR.RM` (bits 1:0):
//!
//! | Value | Mode | Description                   |
//! |-------|------|-------------------------------|
//! | 0b00  | RN   | Round to Nearest, ties to Even |
//! | 0b01  | RZ   | Round towards Zero            |
//! | 0b10  | RP   | Round Up (towards +inf)       |
//! | 0b11  | RM   | Round Down (towards -inf)     |
//!
//! The explicit `round`, `trunc`, `ceil`, and `floor` conversions override it.

use crate::isa::instruction::Rounding;

/// MIPS32 rounding mode encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (reset value).
    Rn = 0b00,
    /// Round towards Zero.
    Rz = 0b01,
    /// Round towards positive infinity.
    Rp = 0b10,
    /// Round towards negative infinity.
    Rm = 0b11,
}

impl RoundingMode {
    /// Decodes the `RM` field of an FCSR value.
    pub const fn from_fcsr(fcsr: u32) -> Self {
        match fcsr & 0b11 {
            0b00 => Self::Rn,
            0b01 => Self::Rz,
            0b10 => Self::Rp,
            _ => Self::Rm,
        }
    }

    /// Resolves an instruction's rounding request against the current FCSR.
    pub const fn resolve(rounding: Rounding, fcsr: u32) -> Self {
        match rounding {
            Rounding::Current => Self::from_fcsr(fcsr),
            Rounding::Round => Self::Rn,
            Rounding::Trunc => Self::Rz,
            Rounding::Ceil => Self::Rp,
            Rounding::Floor => Self::Rm,
        }
    }

    /// Rounds `value` to an integral value in this mode.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Rn => value.round_ties_even(),
            Self::Rz => value.trunc(),
            Self::Rp => value.ceil(),
            Self::Rm => value.floor(),
        }
    }
}
