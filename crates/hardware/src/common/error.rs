//! Fatal simulation errors.
//!
//! This module defines the error handling for the instruction-set core. It provides:
//! 1. **Memory Faults:** Unmapped or misaligned accesses reported by a `Memory`.
//! 2. **Instruction Faults:** Unknown, unimplemented, and trapping instructions.
//! 3. **Model Violations:** Illegal speculation re-entry and unhandled syscalls.
//!
//! Every `SimError` is fatal: nothing at this layer retries, and the caller is
//! expected to halt the simulation with the formatted message.

use std::fmt;

use thiserror::Error;

use super::data::AccessType;

/// Why a memory access failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// No page is mapped at the address.
    Unmapped,
    /// The address is not a multiple of the access size.
    Misaligned,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unmapped => write!(f, "unmapped"),
            Self::Misaligned => write!(f, "misaligned"),
        }
    }
}

/// A failed memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{kind} {access} of {size} bytes at {addr:#010x}")]
pub struct MemoryFault {
    /// Faulting virtual address.
    pub addr: u32,
    /// Access size in bytes.
    pub size: u32,
    /// Fetch, read, or write.
    pub access: AccessType,
    /// Unmapped or misaligned.
    pub kind: FaultKind,
}

impl MemoryFault {
    /// Creates a fault for an access to an address with no mapped page.
    pub const fn unmapped(addr: u32, size: u32, access: AccessType) -> Self {
        Self {
            addr,
            size,
            access,
            kind: FaultKind::Unmapped,
        }
    }

    /// Creates a fault for an access whose address is not size-aligned.
    pub const fn misaligned(addr: u32, size: u32, access: AccessType) -> Self {
        Self {
            addr,
            size,
            access,
            kind: FaultKind::Misaligned,
        }
    }
}

/// Coprocessor group an unimplemented instruction belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnimplementedGroup {
    /// System control coprocessor (TLB, exception return, cache ops).
    Cp0,
    /// Floating-point coprocessor (paired single, indexed loads, fused ops).
    Cp1,
    /// Implementation-defined coprocessor 2.
    Cp2,
    /// Everything else (likely branches, debug, pass/fail sentinels).
    Generic,
}

impl fmt::Display for UnimplementedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cp0 => write!(f, "CP0"),
            Self::Cp1 => write!(f, "CP1"),
            Self::Cp2 => write!(f, "CP2"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// Fatal errors raised while decoding or executing instructions.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SimError {
    /// The word at the program counter could not be fetched.
    #[error("instruction fetch at pc {pc:#010x} failed: {fault}")]
    Fetch {
        /// Program counter being decoded.
        pc: u32,
        /// Underlying memory fault.
        #[source]
        fault: MemoryFault,
    },

    /// A load or store faulted.
    #[error("memory fault: {0}")]
    Memory(#[from] MemoryFault),

    /// The word does not encode any MIPS32 instruction.
    #[error("unknown instruction {word:#010x} at pc {pc:#010x}")]
    Unknown {
        /// Program counter of the instruction.
        pc: u32,
        /// Raw instruction word.
        word: u32,
    },

    /// The word encodes a recognised instruction this core does not model.
    #[error("unimplemented {group} instruction `{mnemonic}` ({word:#010x}) at pc {pc:#010x}")]
    Unimplemented {
        /// Program counter of the instruction.
        pc: u32,
        /// Raw instruction word.
        word: u32,
        /// Intended mnemonic.
        mnemonic: &'static str,
        /// Coprocessor group.
        group: UnimplementedGroup,
    },

    /// A trap instruction's condition held.
    #[error("trap `{mnemonic}` taken at pc {pc:#010x}")]
    Trap {
        /// Program counter of the trap instruction.
        pc: u32,
        /// Trap mnemonic.
        mnemonic: &'static str,
    },

    /// Signed overflow under `OverflowPolicy::Trap`.
    #[error("integer overflow in `{mnemonic}` at pc {pc:#010x}")]
    IntegerOverflow {
        /// Program counter of the instruction.
        pc: u32,
        /// Instruction mnemonic.
        mnemonic: &'static str,
    },

    /// A second speculative checkpoint was requested before the first resolved.
    #[error("speculative checkpoint requested while already speculative")]
    NestedSpeculation,

    /// The thread has no way to service a syscall.
    #[error("thread `{thread}` has no handler for syscall {number}")]
    UnhandledSyscall {
        /// Thread name.
        thread: String,
        /// Syscall number taken from `$v0`.
        number: u32,
    },
}

/// Result alias used throughout the core.
pub type SimResult<T> = Result<T, SimError>;
