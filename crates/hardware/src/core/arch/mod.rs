//! MIPS32 architectural register banks.
//!
//! This module contains the register files that make up a thread's architectural state.
//! It includes the following modules:
//! 1. **GPRs:** The 32-entry integer register file.
//! 2. **FPRs:** The coprocessor-1 bank with its aliased single/double views.
//! 3. **Misc:** `lo`, `hi`, `ea`, and `fcsr`.

/// Floating-Point Register file implementation.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;

/// Miscellaneous register file (`lo`, `hi`, `ea`, `fcsr`).
pub mod misc;

pub use fpr::FloatRegisterFile;
pub use gpr::IntRegisterFile;
pub use misc::MiscRegisterFile;
