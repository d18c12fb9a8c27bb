//! Thread context seen by executing instructions.
//!
//! This module defines the two seams between the core and its host simulator:
//! 1. **Thread:** Register file, memory, syscall dispatch, and the execution
//!    policies one hardware context runs under.
//! 2. **SyscallHandler:** The emulation layer a [`Hart`](super::hart::Hart)
//!    forwards `syscall` to.
//!
//! Instructions only ever see `&mut dyn Thread`, so a pipeline model can supply
//! its own context without touching the ISA code.

use crate::common::error::SimResult;
use crate::common::reg::RegisterFile;
use crate::config::OverflowPolicy;
use crate::isa::abi::REG_A0;
use crate::soc::traits::Memory;

/// Number of syscall arguments passed in registers (`$a0`-`$a3`).
pub const SYSCALL_ARG_REGS: usize = 4;

/// One hardware thread context.
pub trait Thread {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Architectural registers.
    fn regs(&self) -> &RegisterFile;

    /// Architectural registers, mutably.
    fn regs_mut(&mut self) -> &mut RegisterFile;

    /// Memory the thread loads from and stores to.
    fn memory(&mut self) -> &mut dyn Memory;

    /// Handles a `syscall` with the number read from `$v0`.
    ///
    /// # Errors
    ///
    /// Whatever the emulation layer reports; the simulation stops.
    fn syscall(&mut self, number: u32) -> SimResult<()>;

    /// Reads syscall argument `index` (`$a0 + index`).
    ///
    /// # Panics
    ///
    /// If `index` is not below [`SYSCALL_ARG_REGS`].
    fn syscall_arg(&self, index: usize) -> u32 {
        assert!(index < SYSCALL_ARG_REGS, "syscall argument {index} out of range");
        self.regs().gpr(REG_A0 + index)
    }

    /// Writes syscall argument `index` (`$a0 + index`).
    ///
    /// # Panics
    ///
    /// If `index` is not below [`SYSCALL_ARG_REGS`].
    fn set_syscall_arg(&mut self, index: usize, value: u32) {
        assert!(index < SYSCALL_ARG_REGS, "syscall argument {index} out of range");
        self.regs_mut().set_gpr(REG_A0 + index, value);
    }

    /// How signed overflow in `add`, `addi`, and `sub` is handled.
    fn overflow_policy(&self) -> OverflowPolicy {
        OverflowPolicy::Approximate
    }

    /// Physical address of `vaddr`, for diagnostics only.
    fn translate(&self, vaddr: u32) -> u32 {
        vaddr
    }
}

/// System call emulation.
pub trait SyscallHandler {
    /// Handles syscall `number`.
    ///
    /// Arguments and results travel through `regs` (`$a0`-`$a3` in, `$v0`/`$v1`
    /// and `$a3` out) and `memory`.
    ///
    /// # Errors
    ///
    /// Any error stops the simulation.
    fn handle(
        &mut self,
        number: u32,
        regs: &mut RegisterFile,
        memory: &mut dyn Memory,
    ) -> SimResult<()>;
}
