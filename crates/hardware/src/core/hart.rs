//! Functional hart.
//!
//! This module defines `Hart`, the reference [`Thread`]: one register file over
//! one [`Memory`], executing an instruction per [`Hart::step`]. It provides:
//! 1. **Setup:** Entry point and syscall emulation.
//! 2. **Stepping:** Fetch through a [`Decoder`], execute, advance the delay-slot PCs.
//! 3. **Tracing:** A `trace!` disassembly line per instruction when enabled.
//!
//! Timing is not modelled; a pipeline simulator drives
//! [`DynamicInstruction`]s itself and only borrows the ISA semantics.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use super::dynamic::DynamicInstruction;
use super::thread::{SyscallHandler, Thread};
use crate::common::constants::WORD_SIZE;
use crate::common::error::{SimError, SimResult};
use crate::common::reg::RegisterFile;
use crate::config::{ExecutionConfig, OverflowPolicy};
use crate::isa::decode::Decoder;
use crate::isa::instruction::StaticInst;
use crate::soc::traits::Memory;

/// A hardware thread executing against memory `M`.
pub struct Hart<M: Memory> {
    name: String,
    regs: RegisterFile,
    memory: M,
    handler: Option<Box<dyn SyscallHandler>>,
    overflow: OverflowPolicy,
}

impl<M: Memory> Hart<M> {
    /// Creates a hart with zeroed registers, PC 0, and no syscall handler.
    pub fn new(name: impl Into<String>, memory: M, config: &ExecutionConfig) -> Self {
        Self {
            name: name.into(),
            regs: RegisterFile::new(),
            memory,
            handler: None,
            overflow: config.overflow,
        }
    }

    /// Installs the syscall emulation layer.
    #[must_use]
    pub fn with_handler(mut self, handler: Box<dyn SyscallHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Points `pc` at `entry` with `npc`/`nnpc` following sequentially.
    pub const fn set_entry(&mut self, entry: u32) {
        self.regs.reset_pc(entry);
    }

    /// Memory the hart runs against.
    pub const fn mem(&self) -> &M {
        &self.memory
    }

    /// Memory the hart runs against, mutably.
    pub const fn mem_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Executes the instruction at `pc` and advances the PCs.
    ///
    /// The delay-slot chain shifts by one: `pc = npc`, `npc = nnpc`,
    /// `nnpc = nnpc + 4`. A control instruction has already redirected `nnpc`,
    /// so its target takes effect after the delay slot.
    ///
    /// # Errors
    ///
    /// Fetch, decode-cache, and execution errors. The PCs are left pointing at
    /// the faulting instruction.
    pub fn step(&mut self, decoder: &mut Decoder) -> SimResult<Arc<StaticInst>> {
        let pc = self.regs.pc();
        let inst = decoder.decode(pc, &mut self.memory)?;
        let trace_enabled = decoder.config().trace;
        let mut dyn_inst = DynamicInstruction::new(self, pc, Arc::clone(&inst));
        if trace_enabled {
            trace!(target: "mipsim::exec", "{}", dyn_inst.disassemble());
        }
        dyn_inst.execute()?;
        let (npc, nnpc) = (self.regs.npc(), self.regs.nnpc());
        self.regs.set_pc(npc);
        self.regs.set_npc(nnpc);
        self.regs.set_nnpc(nnpc.wrapping_add(WORD_SIZE));
        Ok(inst)
    }

    /// Steps until `pc` equals `stop` or `limit` instructions have run.
    ///
    /// # Returns
    ///
    /// The number of instructions executed.
    ///
    /// # Errors
    ///
    /// The first error returned by [`Hart::step`].
    pub fn run_until(&mut self, decoder: &mut Decoder, stop: u32, limit: u64) -> SimResult<u64> {
        let mut executed = 0;
        while executed < limit && self.regs.pc() != stop {
            let _ = self.step(decoder)?;
            executed += 1;
        }
        Ok(executed)
    }
}

impl<M: Memory> Thread for Hart<M> {
    fn name(&self) -> &str {
        &self.name
    }

    fn regs(&self) -> &RegisterFile {
        &self.regs
    }

    fn regs_mut(&mut self) -> &mut RegisterFile {
        &mut self.regs
    }

    fn memory(&mut self) -> &mut dyn Memory {
        &mut self.memory
    }

    fn syscall(&mut self, number: u32) -> SimResult<()> {
        match self.handler.as_mut() {
            Some(handler) => handler.handle(number, &mut self.regs, &mut self.memory),
            None => Err(SimError::UnhandledSyscall {
                thread: self.name.clone(),
                number,
            }),
        }
    }

    fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }
}

impl<M: Memory> fmt::Debug for Hart<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hart")
            .field("name", &self.name)
            .field("pc", &format_args!("{:#010x}", self.regs.pc()))
            .field("speculative", &self.regs.is_speculative())
            .field("syscalls", &self.handler.is_some())
            .field("overflow", &self.overflow)
            .finish_non_exhaustive()
    }
}
