//! Dynamic instruction occurrences.
//!
//! A [`StaticInst`] describes an encoding; a `DynamicInstruction` is one fetch
//! of it by one thread at one PC. The static record is shared by `Arc`, so a
//! hot loop decodes once and allocates nothing per occurrence.

use std::sync::Arc;

use crate::common::error::SimResult;
use crate::core::thread::Thread;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::StaticInst;

/// One execution of a decoded instruction.
pub struct DynamicInstruction<'t> {
    thread: &'t mut dyn Thread,
    pc: u32,
    inst: Arc<StaticInst>,
}

impl<'t> DynamicInstruction<'t> {
    /// Binds `inst`, fetched at `pc`, to `thread`.
    pub fn new(thread: &'t mut dyn Thread, pc: u32, inst: Arc<StaticInst>) -> Self {
        Self { thread, pc, inst }
    }

    /// Fetch address.
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// The decoded instruction.
    pub fn inst(&self) -> &StaticInst {
        &self.inst
    }

    /// Executes against the bound thread.
    ///
    /// `$zero` is cleared first, so a write to it by the previous instruction
    /// is never observed.
    ///
    /// # Errors
    ///
    /// Any error from [`StaticInst::execute`].
    pub fn execute(&mut self) -> SimResult<()> {
        self.thread.regs_mut().clear_zero();
        self.inst.execute(self.thread)
    }

    /// Disassembly line for this occurrence.
    pub fn disassemble(&self) -> String {
        disassemble(self.pc, &self.inst)
    }

    /// Control-transfer target under the thread's current registers.
    pub fn target_pc(&self) -> Option<u32> {
        self.inst.target_pc(&*self.thread)
    }
}

impl std::fmt::Debug for DynamicInstruction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicInstruction")
            .field("thread", &self.thread.name())
            .field("pc", &format_args!("{:#010x}", self.pc))
            .field("mnemonic", &self.inst.mnemonic())
            .finish()
    }
}
