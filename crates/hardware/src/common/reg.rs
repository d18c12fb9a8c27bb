//! Combined Register File.
//!
//! This module provides the `RegisterFile` struct, the complete architectural state of
//! one hardware thread. It provides:
//! 1. **Unified Storage:** Integer, float, and misc banks plus the `pc`/`npc`/`nnpc`
//!    triple that models the branch delay slot.
//! 2. **Speculation:** A single-level checkpoint. Entering speculative mode snapshots
//!    the live state; leaving it restores the snapshot.
//! 3. **Observability:** Debugging utilities for dumping register state during simulation.

use tracing::debug;

use crate::common::constants::WORD_SIZE;
use crate::common::error::{SimError, SimResult};
use crate::core::arch::{FloatRegisterFile, IntRegisterFile, MiscRegisterFile};

/// One complete copy of a thread's architectural registers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchState {
    /// Integer registers.
    pub gpr: IntRegisterFile,
    /// Floating-point registers.
    pub fpr: FloatRegisterFile,
    /// `lo`, `hi`, `ea`, `fcsr`.
    pub misc: MiscRegisterFile,
    /// Address of the instruction being executed.
    pub pc: u32,
    /// Address of the next instruction (the delay slot after a branch).
    pub npc: u32,
    /// Address of the instruction after `npc`; branches redirect this one.
    pub nnpc: u32,
}

/// Unified register file with a speculative shadow copy.
#[derive(Clone, Debug, Default)]
pub struct RegisterFile {
    live: ArchState,
    shadow: ArchState,
    speculative: bool,
}

impl RegisterFile {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a general-purpose register.
    #[inline]
    pub fn gpr(&self, idx: usize) -> u32 {
        self.live.gpr.read(idx)
    }

    /// Writes a general-purpose register.
    #[inline]
    pub fn set_gpr(&mut self, idx: usize, val: u32) {
        self.live.gpr.write(idx, val);
    }

    /// Forces `$zero` back to 0.
    #[inline]
    pub fn clear_zero(&mut self) {
        self.live.gpr.clear_zero();
    }

    /// Returns the live integer bank.
    pub const fn int_regs(&self) -> &IntRegisterFile {
        &self.live.gpr
    }

    /// Returns the live integer bank mutably.
    pub const fn int_regs_mut(&mut self) -> &mut IntRegisterFile {
        &mut self.live.gpr
    }

    /// Returns the live float bank.
    pub const fn fpr(&self) -> &FloatRegisterFile {
        &self.live.fpr
    }

    /// Returns the live float bank mutably.
    pub const fn fpr_mut(&mut self) -> &mut FloatRegisterFile {
        &mut self.live.fpr
    }

    /// Returns the live misc registers.
    pub const fn misc(&self) -> &MiscRegisterFile {
        &self.live.misc
    }

    /// Returns the live misc registers mutably.
    pub const fn misc_mut(&mut self) -> &mut MiscRegisterFile {
        &mut self.live.misc
    }

    /// Current program counter.
    #[inline]
    pub const fn pc(&self) -> u32 {
        self.live.pc
    }

    /// Next program counter.
    #[inline]
    pub const fn npc(&self) -> u32 {
        self.live.npc
    }

    /// Next-next program counter.
    #[inline]
    pub const fn nnpc(&self) -> u32 {
        self.live.nnpc
    }

    /// Sets the current program counter.
    #[inline]
    pub const fn set_pc(&mut self, pc: u32) {
        self.live.pc = pc;
    }

    /// Sets the next program counter.
    #[inline]
    pub const fn set_npc(&mut self, npc: u32) {
        self.live.npc = npc;
    }

    /// Sets the next-next program counter.
    #[inline]
    pub const fn set_nnpc(&mut self, nnpc: u32) {
        self.live.nnpc = nnpc;
    }

    /// Points the thread at `entry` with sequential `npc`/`nnpc`.
    pub const fn reset_pc(&mut self, entry: u32) {
        self.live.pc = entry;
        self.live.npc = entry.wrapping_add(WORD_SIZE);
        self.live.nnpc = entry.wrapping_add(2 * WORD_SIZE);
    }

    /// Returns the live architectural state.
    pub const fn state(&self) -> &ArchState {
        &self.live
    }

    /// Returns a deep copy of the live architectural state.
    pub fn snapshot(&self) -> ArchState {
        self.live.clone()
    }

    /// Returns `true` while a speculative checkpoint is outstanding.
    pub const fn is_speculative(&self) -> bool {
        self.speculative
    }

    /// Enters or leaves speculative mode.
    ///
    /// Entering (`false` to `true`) deep-copies the live state into the shadow.
    /// Leaving (`true` to `false`) restores the shadow, discarding every write made
    /// while speculative. Leaving while not speculative is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NestedSpeculation`] when asked to enter speculative mode
    /// while a checkpoint is already outstanding; only one level is supported.
    pub fn set_speculative(&mut self, speculative: bool) -> SimResult<()> {
        match (self.speculative, speculative) {
            (false, true) => {
                self.shadow.clone_from(&self.live);
                self.speculative = true;
                debug!("speculative checkpoint taken at pc {:#010x}", self.live.pc);
                Ok(())
            }
            (true, false) => {
                self.live.clone_from(&self.shadow);
                self.speculative = false;
                debug!("speculative state rolled back to pc {:#010x}", self.live.pc);
                Ok(())
            }
            (true, true) => Err(SimError::NestedSpeculation),
            (false, false) => Ok(()),
        }
    }

    /// Dumps the contents of all general-purpose registers and PCs.
    ///
    /// Useful for debugging and tracing register state during simulation.
    pub fn dump(&self) {
        debug!(
            "pc={:#010x} npc={:#010x} nnpc={:#010x} lo={:#010x} hi={:#010x} fcsr={:#010x}",
            self.live.pc,
            self.live.npc,
            self.live.nnpc,
            self.live.misc.lo,
            self.live.misc.hi,
            self.live.misc.fcsr
        );
        self.live.gpr.dump();
    }
}
