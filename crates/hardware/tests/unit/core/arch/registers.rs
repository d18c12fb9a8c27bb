//! Register File State.
//!
//! `$zero`, the misc bank, and the single-level speculative checkpoint.

use mipsim_core::common::{RegisterFile, SimError};
use mipsim_core::isa::deps::MiscReg;
use pretty_assertions::assert_eq;

#[test]
fn zero_register_reads_zero_after_clear() {
    let mut regs = RegisterFile::new();
    regs.set_gpr(0, 0xDEAD_BEEF);
    regs.clear_zero();
    assert_eq!(regs.gpr(0), 0);
}

#[test]
fn misc_registers_by_dependency_index() {
    let mut regs = RegisterFile::new();
    let misc = regs.misc_mut();
    misc.write(MiscReg::Hi, 1);
    misc.write(MiscReg::Lo, 2);
    misc.write(MiscReg::Ea, 3);
    assert_eq!((misc.hi, misc.lo, misc.ea), (1, 2, 3));
    assert_eq!(misc.read(MiscReg::Fcsr), 0);
}

#[test]
fn condition_codes_map_to_fcsr_bits() {
    let mut regs = RegisterFile::new();
    regs.misc_mut().set_fcc(0, true);
    regs.misc_mut().set_fcc(3, true);
    assert_eq!(regs.misc().fcsr, (1 << 23) | (1 << 27));
    assert!(!regs.misc().fcc(1));
}

#[test]
fn reset_pc_primes_delay_slot_chain() {
    let mut regs = RegisterFile::new();
    regs.reset_pc(0x0040_0000);
    assert_eq!(
        (regs.pc(), regs.npc(), regs.nnpc()),
        (0x0040_0000, 0x0040_0004, 0x0040_0008)
    );
}

#[test]
fn leaving_speculation_restores_checkpoint() {
    let mut regs = RegisterFile::new();
    regs.reset_pc(0x100);
    regs.set_gpr(8, 5);
    regs.fpr_mut().set_double(2, 2.0);
    let before = regs.snapshot();

    regs.set_speculative(true).unwrap();
    assert!(regs.is_speculative());
    regs.set_gpr(8, 99);
    regs.fpr_mut().set_double(2, -1.0);
    regs.misc_mut().hi = 7;
    regs.set_pc(0x200);

    regs.set_speculative(false).unwrap();
    assert!(!regs.is_speculative());
    assert_eq!(regs.snapshot(), before);
    assert_eq!(regs.gpr(8), 5);
}

#[test]
fn nested_speculation_is_rejected() {
    let mut regs = RegisterFile::new();
    regs.set_speculative(true).unwrap();
    regs.set_gpr(9, 1);
    assert_eq!(regs.set_speculative(true), Err(SimError::NestedSpeculation));
    // The outstanding checkpoint survives the failed request.
    assert!(regs.is_speculative());
    regs.set_speculative(false).unwrap();
    assert_eq!(regs.gpr(9), 0);
}

#[test]
fn leaving_when_not_speculative_is_noop() {
    let mut regs = RegisterFile::new();
    regs.set_gpr(8, 3);
    regs.set_speculative(false).unwrap();
    assert_eq!(regs.gpr(8), 3);
}
