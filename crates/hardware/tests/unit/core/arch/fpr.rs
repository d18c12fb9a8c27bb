//! Float Register Aliasing.
//!
//! Singles, raw words, doubles, and raw doublewords are views of one bank.

use mipsim_core::core::arch::FloatRegisterFile;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn double_and_doubleword_share_bits() {
    let mut fpr = FloatRegisterFile::new();
    fpr.set_double(4, 1.5);
    assert_eq!(fpr.get_ulong(4), 1.5f64.to_bits());
    assert_eq!(fpr.get_double(5), 1.5);
}

#[test]
fn single_write_touches_only_its_register() {
    let mut fpr = FloatRegisterFile::new();
    fpr.set_uint(4, 0xAAAA_AAAA);
    fpr.set_uint(6, 0xBBBB_BBBB);
    fpr.set_float(5, -0.0);
    assert_eq!(fpr.get_uint(4), 0xAAAA_AAAA);
    assert_eq!(fpr.get_uint(5), 0x8000_0000);
    assert_eq!(fpr.get_uint(6), 0xBBBB_BBBB);
    assert_eq!(fpr.get_ulong(4), 0x8000_0000_AAAA_AAAA);
}

#[test]
fn float_view_reinterprets_raw_word() {
    let mut fpr = FloatRegisterFile::new();
    fpr.set_uint(1, 0x3F80_0000);
    assert_eq!(fpr.get_float(1), 1.0);
}

proptest! {
    #[test]
    fn pair_halves_compose_the_doubleword(reg in 0usize..16, lo: u32, hi: u32) {
        let even = reg * 2;
        let mut fpr = FloatRegisterFile::new();
        fpr.set_uint(even, lo);
        fpr.set_uint(even + 1, hi);
        prop_assert_eq!(fpr.get_ulong(even), (u64::from(hi) << 32) | u64::from(lo));
        prop_assert_eq!(fpr.get_ulong(even + 1), fpr.get_ulong(even));
    }
}
