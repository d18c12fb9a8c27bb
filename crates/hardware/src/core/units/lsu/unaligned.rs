//! Unaligned word access merging.
//!
//! `lwl`/`lwr` and `swl`/`swr` each touch the aligned word containing the
//! effective address and merge part of it with a register. Byte order is
//! little-endian: with `off = ea & 3`, `lwl` fills the register from its most
//! significant byte down, and `lwr` fills it from its least significant byte up.
//! A `lwl`/`lwr` pair (or `swl`/`swr` pair) spanning an unaligned word therefore
//! moves the whole word.

/// Mask covering the byte offset within a word.
pub const WORD_OFFSET_MASK: u32 = 0x3;

/// Right-aligned mask of `bits` ones, `bits` in 0-32.
#[inline]
const fn mask(bits: u32) -> u32 {
    match u32::MAX.checked_shr(32 - bits) {
        Some(m) if bits != 0 => m,
        _ => 0,
    }
}

#[inline]
const fn shl(value: u32, bits: u32) -> u32 {
    match value.checked_shl(bits) {
        Some(v) => v,
        None => 0,
    }
}

#[inline]
const fn shr(value: u32, bits: u32) -> u32 {
    match value.checked_shr(bits) {
        Some(v) => v,
        None => 0,
    }
}

/// Aligned word address holding `ea`.
#[inline]
pub const fn aligned(ea: u32) -> u32 {
    ea & !WORD_OFFSET_MASK
}

/// `lwl`: merges memory word `mem` into register value `reg`.
pub const fn load_left(ea: u32, mem: u32, reg: u32) -> u32 {
    let s = 24 - 8 * (ea & WORD_OFFSET_MASK);
    shl(mem, s) | (reg & mask(s))
}

/// `lwr`: merges memory word `mem` into register value `reg`.
pub const fn load_right(ea: u32, mem: u32, reg: u32) -> u32 {
    let s = 8 * (ea & WORD_OFFSET_MASK);
    (reg & shl(mask(s), 32 - s)) | shr(mem, s)
}

/// `swl`: merges register value `reg` into memory word `mem`.
pub const fn store_left(ea: u32, mem: u32, reg: u32) -> u32 {
    let rs = 24 - 8 * (ea & WORD_OFFSET_MASK);
    (mem & shl(mask(rs), 32 - rs)) | shr(reg, rs)
}

/// `swr`: merges register value `reg` into memory word `mem`.
pub const fn store_right(ea: u32, mem: u32, reg: u32) -> u32 {
    let rs = 8 * (ea & WORD_OFFSET_MASK);
    shl(reg, rs) | (mem & mask(rs))
}
