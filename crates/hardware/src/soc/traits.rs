//! Memory trait for instruction fetch and data access.
//!
//! This module defines the `Memory` trait the core executes against. It provides:
//! 1. **Access:** Byte, half, word, and doubleword reads and writes at virtual addresses.
//! 2. **Faults:** Every access returns a [`MemoryFault`] instead of panicking.
//! 3. **Bulk Writes:** A default `write_bytes` for loading program images.
//!
//! Multi-byte values are little-endian. Implementors decide whether misaligned
//! accesses fault; the core never splits them.

use crate::common::data::AccessType;
use crate::common::error::MemoryFault;

/// Byte-addressable memory seen by one hart.
///
/// Reads take `&mut self` so implementors may count accesses or model
/// side-effecting regions.
pub trait Memory {
    /// Reads one byte at `addr`.
    fn read_u8(&mut self, addr: u32) -> Result<u8, MemoryFault>;
    /// Reads two bytes (little-endian) at `addr`.
    fn read_u16(&mut self, addr: u32) -> Result<u16, MemoryFault>;
    /// Reads four bytes (little-endian) at `addr`.
    fn read_u32(&mut self, addr: u32) -> Result<u32, MemoryFault>;
    /// Reads eight bytes (little-endian) at `addr`.
    fn read_u64(&mut self, addr: u32) -> Result<u64, MemoryFault>;
    /// Writes one byte at `addr`.
    fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), MemoryFault>;
    /// Writes two bytes (little-endian) at `addr`.
    fn write_u16(&mut self, addr: u32, val: u16) -> Result<(), MemoryFault>;
    /// Writes four bytes (little-endian) at `addr`.
    fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), MemoryFault>;
    /// Writes eight bytes (little-endian) at `addr`.
    fn write_u64(&mut self, addr: u32, val: u64) -> Result<(), MemoryFault>;

    /// Writes a contiguous byte slice starting at `addr` (default: byte-by-byte).
    ///
    /// # Errors
    ///
    /// The first fault encountered; earlier bytes stay written.
    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryFault> {
        for (i, byte) in data.iter().enumerate() {
            let Ok(off) = u32::try_from(i) else {
                return Err(MemoryFault::unmapped(addr, 1, AccessType::Write));
            };
            self.write_u8(addr.wrapping_add(off), *byte)?;
        }
        Ok(())
    }
}
