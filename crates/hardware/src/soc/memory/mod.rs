//! Sparse Simulated Memory.
//!
//! This module implements the memory a hart runs against. It provides:
//! 1. **Pages:** Zero-filled 4 KiB pages allocated on `map` or `load`.
//! 2. **Access:** The [`Memory`] trait, little-endian, naturally aligned only.
//! 3. **Loading:** Byte images copied in at arbitrary addresses.
//!
//! The 4 GiB address space is never allocated up front; only touched pages
//! cost host memory. An aligned access never crosses a page boundary.

use std::collections::HashMap;

use crate::common::constants::{PAGE_OFFSET_MASK, PAGE_SHIFT, PAGE_SIZE};
use crate::common::data::AccessType;
use crate::common::error::MemoryFault;
use crate::soc::traits::Memory;

/// Backing storage of one page.
type Page = Box<[u8; PAGE_SIZE as usize]>;

/// Sparse, page-mapped, little-endian memory.
#[derive(Debug, Default, Clone)]
pub struct Ram {
    /// Page number to page contents.
    pages: HashMap<u32, Page>,
}

impl Ram {
    /// Creates an empty memory with nothing mapped.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps zero-filled pages covering `[base, base + len)`.
    ///
    /// Pages already mapped keep their contents.
    pub fn map(&mut self, base: u32, len: u32) {
        if len == 0 {
            return;
        }
        let first = base >> PAGE_SHIFT;
        let last = base.saturating_add(len - 1) >> PAGE_SHIFT;
        for page in first..=last {
            let _ = self
                .pages
                .entry(page)
                .or_insert_with(|| Box::new([0; PAGE_SIZE as usize]));
        }
    }

    /// Copies `data` to `base`, mapping whatever pages it covers.
    ///
    /// Used for loading program images and test fixtures.
    pub fn load(&mut self, base: u32, data: &[u8]) {
        let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
        self.map(base, len);
        for (addr, byte) in (base..=u32::MAX).zip(data) {
            if let Some(slot) = self.byte_mut(addr) {
                *slot = *byte;
            }
        }
    }

    /// Returns whether the page holding `addr` is mapped.
    pub fn is_mapped(&self, addr: u32) -> bool {
        self.pages.contains_key(&(addr >> PAGE_SHIFT))
    }

    /// Number of mapped pages.
    pub fn mapped_pages(&self) -> usize {
        self.pages.len()
    }

    fn byte_mut(&mut self, addr: u32) -> Option<&mut u8> {
        self.pages
            .get_mut(&(addr >> PAGE_SHIFT))
            .map(|page| &mut page[(addr & PAGE_OFFSET_MASK) as usize])
    }

    /// Bytes of an aligned `N`-byte access at `addr`.
    fn read<const N: usize>(&self, addr: u32) -> Result<[u8; N], MemoryFault> {
        let size = N as u32;
        if addr % size != 0 {
            return Err(MemoryFault::misaligned(addr, size, AccessType::Read));
        }
        let page = self
            .pages
            .get(&(addr >> PAGE_SHIFT))
            .ok_or(MemoryFault::unmapped(addr, size, AccessType::Read))?;
        let off = (addr & PAGE_OFFSET_MASK) as usize;
        let mut out = [0; N];
        out.copy_from_slice(&page[off..off + N]);
        Ok(out)
    }

    fn write<const N: usize>(&mut self, addr: u32, bytes: [u8; N]) -> Result<(), MemoryFault> {
        let size = N as u32;
        if addr % size != 0 {
            return Err(MemoryFault::misaligned(addr, size, AccessType::Write));
        }
        let page = self
            .pages
            .get_mut(&(addr >> PAGE_SHIFT))
            .ok_or(MemoryFault::unmapped(addr, size, AccessType::Write))?;
        let off = (addr & PAGE_OFFSET_MASK) as usize;
        page[off..off + N].copy_from_slice(&bytes);
        Ok(())
    }
}

impl Memory for Ram {
    fn read_u8(&mut self, addr: u32) -> Result<u8, MemoryFault> {
        self.read::<1>(addr).map(u8::from_le_bytes)
    }

    fn read_u16(&mut self, addr: u32) -> Result<u16, MemoryFault> {
        self.read::<2>(addr).map(u16::from_le_bytes)
    }

    fn read_u32(&mut self, addr: u32) -> Result<u32, MemoryFault> {
        self.read::<4>(addr).map(u32::from_le_bytes)
    }

    fn read_u64(&mut self, addr: u32) -> Result<u64, MemoryFault> {
        self.read::<8>(addr).map(u64::from_le_bytes)
    }

    fn write_u8(&mut self, addr: u32, val: u8) -> Result<(), MemoryFault> {
        self.write(addr, val.to_le_bytes())
    }

    fn write_u16(&mut self, addr: u32, val: u16) -> Result<(), MemoryFault> {
        self.write(addr, val.to_le_bytes())
    }

    fn write_u32(&mut self, addr: u32, val: u32) -> Result<(), MemoryFault> {
        self.write(addr, val.to_le_bytes())
    }

    fn write_u64(&mut self, addr: u32, val: u64) -> Result<(), MemoryFault> {
        self.write(addr, val.to_le_bytes())
    }

    fn write_bytes(&mut self, addr: u32, data: &[u8]) -> Result<(), MemoryFault> {
        self.load(addr, data);
        Ok(())
    }
}
