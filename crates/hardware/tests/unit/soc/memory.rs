//! Sparse RAM and Memory Trait Tests.

use mipsim_core::Ram;
use mipsim_core::common::{AccessType, FaultKind, MemoryFault};
use mipsim_core::soc::Memory;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::mocks::memory::MockMemoryPort;

#[test]
fn map_rounds_to_whole_pages() {
    let mut ram = Ram::new();
    ram.map(0x1000_0FFC, 8);
    assert_eq!(ram.mapped_pages(), 2);
    assert!(ram.is_mapped(0x1000_0000));
    assert!(ram.is_mapped(0x1000_1FFF));
    assert!(!ram.is_mapped(0x1000_2000));
}

#[test]
fn map_keeps_existing_contents() {
    let mut ram = Ram::new();
    ram.load(0x2000, &[0xAB]);
    ram.map(0x2000, 0x1000);
    assert_eq!(ram.read_u8(0x2000), Ok(0xAB));
}

#[test]
fn top_page_is_reachable() {
    let mut ram = Ram::new();
    ram.map(0xFFFF_F000, 0x1000);
    ram.write_u32(0xFFFF_FFFC, 0x0102_0304).unwrap();
    assert_eq!(ram.read_u32(0xFFFF_FFFC), Ok(0x0102_0304));
    assert_eq!(ram.mapped_pages(), 1);
}

#[test]
fn fresh_pages_read_zero() {
    let mut ram = Ram::new();
    ram.map(0x4000, 1);
    assert_eq!(ram.read_u64(0x4FF8), Ok(0));
}

#[rstest]
#[case::half(2, 0x1001)]
#[case::word(4, 0x1002)]
#[case::double(8, 0x1004)]
fn misaligned_reads_fault(#[case] size: u32, #[case] addr: u32) {
    let mut ram = Ram::new();
    ram.map(0x1000, 0x1000);
    let fault = match size {
        2 => ram.read_u16(addr).map(|_| ()),
        4 => ram.read_u32(addr).map(|_| ()),
        _ => ram.read_u64(addr).map(|_| ()),
    }
    .unwrap_err();
    assert_eq!(fault, MemoryFault::misaligned(addr, size, AccessType::Read));
}

#[test]
fn unmapped_write_reports_address() {
    let mut ram = Ram::new();
    let fault = ram.write_u8(0x1234, 1).unwrap_err();
    assert_eq!(fault.kind, FaultKind::Unmapped);
    assert_eq!(fault.addr, 0x1234);
    assert_eq!(
        fault.to_string(),
        "unmapped write of 1 bytes at 0x00001234"
    );
}

#[test]
fn write_bytes_maps_on_ram() {
    let mut ram = Ram::new();
    ram.write_bytes(0x8000, &[1, 2, 3, 4]).unwrap();
    assert_eq!(ram.read_u32(0x8000), Ok(0x0403_0201));
}

#[test]
fn default_write_bytes_stops_at_first_fault() {
    let mut port = MockMemoryPort::new();
    let _ = port
        .expect_write_u8()
        .withf(|addr, _| *addr < 0x102)
        .times(2)
        .returning(|_, _| Ok(()));
    let _ = port
        .expect_write_u8()
        .withf(|addr, _| *addr == 0x102)
        .times(1)
        .returning(|addr, _| Err(MemoryFault::unmapped(addr, 1, AccessType::Write)));

    let fault = port.write_bytes(0x100, &[9, 9, 9, 9]).unwrap_err();

    assert_eq!(fault.addr, 0x102);
}

proptest! {
    #[test]
    fn aligned_words_round_trip(offset in 0u32..1024, value: u32) {
        let mut ram = Ram::new();
        ram.map(0x1000_0000, 0x1000);
        let addr = 0x1000_0000 + offset * 4;
        ram.write_u32(addr, value).unwrap();
        prop_assert_eq!(ram.read_u32(addr), Ok(value));
        prop_assert_eq!(ram.read_u8(addr), Ok(value as u8));
    }
}
