//! Decode Cache Policies and Statistics.

use mipsim_core::config::{CachePolicy, DecoderConfig};
use mipsim_core::soc::Memory;
use mipsim_core::stats::DecodeStats;
use mipsim_core::{Decoder, Ram};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::*;
use crate::common::harness::{TEXT_BASE, TestContext, init_tracing};

fn decoder(cache_policy: CachePolicy) -> Decoder {
    Decoder::new(DecoderConfig {
        cache_policy,
        trace: false,
    })
}

fn ram_with(words: &[u32]) -> Ram {
    let mut ram = Ram::new();
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    ram.load(TEXT_BASE, &bytes);
    ram
}

#[test]
fn by_pc_serves_repeat_lookups_from_cache() {
    let mut ram = ram_with(&[addiu(8, 0, 1)]);
    let mut dec = decoder(CachePolicy::ByPc);

    let first = dec.decode(TEXT_BASE, &mut ram).unwrap();
    let second = dec.decode(TEXT_BASE, &mut ram).unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert_eq!(
        *dec.stats(),
        DecodeStats {
            hits: 1,
            misses: 1,
            ..DecodeStats::default()
        }
    );
    assert_eq!(dec.len(), 1);
}

#[test]
fn by_pc_keeps_stale_decode_until_invalidated() {
    let mut ram = ram_with(&[addiu(8, 0, 1)]);
    let mut dec = decoder(CachePolicy::ByPc);
    let _ = dec.decode(TEXT_BASE, &mut ram).unwrap();

    ram.write_u32(TEXT_BASE, lui(8, 1)).unwrap();
    assert_eq!(dec.decode(TEXT_BASE, &mut ram).unwrap().mnemonic(), "addiu");

    assert!(dec.invalidate(TEXT_BASE));
    assert!(!dec.invalidate(TEXT_BASE));
    assert_eq!(dec.decode(TEXT_BASE, &mut ram).unwrap().mnemonic(), "lui");
    assert_eq!(dec.stats().invalidations, 1);
}

#[test]
fn by_pc_and_word_redecodes_changed_word() {
    let mut ram = ram_with(&[addiu(8, 0, 1)]);
    let mut dec = decoder(CachePolicy::ByPcAndWord);
    let _ = dec.decode(TEXT_BASE, &mut ram).unwrap();
    let _ = dec.decode(TEXT_BASE, &mut ram).unwrap();

    ram.write_u32(TEXT_BASE, lui(8, 1)).unwrap();
    let inst = dec.decode(TEXT_BASE, &mut ram).unwrap();

    assert_eq!(inst.mnemonic(), "lui");
    let stats = dec.stats();
    assert_eq!((stats.hits, stats.misses, stats.invalidations), (1, 2, 1));
    assert_eq!(dec.len(), 1);
}

#[test]
fn disabled_cache_decodes_every_fetch() {
    let mut ram = ram_with(&[addiu(8, 0, 1)]);
    let mut dec = decoder(CachePolicy::Disabled);
    for _ in 0..3 {
        let _ = dec.decode(TEXT_BASE, &mut ram).unwrap();
    }
    assert!(dec.is_empty());
    assert_eq!(dec.stats().misses, 3);
    assert_eq!(dec.stats().hits, 0);
    assert!(dec.cached(TEXT_BASE).is_none());
}

#[test]
fn invalidate_range_is_half_open() {
    let mut ram = ram_with(&[nop(), nop(), nop(), nop()]);
    let mut dec = decoder(CachePolicy::ByPc);
    for i in 0..4 {
        let _ = dec.decode(TEXT_BASE + 4 * i, &mut ram).unwrap();
    }

    assert_eq!(dec.invalidate_range(TEXT_BASE + 4, 8), 2);

    assert!(dec.cached(TEXT_BASE).is_some());
    assert!(dec.cached(TEXT_BASE + 4).is_none());
    assert!(dec.cached(TEXT_BASE + 8).is_none());
    assert!(dec.cached(TEXT_BASE + 12).is_some());
    assert_eq!(dec.stats().invalidations, 2);
}

#[test]
fn clear_empties_cache_but_keeps_counters() {
    let mut ram = ram_with(&[nop(), nop()]);
    let mut dec = decoder(CachePolicy::ByPc);
    let _ = dec.decode(TEXT_BASE, &mut ram).unwrap();
    let _ = dec.decode(TEXT_BASE + 4, &mut ram).unwrap();

    dec.clear();

    assert!(dec.is_empty());
    assert_eq!(dec.stats().misses, 2);
    assert_eq!(dec.stats().invalidations, 2);
}

#[test]
fn misses_are_classified() {
    let mut ram = ram_with(&[0x3B << 26, 0x4200_0018, nop()]);
    let mut dec = decoder(CachePolicy::ByPc);
    for i in 0..3 {
        let _ = dec.decode(TEXT_BASE + 4 * i, &mut ram).unwrap();
    }
    assert_eq!(dec.stats().unknown, 1);
    assert_eq!(dec.stats().unimplemented, 1);
}

#[test]
fn loop_body_hits_after_first_iteration() {
    // Three-instruction loop: addiu, bne back to the top, delay-slot nop.
    let mut ctx = TestContext::new().with_program(&[addiu(8, 8, 1), bne(8, 9, -8), nop()]);
    ctx.set_gpr(9, 4);
    ctx.run(12);

    assert_eq!(ctx.gpr(8), 4);
    let stats = ctx.decoder.stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 9);
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
}

#[test]
fn stats_serialize_and_log() {
    init_tracing();
    let stats = DecodeStats {
        hits: 9,
        misses: 3,
        ..DecodeStats::default()
    };
    stats.print();
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["hits"], 9);
    assert_eq!(json["misses"], 3);
    assert_eq!(json["invalidations"], 0);
}
