//! Decoder statistics.
//!
//! This module tracks how the decode cache behaves for one [`Decoder`]. It provides:
//! 1. **Cache:** Hits, misses, and invalidated entries.
//! 2. **Classification:** How many misses decoded to unknown or unimplemented words.
//!
//! [`Decoder`]: crate::isa::decode::Decoder

use serde::Serialize;
use tracing::info;

/// Counters maintained by a [`Decoder`](crate::isa::decode::Decoder).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that fetched and decoded a word.
    pub misses: u64,
    /// Misses that decoded to an unknown instruction.
    pub unknown: u64,
    /// Misses that decoded to an unimplemented instruction.
    pub unimplemented: u64,
    /// Cache entries dropped by invalidation or word mismatch.
    pub invalidations: u64,
}

impl DecodeStats {
    /// Total lookups.
    pub const fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups served from the cache, 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }

    /// Logs the counters at `info` level.
    pub fn print(&self) {
        info!(
            hits = self.hits,
            misses = self.misses,
            unknown = self.unknown,
            unimplemented = self.unimplemented,
            invalidations = self.invalidations,
            "decode cache: {:.2}% hit rate",
            self.hit_rate() * 100.0
        );
    }
}
