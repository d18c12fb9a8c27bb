//! Configuration for the instruction-set core.
//!
//! This module defines the configuration structures and enums that parameterize
//! decoding and execution. It provides:
//! 1. **Decoder:** Decode-cache policy and per-instruction tracing.
//! 2. **Execution:** How signed integer overflow is handled.
//!
//! Every field has a default, so an empty JSON object (or `IsaConfig::default()`)
//! yields the reference behaviour. The outer simulator owns the file format and
//! hands the core a JSON fragment.

use serde::Deserialize;

/// Default configuration constants for the core.
mod defaults {
    /// Instruction tracing is off unless requested.
    pub const TRACE: bool = false;
}

/// Decode-cache lookup policy.
///
/// Controls whether a cached [`StaticInst`](crate::isa::instruction::StaticInst)
/// is trusted when the word at its PC may have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CachePolicy {
    /// Key by PC only; a hit never re-reads memory.
    ///
    /// Self-modifying code keeps executing the stale decode until the entry is
    /// invalidated.
    #[default]
    #[serde(alias = "PC")]
    ByPc,
    /// Key by PC, but re-read the word on every lookup and re-decode when it
    /// differs from the cached one.
    #[serde(alias = "PcAndWord")]
    ByPcAndWord,
    /// Decode every fetch; nothing is cached.
    #[serde(alias = "None")]
    Disabled,
}

/// Handling of signed overflow in `add`, `addi`, and `sub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OverflowPolicy {
    /// Wrap the result and log a warning.
    ///
    /// Matches a simulator without exception delivery: the program keeps
    /// running with the two's-complement result.
    #[default]
    #[serde(alias = "Wrap")]
    Approximate,
    /// Stop with [`SimError::IntegerOverflow`](crate::common::error::SimError::IntegerOverflow).
    Trap,
}

/// Root configuration for the core.
///
/// # Example
///
/// ```
/// use mipsim_core::config::{CachePolicy, IsaConfig, OverflowPolicy};
///
/// let json = r#"{
///     "decoder": { "cache_policy": "ByPcAndWord", "trace": true },
///     "execution": { "overflow": "Trap" }
/// }"#;
///
/// let config = IsaConfig::from_json(json).unwrap();
/// assert_eq!(config.decoder.cache_policy, CachePolicy::ByPcAndWord);
/// assert!(config.decoder.trace);
/// assert_eq!(config.execution.overflow, OverflowPolicy::Trap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct IsaConfig {
    /// Decoder settings
    #[serde(default)]
    pub decoder: DecoderConfig,
    /// Execution settings
    #[serde(default)]
    pub execution: ExecutionConfig,
}

impl IsaConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// The `serde_json` error for malformed JSON or an unknown enum variant.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DecoderConfig {
    /// Decode-cache policy
    #[serde(default)]
    pub cache_policy: CachePolicy,

    /// Emit a `trace!` line with the disassembly of every executed instruction
    #[serde(default = "DecoderConfig::default_trace")]
    pub trace: bool,
}

impl DecoderConfig {
    /// Tracing follows the `always-trace` feature.
    const fn default_trace() -> bool {
        cfg!(feature = "always-trace") || defaults::TRACE
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            cache_policy: CachePolicy::default(),
            trace: Self::default_trace(),
        }
    }
}

/// Execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct ExecutionConfig {
    /// Signed-overflow handling
    #[serde(default)]
    pub overflow: OverflowPolicy,
}
