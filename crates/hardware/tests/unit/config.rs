//! Configuration Defaults and JSON.

use mipsim_core::IsaConfig;
use mipsim_core::config::{CachePolicy, DecoderConfig, OverflowPolicy};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn defaults_match_reference_behaviour() {
    let config = IsaConfig::default();
    assert_eq!(config.decoder.cache_policy, CachePolicy::ByPc);
    assert_eq!(config.execution.overflow, OverflowPolicy::Approximate);
    assert_eq!(config.decoder.trace, cfg!(feature = "always-trace"));
}

#[test]
fn empty_object_is_default() {
    assert_eq!(IsaConfig::from_json("{}").unwrap(), IsaConfig::default());
}

#[test]
fn partial_sections_fill_in_defaults() {
    let config = IsaConfig::from_json(r#"{ "decoder": { "trace": true } }"#).unwrap();
    assert_eq!(
        config.decoder,
        DecoderConfig {
            cache_policy: CachePolicy::ByPc,
            trace: true
        }
    );
    assert_eq!(config.execution.overflow, OverflowPolicy::Approximate);
}

#[rstest]
#[case::by_pc("ByPc", CachePolicy::ByPc)]
#[case::pc_alias("PC", CachePolicy::ByPc)]
#[case::by_pc_and_word("ByPcAndWord", CachePolicy::ByPcAndWord)]
#[case::pc_and_word_alias("PcAndWord", CachePolicy::ByPcAndWord)]
#[case::disabled("Disabled", CachePolicy::Disabled)]
#[case::none_alias("None", CachePolicy::Disabled)]
fn cache_policy_names(#[case] name: &str, #[case] expected: CachePolicy) {
    let json = format!(r#"{{ "decoder": {{ "cache_policy": "{name}" }} }}"#);
    assert_eq!(IsaConfig::from_json(&json).unwrap().decoder.cache_policy, expected);
}

#[rstest]
#[case::approximate("Approximate", OverflowPolicy::Approximate)]
#[case::wrap_alias("Wrap", OverflowPolicy::Approximate)]
#[case::trap("Trap", OverflowPolicy::Trap)]
fn overflow_policy_names(#[case] name: &str, #[case] expected: OverflowPolicy) {
    let json = format!(r#"{{ "execution": {{ "overflow": "{name}" }} }}"#);
    assert_eq!(IsaConfig::from_json(&json).unwrap().execution.overflow, expected);
}

#[rstest]
#[case::unknown_variant(r#"{ "decoder": { "cache_policy": "Lru" } }"#)]
#[case::wrong_type(r#"{ "decoder": { "trace": "yes" } }"#)]
#[case::malformed("{ decoder")]
fn invalid_json_is_rejected(#[case] json: &str) {
    assert!(IsaConfig::from_json(json).is_err());
}
