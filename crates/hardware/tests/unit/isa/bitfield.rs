//! Bit Field Extraction Properties.
//!
//! Every catalogued field must extract exactly `(word >> lo) & mask(width)`,
//! and insertion must round-trip through extraction.

use mipsim_core::isa::bitfield::{ALL, BitField, by_name, sign_extend};
use mipsim_core::isa::word::MachineWord;
use proptest::prelude::*;

/// Reference extraction with the mask computed in 64 bits.
fn reference(word: u32, hi: u32, lo: u32) -> u32 {
    let width = hi - lo + 1;
    ((u64::from(word) >> lo) & ((1u64 << width) - 1)) as u32
}

proptest! {
    #[test]
    fn catalog_fields_extract_their_range(word in any::<u32>()) {
        for field in ALL {
            prop_assert_eq!(
                field.extract(word),
                reference(word, field.hi(), field.lo()),
                "field {}", field.name()
            );
            prop_assert_eq!(MachineWord::new(word).get(*field), field.extract(word));
        }
    }

    #[test]
    fn arbitrary_ranges_extract(word in any::<u32>(), lo in 0u32..32, span in 0u32..32) {
        let hi = (lo + span).min(31);
        let field = BitField::new("ANY", hi, lo);
        prop_assert_eq!(field.extract(word), reference(word, hi, lo));
        prop_assert_eq!(field.width(), hi - lo + 1);
    }

    #[test]
    fn insert_then_extract(word in any::<u32>(), value in any::<u32>()) {
        for field in ALL {
            let updated = field.insert(word, value);
            prop_assert_eq!(field.extract(updated), value & field.mask());
            // Bits outside the field are untouched.
            let outside = !(field.mask() << field.lo());
            prop_assert_eq!(updated & outside, word & outside);
        }
    }

    #[test]
    fn sign_extend_16_matches_cast(value in any::<u16>()) {
        prop_assert_eq!(sign_extend(u32::from(value), 16), i32::from(value as i16));
    }
}

#[test]
fn catalog_lookup_by_name() {
    let rs = by_name("RS").unwrap();
    assert_eq!((rs.hi(), rs.lo()), (25, 21));
    let cc = by_name("BRANCH_CC").unwrap();
    assert_eq!((cc.hi(), cc.lo()), (20, 18));
    assert!(by_name("NOPE").is_none());
}
