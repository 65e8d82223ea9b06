//! Property tests for ANSI-safe slicing.

use core_render::ansi::{safe_slice, strip_ansi, visible_width};
use proptest::prelude::*;

fn styled() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zé ]{1,4}",
            Just("\u{1b}[31m".to_string()),
            Just("\u{1b}[0m".to_string()),
            Just("\u{1b}[38;5;205m".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn slice_matches_plain_char_window(s in styled(), start in 0usize..20, len in 0usize..20) {
        let end = start + len;
        let plain: String = strip_ansi(&s).chars().skip(start).take(len).collect();
        prop_assert_eq!(strip_ansi(&safe_slice(&s, start, end)), plain);
    }

    #[test]
    fn slices_partition_the_string(s in styled(), cut in 0usize..30) {
        let w = visible_width(&s);
        let left = safe_slice(&s, 0, cut);
        let right = safe_slice(&s, cut, w);
        prop_assert_eq!(visible_width(&left) + visible_width(&right), w);
        prop_assert_eq!(strip_ansi(&format!("{left}{right}")), strip_ansi(&s));
    }

    #[test]
    fn width_equals_stripped_char_count(s in styled()) {
        prop_assert_eq!(visible_width(&s), strip_ansi(&s).chars().count());
    }
}
