//! Budget and truncation-order properties of `fit_keywords`.

use indexmap::IndexMap;
use metasync_core::{fit_keywords, KEYWORD_BUDGET};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn phrases(n: usize, width: usize) -> IndexMap<String, String> {
    (0..n)
        .map(|i| {
            let phrase = format!("{i:0width$}");
            (format!("KEY_{i}"), phrase)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Budget invariant
// ---------------------------------------------------------------------------

#[rstest]
#[case::empty(0, 5)]
#[case::small(3, 5)]
#[case::exact(10, 9)]
#[case::one_over(17, 5)]
#[case::many(30, 5)]
#[case::wide(4, 40)]
#[case::huge_single(1, 250)]
fn output_never_exceeds_budget(#[case] n: usize, #[case] width: usize) {
    let input = phrases(n, width);
    let fit = fit_keywords(&input);
    assert!(fit.len() <= KEYWORD_BUDGET, "got {} chars", fit.len());

    let full: Vec<&str> = input.values().map(String::as_str).collect();
    let full = full.join(",");
    assert_eq!(fit.original_len, full.chars().count());
    if fit.original_len <= KEYWORD_BUDGET {
        assert_eq!(fit.keywords, full);
        assert!(fit.dropped.is_empty());
    }
}

// ---------------------------------------------------------------------------
// 2. Tail-first truncation
// ---------------------------------------------------------------------------

#[test]
fn thirty_five_char_phrases_keep_longest_prefix() {
    let input = phrases(30, 5);
    let fit = fit_keywords(&input);

    // 30 * 5 + 29 separators.
    assert_eq!(fit.original_len, 179);
    // 16 phrases take 16 * 5 + 15 = 95 chars; a 17th would need 101.
    let kept: Vec<&str> = fit.keywords.split(',').collect();
    assert_eq!(kept.len(), 16);
    assert_eq!(fit.len(), 95);
    assert_eq!(kept, input.values().take(16).map(String::as_str).collect::<Vec<_>>());

    let dropped_keys: Vec<&str> = fit.dropped.iter().map(|d| d.key.as_str()).collect();
    let expected: Vec<String> = (16..30).map(|i| format!("KEY_{i}")).collect();
    assert_eq!(dropped_keys, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn dropped_entries_are_a_contiguous_suffix() {
    let mut input = IndexMap::new();
    input.insert("a".to_string(), "a".repeat(40));
    input.insert("b".to_string(), "b".repeat(40));
    input.insert("c".to_string(), "c".repeat(2));
    input.insert("d".to_string(), "d".repeat(40));

    let fit = fit_keywords(&input);
    let keys: Vec<&str> = fit.dropped.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys, vec!["d"]);
    assert_eq!(fit.keywords.split(',').count(), 3);
}

#[test]
fn report_formats_phrase_then_key() {
    let mut input = IndexMap::new();
    input.insert("APP_KW_1".to_string(), "x".repeat(99));
    input.insert("APP_KW_2".to_string(), "photo".to_string());

    let fit = fit_keywords(&input);
    assert_eq!(fit.dropped_summary(), "photo (APP_KW_2)");
}
