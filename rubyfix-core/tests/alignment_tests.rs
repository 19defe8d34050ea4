//! Integration tests for ruby re-alignment
//!
//! Scenario tests go through the public API; the property tests check the
//! coverage and reading-distribution guarantees over arbitrary mixes of
//! hiragana, katakana and kanji.

use proptest::prelude::*;
use rubyfix_core::{align, realign, segment, AlignError, RubySegment, TextCategory};

#[test]
fn test_simple_trailing_hiragana() {
    let segments = segment("読んで");
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].category, TextCategory::Other);
    assert_eq!(segments[1].category, TextCategory::Hiragana);

    let result = align(&segments, "よんで").unwrap();
    assert_eq!(
        result,
        vec![
            RubySegment::new("読", TextCategory::Other, "よ"),
            RubySegment::new("んで", TextCategory::Hiragana, "んで"),
        ]
    );
}

#[test]
fn test_ambiguous_anchor_forces_merge() {
    // "し" occurs twice in the reading and cannot be used as a cut point
    let result = realign("子し子し", "こしこし").unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0], RubySegment::new("子し子", TextCategory::Other, "こしこ"));
    assert_eq!(result[1], RubySegment::anchor("し"));

    let result = realign("子子し子", "ここしこし").unwrap();
    assert_eq!(
        result,
        vec![RubySegment::new("子子し子", TextCategory::Other, "ここしこし")]
    );
}

#[test]
fn test_leading_hiragana_mismatch() {
    // an edited reading that no longer starts with the leading kana
    let result = realign("お茶を飲む", "おちゃをのむ").unwrap();
    assert_eq!(result[0], RubySegment::anchor("お"));

    let result = realign("お茶を飲む", "ごちゃをのむ").unwrap();
    assert_eq!(
        result,
        vec![
            RubySegment::new("お茶", TextCategory::Other, "ごちゃ"),
            RubySegment::anchor("を"),
            RubySegment::new("飲", TextCategory::Other, "の"),
            RubySegment::anchor("む"),
        ]
    );
}

#[test]
fn test_empty_reading_assigns_empty_readings() {
    for base in ["読んで", "お茶を飲む", "東京へ行く"] {
        let result = realign(base, "").unwrap();
        assert!(result.iter().all(|s| s.reading.is_empty()), "{base}");
        let joined: String = result.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, base);
    }
}

#[test]
fn test_single_segment_is_left_alone() {
    assert_eq!(
        realign("東京", "とうきょう").unwrap_err(),
        AlignError::NotSplittable { segments: 1 }
    );
    assert_eq!(
        realign("ひらがな", "ひらがな").unwrap_err(),
        AlignError::NotSplittable { segments: 1 }
    );
}

#[test]
fn test_long_lyric_line() {
    let result = realign("君の名前を呼んだ", "きみのなまえをよんだ").unwrap();
    assert_eq!(
        result,
        vec![
            RubySegment::new("君", TextCategory::Other, "きみ"),
            RubySegment::anchor("の"),
            RubySegment::new("名前", TextCategory::Other, "なまえ"),
            RubySegment::anchor("を"),
            RubySegment::new("呼", TextCategory::Other, "よ"),
            RubySegment::anchor("んだ"),
        ]
    );
}

fn japanese_text(max_len: usize) -> impl Strategy<Value = String> {
    let alphabet = vec![
        'あ', 'い', 'し', 'ん', 'で', 'の', 'を', '読', '子', '東', '京', 'カ', 'ナ', 'ー',
    ];
    proptest::collection::vec(proptest::sample::select(alphabet), 0..max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn prop_texts_cover_base(base in japanese_text(12), reading in japanese_text(16)) {
        let segments = segment(&base);
        prop_assume!(segments.len() >= 2);

        let result = align(&segments, &reading).unwrap();
        let joined: String = result.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(joined, base);
        prop_assert!(result.iter().all(|s| !s.text.is_empty()));
    }

    #[test]
    fn prop_readings_distribute_whole_reading(
        base in japanese_text(12),
        reading in japanese_text(16),
    ) {
        let segments = segment(&base);
        prop_assume!(segments.len() >= 2);

        let result = align(&segments, &reading).unwrap();
        let joined: String = result.iter().map(|s| s.reading.as_str()).collect();
        prop_assert_eq!(joined, reading);
    }

    #[test]
    fn prop_anchors_read_as_written(base in japanese_text(12), reading in japanese_text(16)) {
        let segments = segment(&base);
        prop_assume!(segments.len() >= 2);

        for ruby in align(&segments, &reading).unwrap() {
            if ruby.category == TextCategory::Hiragana {
                prop_assert_eq!(&ruby.reading, &ruby.text);
            } else {
                prop_assert_eq!(ruby.category, TextCategory::Other);
            }
        }
    }

    #[test]
    fn prop_identity_reading_maps_onto_itself(base in japanese_text(12)) {
        // a reading equal to the base text must come back segment by segment
        let segments = segment(&base);
        prop_assume!(segments.len() >= 2);

        for ruby in align(&segments, &base).unwrap() {
            prop_assert_eq!(&ruby.reading, &ruby.text);
        }
    }
}
