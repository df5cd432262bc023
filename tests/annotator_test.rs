use essay_corrector::annotator::{annotate, corrected_text, reconstitute};
use essay_corrector::{Category, Correction, Segment};

fn fix(original: &str, suggestion: &str) -> Correction {
    Correction::new(original, suggestion, "explanation", Category::Grammar)
}

/// 覆盖各种重叠、重复、找不到的组合
fn cases() -> Vec<(&'static str, Vec<Correction>)> {
    vec![
        ("", vec![]),
        ("", vec![fix("a", "b")]),
        ("Hello world", vec![]),
        ("Hello world", vec![fix("xyz", "abc")]),
        ("abcabc", vec![fix("abcabc", "X"), fix("bca", "Y")]),
        ("abcabc", vec![fix("bca", "Y"), fix("abcabc", "X")]),
        ("cat cat", vec![fix("cat", "feline")]),
        ("cat cat", vec![fix("cat", "feline"), fix("cat", "kitty")]),
        ("B A", vec![fix("A", "a"), fix("B", "b")]),
        ("their going to there house", vec![fix("their going", "they're going"), fix("going to", "heading to"), fix("there", "their")]),
        ("aaaa", vec![fix("aa", "b"), fix("a", "c"), fix("aaa", "d")]),
        ("Él dijo: ¡hola!", vec![fix("¡hola!", "hello!"), fix("Él", "He")]),
        ("x", vec![fix("", "empty"), fix("x", "y")]),
    ]
}

#[test]
fn test_reconstitution_holds_for_all_cases() {
    for (essay, corrections) in cases() {
        let segments = annotate(essay, &corrections);
        assert_eq!(reconstitute(&segments), essay, "essay: {:?}", essay);
    }
}

#[test]
fn test_spans_are_contiguous_and_non_overlapping() {
    for (essay, corrections) in cases() {
        let segments = annotate(essay, &corrections);
        let mut cursor = 0;
        for segment in &segments {
            let span = segment.span();
            assert_eq!(span.start, cursor, "essay: {:?}", essay);
            assert!(span.end >= span.start);
            assert_eq!(&essay[span.clone()], segment.original());
            cursor = span.end;
        }
        assert!(cursor == essay.len() || segments.is_empty() && essay.is_empty());
    }
}

#[test]
fn test_no_empty_segments_when_corrections_present() {
    for (essay, corrections) in cases() {
        if corrections.is_empty() {
            continue;
        }
        for segment in annotate(essay, &corrections) {
            if let Segment::PlainText { content, .. } = segment {
                assert!(!content.is_empty(), "essay: {:?}", essay);
            }
        }
    }
}

#[test]
fn test_deterministic() {
    for (essay, corrections) in cases() {
        assert_eq!(annotate(essay, &corrections), annotate(essay, &corrections));
    }
}

#[test]
fn test_empty_corrections_returns_essay_unchanged() {
    let segments = annotate("An essay about nothing.", &[]);
    assert_eq!(segments.len(), 1);
    assert!(matches!(
        segments[0],
        Segment::PlainText { content: "An essay about nothing.", .. }
    ));
}

#[test]
fn test_unmatched_correction_dropped() {
    let corrections = [fix("xyz", "abc")];
    let segments = annotate("Hello world", &corrections);

    assert_eq!(segments.len(), 1);
    assert!(matches!(segments[0], Segment::PlainText { content: "Hello world", .. }));
}

#[test]
fn test_overlap_dropped() {
    let corrections = [fix("abcabc", "whole"), fix("bca", "part")];
    let segments = annotate("abcabc", &corrections);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].correction(), Some(&corrections[0]));
    assert_eq!(segments[0].span(), 0..6);
}

#[test]
fn test_duplicate_text_first_wins() {
    let corrections = [fix("cat", "feline")];
    let segments = annotate("cat cat", &corrections);

    assert_eq!(segments.len(), 2);
    assert!(segments[0].is_highlight());
    assert_eq!(segments[0].span(), 0..3);
    assert_eq!(segments[1].display(), " cat");
    assert_eq!(corrected_text(&segments), "feline cat");
}

#[test]
fn test_same_text_in_two_corrections_highlights_once() {
    let corrections = [fix("cat", "feline"), fix("cat", "kitty")];
    let segments = annotate("cat cat", &corrections);

    let highlights: Vec<_> = segments.iter().filter(|s| s.is_highlight()).collect();
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].display(), "feline");
}

#[test]
fn test_ordering_follows_essay_position() {
    let corrections = [fix("A", "a"), fix("B", "b")];
    let segments = annotate("B A", &corrections);

    let displays: Vec<&str> = segments.iter().map(Segment::display).collect();
    assert_eq!(displays, vec!["b", " ", "a"]);
    assert_eq!(segments[0].correction(), Some(&corrections[1]));
    assert_eq!(segments[2].correction(), Some(&corrections[0]));
}

#[test]
fn test_highlight_carries_annotation_metadata() {
    let corrections = [Correction::new("wich", "which", "Spelling error", Category::Spelling)];
    let segments = annotate("The book wich I read.", &corrections);

    match &segments[1] {
        Segment::Highlight { correction, display_text, .. } => {
            assert_eq!(*display_text, "which");
            assert_eq!(correction.original_text, "wich");
            assert_eq!(correction.explanation, "Spelling error");
            assert_eq!(correction.category, Category::Spelling);
        }
        other => panic!("应为高亮片段: {:?}", other),
    }
}
