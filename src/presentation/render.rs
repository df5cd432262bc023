use std::fmt::Write;

use crate::models::{Correction, Segment};

use super::style::paint;

/// 渲染选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// 是否输出终端颜色
    pub color: bool,
    /// 是否在高亮后附加 [n] 编号，并在文末列出修改说明
    pub footnotes: bool,
}

/// 把标注片段渲染成文本
///
/// 原文片段原样输出，高亮片段输出修改建议
pub fn render_segments(segments: &[Segment<'_>], options: &RenderOptions) -> String {
    let mut body = String::new();
    let mut notes = String::new();
    let mut note_index = 0;

    for segment in segments {
        match segment {
            Segment::PlainText { content, .. } => body.push_str(content),
            Segment::Highlight {
                correction,
                display_text,
                ..
            } => {
                if options.color {
                    body.push_str(&paint(display_text, &format!("4;{}", correction.category.style().ansi)));
                } else {
                    body.push_str(display_text);
                }

                if options.footnotes {
                    note_index += 1;
                    let _ = write!(body, "[{}]", note_index);
                    let _ = writeln!(notes, "{}", describe(note_index, correction));
                }
            }
        }
    }

    if notes.is_empty() {
        body
    } else {
        format!("{}\n\n{}", body, notes.trim_end())
    }
}

/// 一条修改的说明：分类、原文、修改建议与理由
fn describe(index: usize, correction: &Correction) -> String {
    format!(
        "[{}] {}: \"{}\" -> \"{}\" ({})",
        index,
        correction.category.display_name(),
        correction.original_text,
        correction.suggestion,
        correction.explanation
    )
}

/// 没有在原文中生成高亮的修改建议
///
/// 包括原文找不到的、与前面的高亮重叠的、以及重复的建议
pub fn unmatched_corrections<'a>(
    segments: &[Segment<'_>],
    corrections: &'a [Correction],
) -> Vec<&'a Correction> {
    corrections
        .iter()
        .filter(|correction| {
            !segments
                .iter()
                .filter_map(Segment::correction)
                .any(|shown| std::ptr::eq(shown, *correction))
        })
        .collect()
}

/// 渲染未能高亮的修改建议列表
pub fn render_unmatched(corrections: &[&Correction]) -> String {
    corrections
        .iter()
        .enumerate()
        .map(|(i, correction)| describe(i + 1, correction))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::annotate;
    use crate::models::Category;

    fn corrections() -> Vec<Correction> {
        vec![
            Correction::new("recieve", "receive", "Spelling error", Category::Spelling),
            Correction::new("missing", "absent", "Word choice", Category::Style),
        ]
    }

    #[test]
    fn test_render_plain_with_footnotes() {
        let corrections = corrections();
        let segments = annotate("I recieve mail.", &corrections);
        let options = RenderOptions {
            color: false,
            footnotes: true,
        };

        let rendered = render_segments(&segments, &options);
        assert_eq!(
            rendered,
            "I receive[1] mail.\n\n[1] spelling: \"recieve\" -> \"receive\" (Spelling error)"
        );
    }

    #[test]
    fn test_render_colored() {
        let corrections = corrections();
        let segments = annotate("I recieve mail.", &corrections);
        let rendered = render_segments(
            &segments,
            &RenderOptions {
                color: true,
                footnotes: false,
            },
        );
        assert_eq!(rendered, "I \x1b[4;31mreceive\x1b[0m mail.");
    }

    #[test]
    fn test_unmatched_corrections() {
        let corrections = corrections();
        let segments = annotate("I recieve mail.", &corrections);

        let unmatched = unmatched_corrections(&segments, &corrections);
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].original_text, "missing");
        assert_eq!(
            render_unmatched(&unmatched),
            "[1] style: \"missing\" -> \"absent\" (Word choice)"
        );
    }

    #[test]
    fn test_identical_duplicate_is_unmatched() {
        let corrections = vec![
            Correction::new("cat", "feline", "x", Category::Style),
            Correction::new("cat", "feline", "x", Category::Style),
        ];
        let segments = annotate("cat cat", &corrections);
        let unmatched = unmatched_corrections(&segments, &corrections);
        assert_eq!(unmatched.len(), 1);
        assert!(std::ptr::eq(unmatched[0], &corrections[1]));
    }
}
