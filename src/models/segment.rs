use std::ops::Range;

use super::correction::Correction;

/// 标注结果中的一段
///
/// 借用原文与修改建议，不做任何拷贝；`span` 是该段在原文中的字节区间
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 未修改的原文
    PlainText { content: &'a str, span: Range<usize> },
    /// 高亮显示的修改，显示的是修改建议
    Highlight {
        correction: &'a Correction,
        display_text: &'a str,
        span: Range<usize>,
    },
}

impl<'a> Segment<'a> {
    pub(crate) fn plain(essay: &'a str, span: Range<usize>) -> Self {
        Segment::PlainText {
            content: &essay[span.clone()],
            span,
        }
    }

    pub(crate) fn highlight(correction: &'a Correction, start: usize) -> Self {
        Segment::Highlight {
            correction,
            display_text: &correction.suggestion,
            span: start..start + correction.original_text.len(),
        }
    }

    /// 在原文中对应的字节区间
    pub fn span(&self) -> Range<usize> {
        match self {
            Segment::PlainText { span, .. } | Segment::Highlight { span, .. } => span.clone(),
        }
    }

    /// 该段对应的原文
    pub fn original(&self) -> &'a str {
        match *self {
            Segment::PlainText { content, .. } => content,
            Segment::Highlight { correction, .. } => &correction.original_text,
        }
    }

    /// 该段显示出来的文本
    pub fn display(&self) -> &'a str {
        match *self {
            Segment::PlainText { content, .. } => content,
            Segment::Highlight { display_text, .. } => display_text,
        }
    }

    pub fn correction(&self) -> Option<&'a Correction> {
        match *self {
            Segment::PlainText { .. } => None,
            Segment::Highlight { correction, .. } => Some(correction),
        }
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self, Segment::Highlight { .. })
    }
}
