//! 作文标注 - 核心算法
//!
//! 把原文和 AI 给出的修改建议对齐，生成"原文 / 高亮修改"交替的片段序列。
//!
//! 规则：
//! 1. 没有修改建议时，整篇原文作为一个片段返回
//! 2. 每条建议只在原文中查找第一次出现的位置（精确匹配、区分大小写），找不到或原文为空的建议直接丢弃
//! 3. 按出现位置稳定排序，位置相同时列表中靠前的优先
//! 4. 起点落在已消耗区域内的建议整条跳过，高亮之间不会重叠
//!
//! 把每个高亮片段还原成它对应的原文后，所有片段拼起来恰好等于原文。

use crate::models::{Correction, Segment};

/// 生成标注片段
///
/// 纯函数，不会失败；长度为零的原文片段不会出现在结果里
pub fn annotate<'a>(essay: &'a str, corrections: &'a [Correction]) -> Vec<Segment<'a>> {
    if corrections.is_empty() {
        return vec![Segment::plain(essay, 0..essay.len())];
    }

    let mut located: Vec<(usize, &Correction)> = corrections
        .iter()
        .filter_map(|correction| locate(essay, &correction.original_text).map(|start| (start, correction)))
        .collect();
    // sort_by_key 是稳定排序
    located.sort_by_key(|&(start, _)| start);

    let mut segments = Vec::with_capacity(located.len() * 2 + 1);
    let mut last_index = 0;

    for (start, correction) in located {
        if start < last_index {
            continue;
        }
        if start > last_index {
            segments.push(Segment::plain(essay, last_index..start));
        }
        segments.push(Segment::highlight(correction, start));
        last_index = start + correction.original_text.len();
    }

    if last_index < essay.len() {
        segments.push(Segment::plain(essay, last_index..essay.len()));
    }

    segments
}

/// 第一次出现的字节位置；空字符串视为找不到
fn locate(essay: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    essay.find(needle)
}

/// 把片段还原成原文
pub fn reconstitute(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::original).collect()
}

/// 把片段拼成修改后的文本（高亮处替换为修改建议）
pub fn corrected_text(segments: &[Segment<'_>]) -> String {
    segments.iter().map(Segment::display).collect()
}
