use std::fmt::Write;

use crate::models::Scores;

use super::style::{display_order, paint};

const BAR_WIDTH: usize = 20;

/// 分数对应的颜色档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Green,
    Yellow,
    Red,
}

impl ScoreColor {
    pub fn for_score(score: u8) -> Self {
        if score >= 8 {
            ScoreColor::Green
        } else if score >= 5 {
            ScoreColor::Yellow
        } else {
            ScoreColor::Red
        }
    }

    fn sgr(self) -> &'static str {
        match self {
            ScoreColor::Green => "32",
            ScoreColor::Yellow => "33",
            ScoreColor::Red => "31",
        }
    }
}

/// 进度条宽度（百分比）
pub fn bar_percent(score: u8) -> u32 {
    u32::from(score.min(Scores::MAX)) * 10
}

fn bar(score: u8) -> String {
    let filled = bar_percent(score) as usize * BAR_WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// 渲染得分卡
pub fn render_score_card(scores: &Scores, color: bool) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Overall Score: {} / {}", scores.total(), Scores::max_total());
    for category in display_order() {
        let score = scores.get(category);
        let style = category.style();
        let bar = bar(score);
        let bar = if color {
            paint(&bar, ScoreColor::for_score(score).sgr())
        } else {
            bar
        };
        let _ = writeln!(
            out,
            "  {} {:<12} {} {:>2} / 10",
            style.icon, style.label, bar, score
        );
    }

    out
}
