//! 展示层
//!
//! 把批改结果转换成终端可读的文本，不做任何 I/O

pub mod render;
pub mod score_card;
pub mod style;

pub use render::{render_segments, unmatched_corrections, RenderOptions};
pub use score_card::{render_score_card, ScoreColor};
pub use style::CategoryStyle;
