use crate::models::Category;

/// 分类的展示样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    /// 终端颜色（SGR 参数）
    pub ansi: &'static str,
    pub icon: &'static str,
    pub label: &'static str,
    /// 在得分卡中的排列顺序
    pub order: u8,
}

impl Category {
    pub fn style(self) -> CategoryStyle {
        match self {
            Category::Grammar => CategoryStyle {
                ansi: "34",
                icon: "📘",
                label: "Grammar",
                order: 2,
            },
            Category::Spelling => CategoryStyle {
                ansi: "31",
                icon: "🔤",
                label: "Spelling",
                order: 4,
            },
            Category::Clarity => CategoryStyle {
                ansi: "32",
                icon: "💡",
                label: "Clarity",
                order: 1,
            },
            Category::Style => CategoryStyle {
                ansi: "35",
                icon: "🎨",
                label: "Style",
                order: 6,
            },
            Category::Punctuation => CategoryStyle {
                ansi: "33",
                icon: "❗",
                label: "Punctuation",
                order: 3,
            },
            Category::Structure => CategoryStyle {
                ansi: "94",
                icon: "🏗",
                label: "Structure",
                order: 5,
            },
        }
    }
}

/// 用 SGR 颜色包裹文本
pub fn paint(text: &str, sgr: &str) -> String {
    format!("\x1b[{}m{}\x1b[0m", sgr, text)
}

/// 按得分卡顺序排列的分类
pub fn display_order() -> [Category; 6] {
    let mut categories = Category::ALL;
    categories.sort_by_key(|c| c.style().order);
    categories
}
