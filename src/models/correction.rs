//! 批改结果的数据模型
//!
//! 字段名与 AI 返回的 JSON 保持一致（camelCase，分类为大写枚举名）

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AppError, AppResult};

/// 修改建议的分类
///
/// 序列化为大写名称；反序列化经由 `FromStr`，不区分大小写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Category {
    Grammar,
    Spelling,
    Clarity,
    Style,
    Punctuation,
    Structure,
}

static CATEGORY_NAMES: phf::Map<&'static str, Category> = phf::phf_map! {
    "GRAMMAR" => Category::Grammar,
    "SPELLING" => Category::Spelling,
    "CLARITY" => Category::Clarity,
    "STYLE" => Category::Style,
    "PUNCTUATION" => Category::Punctuation,
    "STRUCTURE" => Category::Structure,
};

impl Category {
    /// 按声明顺序排列的全部分类
    pub const ALL: [Category; 6] = [
        Category::Grammar,
        Category::Spelling,
        Category::Clarity,
        Category::Style,
        Category::Punctuation,
        Category::Structure,
    ];

    /// 线上格式中的名称
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Grammar => "GRAMMAR",
            Category::Spelling => "SPELLING",
            Category::Clarity => "CLARITY",
            Category::Style => "STYLE",
            Category::Punctuation => "PUNCTUATION",
            Category::Structure => "STRUCTURE",
        }
    }

    /// 面向用户的小写名称
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Grammar => "grammar",
            Category::Spelling => "spelling",
            Category::Clarity => "clarity",
            Category::Style => "style",
            Category::Punctuation => "punctuation",
            Category::Structure => "structure",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    /// 不区分大小写
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORY_NAMES
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| AppError::oracle_response(format!("unknown category '{}'", s)))
    }
}

impl TryFrom<String> for Category {
    type Error = AppError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// AI 给出的一条修改建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Correction {
    /// 原文中需要修改的片段
    pub original_text: String,
    /// 修改后的文本
    pub suggestion: String,
    /// 修改理由
    pub explanation: String,
    pub category: Category,
}

impl Correction {
    pub fn new(
        original_text: impl Into<String>,
        suggestion: impl Into<String>,
        explanation: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            original_text: original_text.into(),
            suggestion: suggestion.into(),
            explanation: explanation.into(),
            category,
        }
    }
}

/// 各分类的得分（1 到 10），六个分类都必须给出
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Scores {
    #[serde(deserialize_with = "de_score")]
    pub grammar: u8,
    #[serde(deserialize_with = "de_score")]
    pub spelling: u8,
    #[serde(deserialize_with = "de_score")]
    pub clarity: u8,
    #[serde(deserialize_with = "de_score")]
    pub style: u8,
    #[serde(deserialize_with = "de_score")]
    pub punctuation: u8,
    #[serde(deserialize_with = "de_score")]
    pub structure: u8,
}

/// 模型偶尔会返回 7.0 这样的浮点数，四舍五入成整数
fn de_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u8::MAX) {
        return Err(serde::de::Error::custom(format!("score {} out of range", value)));
    }
    Ok(value.round() as u8)
}

impl Scores {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Grammar => self.grammar,
            Category::Spelling => self.spelling,
            Category::Clarity => self.clarity,
            Category::Style => self.style,
            Category::Punctuation => self.punctuation,
            Category::Structure => self.structure,
        }
    }

    /// 检查所有分数都在 1..=10 之内
    pub fn validate(&self) -> AppResult<()> {
        for category in Category::ALL {
            let score = self.get(category);
            if !(Self::MIN..=Self::MAX).contains(&score) {
                return Err(AppError::oracle_response(format!(
                    "score for {} is {}, expected {}..={}",
                    category,
                    score,
                    Self::MIN,
                    Self::MAX
                )));
            }
        }
        Ok(())
    }

    pub fn total(&self) -> u32 {
        Category::ALL.iter().map(|&c| u32::from(self.get(c))).sum()
    }

    pub fn max_total() -> u32 {
        Category::ALL.len() as u32 * u32::from(Self::MAX)
    }
}

/// 一次批改的完整结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResponse {
    /// 一两句鼓励性质的总结
    pub summary: String,
    pub corrections: Vec<Correction>,
    pub scores: Scores,
}

impl CorrectionResponse {
    /// 解析并校验 AI 返回的 JSON 文本
    ///
    /// 允许外层包裹 Markdown 代码块；缺少必需字段、总结为空或分数越界都视为格式错误
    pub fn parse(raw: &str) -> AppResult<Self> {
        let json = strip_code_fence(raw);
        let response: CorrectionResponse = serde_json::from_str(json)?;

        if response.summary.trim().is_empty() {
            return Err(AppError::oracle_response("summary is empty"));
        }
        response.scores.validate()?;

        Ok(response)
    }
}

/// 去掉 ```json ... ``` 外壳
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    // 固定的模式，编译不会失败
    let Ok(fence) = Regex::new(r"(?s)\A```[A-Za-z]*\s*\n(.*?)\n?```\z") else {
        return trimmed;
    };
    match fence.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str(),
        None => trimmed,
    }
}
