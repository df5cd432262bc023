//! 作文批改服务 - 业务能力层
//!
//! 只负责"把一篇作文交给 AI 批改"这一能力：校验输入、构建提示词、解析并校验返回结果

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::CorrectionResponse;
use crate::services::{ChatSession, LlmService};
use crate::utils::logging::truncate_text;

const SYSTEM_MESSAGE: &str = "You are an expert English teacher and essay corrector. \
Your goal is to provide constructive feedback on the user's essay. \
Analyze the essay for grammar, spelling, clarity, style, punctuation, and overall structure. \
Provide specific suggestions for improvement and a score from 1 to 10 for each category in the requested JSON format. \
Be thorough and find all potential issues.";

/// 返回格式说明，拼接在系统指令之后
const RESPONSE_FORMAT: &str = r#"Respond with a single JSON object and nothing else, using exactly this shape:
{
  "summary": "A brief, encouraging, one or two-sentence summary of the overall feedback.",
  "scores": {
    "GRAMMAR": <integer 1-10>,
    "SPELLING": <integer 1-10>,
    "CLARITY": <integer 1-10>,
    "STYLE": <integer 1-10>,
    "PUNCTUATION": <integer 1-10>,
    "STRUCTURE": <integer 1-10>
  },
  "corrections": [
    {
      "originalText": "The exact phrase or sentence from the original essay that needs correction, copied verbatim.",
      "suggestion": "The corrected or improved version of the text.",
      "explanation": "A concise explanation of why the change is recommended (e.g., 'Incorrect verb tense', 'Spelling error').",
      "category": "one of GRAMMAR, SPELLING, CLARITY, STYLE, PUNCTUATION, STRUCTURE"
    }
  ]
}
All six scores and all four fields of every correction are required."#;

/// 批改失败时所有错误信息的前缀
const CORRECTION_FAILURE: &str = "Failed to get corrections from AI";

/// 作文批改服务
pub struct CorrectionService {
    llm: LlmService,
}

impl CorrectionService {
    /// 创建批改服务，要求已配置 API 密钥
    pub fn new(config: &Config) -> AppResult<Self> {
        config.require_api_key()?;
        Ok(Self::with_llm(LlmService::new(config)))
    }

    pub fn with_llm(llm: LlmService) -> Self {
        Self { llm }
    }

    pub fn llm(&self) -> &LlmService {
        &self.llm
    }

    /// 批改作文
    ///
    /// 成功时同时返回为这篇作文创建的追问会话
    pub async fn correct_essay(&self, essay: &str) -> AppResult<(CorrectionResponse, ChatSession)> {
        validate_essay(essay)?;

        info!(
            "📝 提交批改: {} (模型: {})",
            truncate_text(essay.trim(), 60),
            self.llm.model_name()
        );

        let system_message = format!("{}\n\n{}", SYSTEM_MESSAGE, RESPONSE_FORMAT);
        let user_message = build_user_message(essay);

        let raw = self
            .llm
            .send_to_llm(Some(&system_message), &[], &user_message, None)
            .await
            .map_err(|e| e.in_context(CORRECTION_FAILURE))?;

        debug!("批改结果原文长度: {} 字符", raw.len());

        let response = parse_corrections(&raw)?;

        info!(
            "✓ 批改完成: {} 条修改建议，总分 {}",
            response.corrections.len(),
            response.scores.total()
        );

        let session = ChatSession::new(self.llm.clone(), essay, &response);
        Ok((response, session))
    }
}

/// 空白作文在调用 AI 之前就被拒绝
pub fn validate_essay(essay: &str) -> AppResult<()> {
    if essay.trim().is_empty() {
        return Err(AppError::validation("Essay text cannot be empty."));
    }
    Ok(())
}

fn parse_corrections(raw: &str) -> AppResult<CorrectionResponse> {
    CorrectionResponse::parse(raw).map_err(|e| {
        warn!("⚠️ 批改结果格式不正确: {}", e);
        e.in_context(CORRECTION_FAILURE)
    })
}

fn build_user_message(essay: &str) -> String {
    format!(
        "Please correct the following essay and provide feedback: \n\n---\n\n{}",
        essay
    )
}
