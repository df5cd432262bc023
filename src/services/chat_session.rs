//! 追问会话 - 业务能力层
//!
//! 每次批改成功后创建一个会话，之后针对该作文的追问都复用它，直到提交新的作文

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::{ChatMessage, CorrectionResponse};
use crate::services::LlmService;

/// 与某篇作文绑定的追问会话
///
/// 会话由批改操作返回，调用方显式持有并传入后续的聊天调用
#[derive(Clone)]
pub struct ChatSession {
    llm: LlmService,
    system_instruction: String,
    /// 发送给模型的上下文（只包含成功的轮次）
    turns: Vec<ChatMessage>,
}

impl ChatSession {
    /// 以作文和批改结果为种子创建会话
    pub fn new(llm: LlmService, essay: &str, response: &CorrectionResponse) -> Self {
        Self {
            llm,
            system_instruction: build_system_instruction(essay, response),
            turns: Vec::new(),
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    /// 发送一条追问并返回回复
    ///
    /// 调用失败时会话上下文保持不变
    pub async fn send(&mut self, message: &str) -> AppResult<String> {
        debug!("发送追问，已有 {} 条上下文", self.turns.len());

        let reply = self
            .llm
            .send_to_llm(Some(&self.system_instruction), &self.turns, message, None)
            .await
            .map_err(|e| e.in_context("Failed to get chat response from AI"))?;

        if reply.is_empty() {
            return Err(AppError::oracle_response("chat reply is empty"));
        }

        self.record(message, &reply);
        info!("💬 收到回复 ({} 字符)", reply.chars().count());
        Ok(reply)
    }

    fn record(&mut self, message: &str, reply: &str) {
        self.turns.push(ChatMessage::user(message));
        self.turns.push(ChatMessage::model(reply));
    }
}

/// 构建追问会话的系统指令
fn build_system_instruction(essay: &str, response: &CorrectionResponse) -> String {
    let corrections_json = serde_json::to_string_pretty(response).unwrap_or_default();

    format!(
        r#"You are an expert English teacher AI assistant. The user has submitted an essay and received corrections.
The original essay was:
---
{}
---

The corrections provided were:
---
{}
---

Your role is to answer follow-up questions from the user about their essay, the corrections, or general English writing advice. Be helpful, encouraging, and provide clear explanations. Keep your answers concise."#,
        essay, corrections_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Category, Correction, Scores};

    fn response() -> CorrectionResponse {
        CorrectionResponse {
            summary: "Nice work.".to_string(),
            corrections: vec![Correction::new(
                "alot",
                "a lot",
                "Spelling error",
                Category::Spelling,
            )],
            scores: Scores {
                grammar: 8,
                spelling: 6,
                clarity: 8,
                style: 7,
                punctuation: 9,
                structure: 8,
            },
        }
    }

    fn session() -> ChatSession {
        let config = Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        };
        ChatSession::new(LlmService::new(&config), "I like it alot.", &response())
    }

    #[test]
    fn test_system_instruction_contains_essay_and_corrections() {
        let session = session();
        let instruction = session.system_instruction();

        assert!(instruction.contains("---\nI like it alot.\n---"));
        assert!(instruction.contains("\"originalText\": \"alot\""));
        assert!(instruction.contains("\"SPELLING\": 6"));
    }

    #[test]
    fn test_record_appends_user_then_model() {
        let mut session = session();
        assert!(session.turns().is_empty());

        session.record("Why?", "Because it is two words.");

        assert_eq!(
            session.turns(),
            &[
                ChatMessage::user("Why?"),
                ChatMessage::model("Because it is two words."),
            ]
        );
    }
}
