//! 作文批改的界面状态 - 流程层
//!
//! 核心职责：维护"当前作文 / 批改结果 / 追问会话 / 聊天记录 / 加载状态"，
//! 并保证过期的批改结果不会覆盖最新一次提交的状态。
//!
//! 流程：
//! 1. `begin_submission` → 调用方发起批改 → `complete_submission`
//! 2. `begin_chat` → 调用方发送追问 → `complete_chat`
//!
//! 本层不发起任何网络请求，只做状态转换

use tracing::{debug, info, warn};

use crate::annotator::annotate;
use crate::error::{AppError, AppResult};
use crate::models::{ChatMessage, CorrectionResponse, Segment};
use crate::services::ChatSession;

const GREETING_WITH_CORRECTIONS: &str =
    "Hello! I've reviewed your essay. Feel free to ask me any questions about the feedback.";
const GREETING_NO_CORRECTIONS: &str =
    "Excellent work on your essay! I couldn't find any specific issues. Do you have any other writing questions?";

/// 一次批改请求的凭证
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// 提交批改结果后的处理情况
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 结果已应用
    Applied,
    /// 已有更新的提交，结果被丢弃
    Stale,
}

/// 界面状态
#[derive(Default)]
pub struct EssayState {
    essay_text: String,
    result: Option<CorrectionResponse>,
    session: Option<ChatSession>,
    chat_history: Vec<ChatMessage>,
    is_loading: bool,
    is_chat_loading: bool,
    error: Option<String>,
    /// 最近一次发出的批改请求编号，单调递增
    latest_request: u64,
}

impl EssayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn essay_text(&self) -> &str {
        &self.essay_text
    }

    pub fn result(&self) -> Option<&CorrectionResponse> {
        self.result.as_ref()
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_chat_loading(&self) -> bool {
        self.is_chat_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// 开始一次新的批改
    ///
    /// 清空上一次的结果、错误、会话和聊天记录
    pub fn begin_submission(&mut self, text: impl Into<String>) -> RequestTicket {
        self.latest_request += 1;
        self.is_loading = true;
        self.error = None;
        self.result = None;
        self.session = None;
        self.chat_history.clear();
        self.essay_text = text.into();

        debug!("开始批改请求 #{}", self.latest_request);
        RequestTicket(self.latest_request)
    }

    /// 应用批改结果
    ///
    /// 凭证不是最近一次请求时直接丢弃，不修改任何状态
    pub fn complete_submission(
        &mut self,
        ticket: RequestTicket,
        outcome: AppResult<(CorrectionResponse, ChatSession)>,
    ) -> SubmissionOutcome {
        if ticket.0 != self.latest_request {
            warn!(
                "丢弃过期的批改结果 #{} (最新请求 #{})",
                ticket.0, self.latest_request
            );
            return SubmissionOutcome::Stale;
        }

        self.is_loading = false;
        match outcome {
            Ok((response, session)) => {
                let greeting = if response.corrections.is_empty() {
                    GREETING_NO_CORRECTIONS
                } else {
                    GREETING_WITH_CORRECTIONS
                };
                self.chat_history = vec![ChatMessage::model(greeting)];
                self.result = Some(response);
                self.session = Some(session);
                info!("✓ 批改请求 #{} 已完成", ticket.0);
            }
            Err(e) => {
                warn!("❌ 批改请求 #{} 失败: {}", ticket.0, e);
                self.error = Some(e.to_string());
            }
        }

        SubmissionOutcome::Applied
    }

    /// 开始一轮追问
    ///
    /// 空白消息返回 `Ok(None)`，不做任何事；没有会话时返回错误；
    /// 否则记录用户消息并返回可用于发送的会话
    pub fn begin_chat(&mut self, message: &str) -> AppResult<Option<&mut ChatSession>> {
        if message.trim().is_empty() {
            return Ok(None);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(AppError::UninitializedSession);
        };

        self.chat_history.push(ChatMessage::user(message));
        self.is_chat_loading = true;
        Ok(Some(session))
    }

    /// 记录追问的回复；失败时以模型消息的形式记录错误
    pub fn complete_chat(&mut self, reply: AppResult<String>) {
        self.is_chat_loading = false;
        let message = match reply {
            Ok(text) => ChatMessage::model(text),
            Err(e) => {
                warn!("追问失败: {}", e);
                ChatMessage::model(format!("Sorry, I encountered an error: {}", e))
            }
        };
        self.chat_history.push(message);
    }

    /// 当前作文的标注片段；尚无结果时整篇作为原文
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let corrections = self
            .result
            .as_ref()
            .map(|r| r.corrections.as_slice())
            .unwrap_or_default();
        annotate(&self.essay_text, corrections)
    }
}
