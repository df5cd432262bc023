//! LLM 服务 - 业务能力层
//!
//! 只负责"调用大模型"这一能力，批改、聊天、识图都基于它实现
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestMessageContentPartImage, ChatCompletionRequestMessageContentPartText,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, ImageDetail, ImageUrl,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ChatMessage, ChatRole};

/// LLM 服务
///
/// 职责：
/// - 组装消息（系统指令、历史对话、用户消息、图片）
/// - 调用兼容 OpenAI 的聊天接口
/// - 不关心批改或聊天的业务含义
#[derive(Clone)]
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            temperature: config.llm_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `system_message`: 系统指令（可选）
    /// - `history`: 之前的对话轮次，按时间顺序
    /// - `user_message`: 本轮用户消息
    /// - `imgs`: 图片 URL 列表（可选，支持 data URL），会追加到用户消息中
    ///
    /// # 返回
    /// 返回去掉首尾空白的回复内容
    pub async fn send_to_llm(
        &self,
        system_message: Option<&str>,
        history: &[ChatMessage],
        user_message: &str,
        imgs: Option<&[String]>,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!(
            "用户消息长度: {} 字符，历史消息 {} 条",
            user_message.chars().count(),
            history.len()
        );

        let messages = build_messages(system_message, history, user_message, imgs)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::from(e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::oracle_response("LLM returned empty content"))?;

        Ok(content.trim().to_string())
    }
}

/// 组装请求消息列表
///
/// 顺序：系统指令 → 历史对话 → 本轮用户消息（含图片时使用 Vision 格式）
pub(crate) fn build_messages(
    system_message: Option<&str>,
    history: &[ChatMessage],
    user_message: &str,
    imgs: Option<&[String]>,
) -> AppResult<Vec<ChatCompletionRequestMessage>> {
    let mut messages = Vec::with_capacity(history.len() + 2);

    if let Some(sys_msg) = system_message {
        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(sys_msg)
            .build()?;
        messages.push(ChatCompletionRequestMessage::System(system_msg));
    }

    for turn in history {
        let message = match turn.role {
            ChatRole::User => ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(turn.text.as_str())
                    .build()?,
            ),
            ChatRole::Model => ChatCompletionRequestMessage::Assistant(
                ChatCompletionRequestAssistantMessageArgs::default()
                    .content(turn.text.as_str())
                    .build()?,
            ),
        };
        messages.push(message);
    }

    let user_msg = match imgs {
        Some(img_urls) if !img_urls.is_empty() => {
            // 使用 Vision API：构建包含文本和图片的内容
            let mut content_parts: Vec<ChatCompletionRequestUserMessageContentPart> =
                Vec::with_capacity(img_urls.len() + 1);

            content_parts.push(ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: user_message.to_string(),
                },
            ));

            for url in img_urls {
                content_parts.push(ChatCompletionRequestUserMessageContentPart::ImageUrl(
                    ChatCompletionRequestMessageContentPartImage {
                        image_url: ImageUrl {
                            url: url.clone(),
                            detail: Some(ImageDetail::High),
                        },
                    },
                ));
            }

            debug!("使用 Vision API，包含 {} 张图片", img_urls.len());

            ChatCompletionRequestUserMessageArgs::default()
                .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
                .build()?
        }
        _ => ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()?,
    };
    messages.push(ChatCompletionRequestMessage::User(user_msg));

    Ok(messages)
}
