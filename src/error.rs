use thiserror::Error;

/// 应用程序错误类型
///
/// 所有错误都只会反映到界面状态上，不会导致进程退出
#[derive(Debug, Error)]
pub enum AppError {
    /// 输入校验失败（例如提交了空作文），发生在任何 AI 调用之前
    #[error("{0}")]
    Validation(String),

    /// AI 批改结果缺少必需字段或格式不正确
    #[error("{}Invalid response format from API: {}", context_prefix(.context), .detail)]
    OracleResponse {
        context: Option<String>,
        detail: String,
    },

    /// 网络 / API 调用失败
    #[error("{context}: {source}")]
    OracleCommunication {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 在任何一次成功批改之前发送了聊天消息
    #[error("Chat not initialized. Please correct an essay first.")]
    UninitializedSession,

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 文件读取错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 没有配置 API 密钥
    #[error("未设置 LLM_API_KEY")]
    MissingApiKey,
    /// 配置文件解析失败
    #[error("配置文件解析失败 ({path}): {source}")]
    FileParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 不支持的文件类型
    #[error("不支持的文件类型: {path}")]
    UnsupportedType { path: String },
}

// ========== 从常见错误类型转换 ==========

impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::OracleCommunication {
            context: "LLM API call failed".to_string(),
            source: Box::new(err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::oracle_response(err.to_string())
    }
}

fn context_prefix(context: &Option<String>) -> String {
    context.as_deref().map(|c| format!("{}: ", c)).unwrap_or_default()
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// 创建返回格式错误
    pub fn oracle_response(detail: impl Into<String>) -> Self {
        AppError::OracleResponse {
            context: None,
            detail: detail.into(),
        }
    }

    /// 创建通信错误
    pub fn oracle_communication(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::OracleCommunication {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// 为 AI 相关错误换上调用方的上下文描述，其它错误原样返回
    pub fn in_context(self, context: impl Into<String>) -> Self {
        match self {
            AppError::OracleCommunication { source, .. } => AppError::OracleCommunication {
                context: context.into(),
                source,
            },
            AppError::OracleResponse { detail, .. } => AppError::OracleResponse {
                context: Some(context.into()),
                detail,
            },
            other => other,
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
