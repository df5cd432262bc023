use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError, FileError};

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 采样温度
    pub llm_temperature: f32,
    /// 单次回复的最大 token 数
    pub llm_max_tokens: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 未设置 RUST_LOG 时使用的日志过滤规则
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 4096,
            verbose_logging: false,
            log_filter: "essay_corrector=info".to_string(),
        }
    }
}

impl Config {
    /// 只从环境变量读取配置，未设置的字段使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件（不存在时使用默认值），再应用环境变量覆盖
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) if path.exists() => Self::from_toml_file(path)?,
            Some(path) => {
                tracing::debug!("配置文件 {} 不存在，使用默认配置", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        Ok(base.with_env_overrides())
    }

    /// 解析 TOML 配置文件
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&content).map_err(|source| {
            ConfigError::FileParseFailed {
                path: path.display().to_string(),
                source,
            }
            .into()
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            log_filter: std::env::var("LOG_FILTER").unwrap_or(self.log_filter),
        }
    }

    /// 检查调用 LLM 所必需的配置
    pub fn require_api_key(&self) -> AppResult<()> {
        if self.llm_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            llm_model_name = "gemini-2.5-flash"
            llm_max_tokens = 2048
            "#,
        )
        .unwrap();

        assert_eq!(config.llm_model_name, "gemini-2.5-flash");
        assert_eq!(config.llm_max_tokens, 2048);
        assert_eq!(config.llm_api_base_url, Config::default().llm_api_base_url);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(Config::from_toml_str("llm_max_tokens = \"lots\"").is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let config = Config {
            llm_api_key: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.require_api_key(),
            Err(crate::error::AppError::Config(ConfigError::MissingApiKey))
        ));

        let config = Config {
            llm_api_key: "sk-test".to_string(),
            ..Default::default()
        };
        assert!(config.require_api_key().is_ok());
    }
}
