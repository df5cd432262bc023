//! 作文读取 - 业务能力层
//!
//! 文本类文件直接按 UTF-8 读取；图片交给 AI 识别出文字后作为作文内容

use std::io::ErrorKind;
use std::path::Path;

use base64::Engine;
use tracing::{debug, info, warn};

use crate::error::{AppResult, FileError};
use crate::services::LlmService;

const TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

const EXTRACTION_PROMPT: &str = "Extract all of the handwritten or printed essay text from this image. \
Return only the extracted text exactly as written, preserving paragraph breaks and any mistakes. \
Do not correct, summarize, or comment on it.";

/// 作文来源的类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Text,
    /// 图片，附带 MIME 类型
    Image(&'static str),
}

/// 根据扩展名判断来源类型（不区分大小写）
pub fn classify(location: &str) -> AppResult<SourceKind> {
    let without_query = location.split(['?', '#']).next().unwrap_or(location);
    let extension = Path::new(without_query)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return Ok(SourceKind::Text);
    }

    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => {
            return Err(FileError::UnsupportedType {
                path: location.to_string(),
            }
            .into())
        }
    };
    Ok(SourceKind::Image(mime))
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// 读取作文
///
/// `location` 可以是本地文件路径，也可以是 http(s) 图片地址
pub async fn load_essay(location: &str, llm: &LlmService) -> AppResult<String> {
    let kind = classify(location)?;

    match kind {
        SourceKind::Text if is_remote(location) => Err(FileError::UnsupportedType {
            path: location.to_string(),
        }
        .into()),
        SourceKind::Text => read_text(location).await,
        SourceKind::Image(_) if is_remote(location) => {
            extract_text_from_image(location.to_string(), llm).await
        }
        SourceKind::Image(mime) => {
            let bytes = read_bytes(location).await?;
            debug!("图片大小: {} 字节", bytes.len());
            extract_text_from_image(to_data_url(mime, &bytes), llm).await
        }
    }
}

async fn read_text(path: &str) -> AppResult<String> {
    let bytes = read_bytes(path).await?;
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("⚠️ 文件 {} 含有无效的 UTF-8 字节，已替换为 U+FFFD", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    info!("📄 已读取文本文件 {} ({} 字符)", path, text.chars().count());
    Ok(text)
}

async fn read_bytes(path: &str) -> AppResult<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| {
        let path = path.to_string();
        match source.kind() {
            ErrorKind::NotFound => FileError::NotFound { path },
            _ => FileError::ReadFailed { path, source },
        }
        .into()
    })
}

/// 把图片编码成 data URL
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

async fn extract_text_from_image(image_url: String, llm: &LlmService) -> AppResult<String> {
    info!("🖼️ 正在识别图片中的文字...");

    let images = [image_url];
    let text = llm
        .send_to_llm(None, &[], EXTRACTION_PROMPT, Some(&images))
        .await
        .map_err(|e| e.in_context("Failed to extract text from image"))?;

    info!("✓ 识别完成 ({} 字符)", text.chars().count());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::AppError;

    fn llm() -> LlmService {
        LlmService::new(&Config {
            llm_api_key: "test-key".to_string(),
            ..Config::default()
        })
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("essay.txt").unwrap(), SourceKind::Text);
        assert_eq!(classify("notes/Essay.MD").unwrap(), SourceKind::Text);
        assert_eq!(classify("scan.JPG").unwrap(), SourceKind::Image("image/jpeg"));
        assert_eq!(
            classify("https://example.com/page.png?size=large").unwrap(),
            SourceKind::Image("image/png")
        );
        assert!(matches!(
            classify("essay.docx"),
            Err(AppError::File(FileError::UnsupportedType { .. }))
        ));
        assert!(classify("README").is_err());
    }

    #[test]
    fn test_to_data_url() {
        assert_eq!(to_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[tokio::test]
    async fn test_load_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.txt");
        tokio::fs::write(&path, "My summer holiday.\n").await.unwrap();

        let essay = load_essay(path.to_str().unwrap(), &llm()).await.unwrap();
        assert_eq!(essay, "My summer holiday.\n");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("essay.txt");
        tokio::fs::write(&path, b"caf\xE9 time").await.unwrap();

        let essay = load_essay(path.to_str().unwrap(), &llm()).await.unwrap();
        assert_eq!(essay, "caf\u{FFFD} time");
    }

    #[tokio::test]
    async fn test_directory_is_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folder.txt");
        tokio::fs::create_dir(&path).await.unwrap();

        let result = load_essay(path.to_str().unwrap(), &llm()).await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::ReadFailed { .. }))
        ));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_essay("/definitely/not/here.txt", &llm()).await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::NotFound { .. }))
        ));
    }
}
