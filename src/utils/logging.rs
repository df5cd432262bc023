/// 日志工具模块
///
/// 提供日志初始化和输出格式化的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// 优先使用 RUST_LOG，未设置时使用配置中的过滤规则；开启详细日志时提升到 debug 级别
pub fn init(config: &Config) {
    let default_filter = if config.verbose_logging {
        "essay_corrector=debug".to_string()
    } else {
        config.log_filter.clone()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 作文批改助手启动");
    info!("🤖 模型: {}", config.llm_model_name);
    info!("🌐 接口: {}", config.llm_api_base_url);
    info!(
        "🕒 启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 记录批改结果统计
///
/// # 参数
/// - `highlighted`: 成功高亮的修改数量
/// - `total`: AI 给出的修改总数
pub fn log_annotation_stats(highlighted: usize, total: usize) {
    info!("{}", "─".repeat(60));
    info!("✅ 高亮修改: {}/{}", highlighted, total);
    if highlighted < total {
        info!("⚠️ 未能定位: {}", total - highlighted);
    }
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("ééééé", 2), "éé...");
    }
}
