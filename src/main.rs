use std::path::PathBuf;

use anyhow::Result;
use essay_corrector::utils::logging;
use essay_corrector::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config_path = std::env::var("ESSAY_CORRECTOR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("essay_corrector.toml"));
    let config = Config::load(Some(config_path.as_path()))?;

    // 初始化日志
    logging::init(&config);

    // 第一个参数为作文文件（可选）
    let source = std::env::args().nth(1);

    App::initialize(config)?.run(source).await?;

    Ok(())
}
