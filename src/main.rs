use anyhow::{Context, Result};
use certmail::{logger, App, Config};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::load().context("加载配置失败")?;
    if let Some(input) = std::env::args().nth(1) {
        config.input_file = input;
    }

    // 初始化日志
    logger::init(config.verbose_logging);

    let input = PathBuf::from(&config.input_file);

    // 初始化并运行应用
    let _summary = App::initialize(config).await?.run(&input).await?;

    Ok(())
}
