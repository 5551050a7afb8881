//! 日志初始化

use tracing_subscriber::EnvFilter;

/// 初始化 tracing，`RUST_LOG` 优先，否则按 verbose 选择 info / debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 日志写 stderr，stdout 留给 JSON 进度事件
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
