/// 日志工具模块
///
/// 提供日志格式化、运行日志文件的辅助函数
use crate::config::Config;
use crate::models::BatchSummary;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

/// 初始化运行日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径，已存在时会被覆盖
///
/// # 返回
/// 返回是否成功写入表头
pub fn init_log_file(log_file_path: &str) -> std::io::Result<()> {
    let log_header = format!(
        "{}\n批量发送日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)
}

/// 把最终统计和失败列表追加到运行日志
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `summary`: 批次汇总
///
/// # 返回
/// 返回是否成功写入
pub fn append_summary(log_file_path: &str, summary: &BatchSummary) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    writeln!(
        file,
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(file, "状态: {:?}", summary.state)?;
    writeln!(file, "成功: {}/{}", summary.succeeded, summary.total)?;
    writeln!(file, "失败: {}", summary.failed)?;
    for failure in &summary.errors {
        writeln!(file, "  - {}: {}", failure.name, failure.message)?;
    }
    Ok(())
}

/// 把致命错误追加到运行日志
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `message`: 错误描述
pub fn append_fatal(log_file_path: &str, message: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(file, "批次中止: {}", message)
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量生成图片并发送邮件");
    info!("🖼️ 模板: {}", config.template_path);
    info!("📁 工作目录: {}", config.work_dir);
    info!("{}", "=".repeat(60));
}

/// 记录表格加载信息
///
/// # 参数
/// - `total`: 记录总数
pub fn log_records_loaded(total: usize) {
    info!("✓ 找到 {} 条待处理的记录", total);
    info!("📋 将逐条顺序处理\n");
}

/// 记录单条记录开始
///
/// # 参数
/// - `position`: 记录位置（从1开始）
/// - `total`: 记录总数
/// - `name`: 收件人姓名
pub fn log_record_start(position: usize, total: usize, name: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 处理第 {}/{} 条: {}", position, total, name);
}

/// 打印最终统计信息
///
/// # 参数
/// - `summary`: 批次汇总
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(summary: &BatchSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", summary.succeeded, summary.total);
    info!("❌ 失败: {}", summary.failed);
    for failure in &summary.errors {
        info!("   - {}: {}", failure.name, truncate_text(&failure.message, 120));
    }
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
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
    use crate::models::{BatchState, RecordFailure};

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_text("邮件发送失败", 4), "邮件发送...");
        assert_eq!(truncate_text("short", 10), "short");
    }

    #[test]
    fn run_log_contains_header_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        let path = path.to_str().unwrap();

        init_log_file(path).unwrap();
        let summary = BatchSummary {
            total: 2,
            succeeded: 1,
            failed: 1,
            errors: vec![RecordFailure {
                name: "Bob".into(),
                message: "邮件发送失败: timeout".into(),
            }],
            state: BatchState::Completed,
        };
        append_summary(path, &summary).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("批量发送日志"));
        assert!(content.contains("成功: 1/2"));
        assert!(content.contains("  - Bob: 邮件发送失败: timeout"));
    }
}
