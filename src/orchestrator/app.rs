//! 应用入口 - 编排层
//!
//! 持有真实的字体、SMTP 连接和进度输出，组装出 `BatchProcessor`

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{GlyphPainter, SmtpMailer};
use crate::models::{BatchSummary, ProgressEvent};
use crate::orchestrator::batch_processor::BatchProcessor;
use crate::services::{
    FanoutReporter, JsonLinesReporter, ProgressReporter, TracingReporter,
};
use crate::utils::logging::{
    append_fatal, append_summary, init_log_file, log_startup, print_final_stats,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    processor: BatchProcessor,
}

impl App {
    /// 初始化应用，进度输出为日志 + 标准输出 JSON
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let reporter = FanoutReporter::new()
            .with(Arc::new(TracingReporter))
            .with(Arc::new(JsonLinesReporter::stdout()));
        Self::initialize_with_reporter(config, Arc::new(reporter)).await
    }

    /// 使用指定的进度输出初始化应用
    ///
    /// 字体或 SMTP 配置无效时同样属于整批致命错误，先推送 error 事件再返回
    pub async fn initialize_with_reporter(
        config: Config,
        reporter: Arc<dyn ProgressReporter>,
    ) -> AppResult<Self> {
        if let Err(e) = init_log_file(&config.output_log_file) {
            warn!("⚠️ 无法创建日志文件 {}: {}", config.output_log_file, e);
        }

        log_startup(&config);

        let resources = GlyphPainter::from_file(&config.font_path)
            .and_then(|painter| Ok((painter, SmtpMailer::new(&config.mail)?)));
        let (painter, mailer) = match resources {
            Ok(resources) => resources,
            Err(e) => {
                error!("❌ 初始化失败: {}", e);
                reporter
                    .notify(&ProgressEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
                if let Err(write_err) = append_fatal(&config.output_log_file, &e.to_string()) {
                    warn!("⚠️ 写入日志文件失败: {}", write_err);
                }
                return Err(e);
            }
        };

        let processor = BatchProcessor::new(
            config.clone(),
            Arc::new(painter),
            Arc::new(mailer),
            reporter,
        );

        Ok(Self { config, processor })
    }

    /// 运行一个批次
    pub async fn run(&self, input: &Path) -> AppResult<BatchSummary> {
        info!("\n📁 正在读取表格: {}", input.display());

        let result = self.processor.run(input).await;
        let written = match &result {
            Ok(summary) => {
                print_final_stats(summary, &self.config.output_log_file);
                append_summary(&self.config.output_log_file, summary)
            }
            Err(e) => append_fatal(&self.config.output_log_file, &e.to_string()),
        };
        if let Err(e) = written {
            warn!("⚠️ 写入日志文件失败: {}", e);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::ChannelReporter;

    fn config_in(dir: &Path) -> Config {
        Config {
            font_path: dir.join("missing.ttf").display().to_string(),
            output_log_file: dir.join("output.txt").display().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn missing_font_emits_a_single_error_event() {
        let dir = tempfile::tempdir().unwrap();
        let (reporter, mut receiver) = ChannelReporter::channel();

        let err = App::initialize_with_reporter(config_in(dir.path()), Arc::new(reporter))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::FontUnavailable { .. }));

        let event = receiver.try_recv().unwrap();
        assert!(matches!(event, ProgressEvent::Error { ref message } if message.contains("字体无法加载")));
        assert!(receiver.try_recv().is_err());

        let log = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
        assert!(log.contains("批次中止: 字体无法加载"));
    }
}
