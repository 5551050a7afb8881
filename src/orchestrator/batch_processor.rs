//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动一次完整的批次：前置检查 → 提取记录 → 逐条处理 → 汇总。
//!
//! ## 核心功能
//!
//! 1. **前置检查**：模板、发件人、工作目录、表格，任一失败整批中止
//! 2. **顺序处理**：严格按表格顺序逐条处理，不并发
//! 3. **失败隔离**：单条记录失败只计数，不影响后续记录
//! 4. **进度推送**：开始一次、每条记录后一次、结束一次
//!
//! ## 设计特点
//!
//! - **状态所有者**：唯一持有 `BatchJob` 的模块
//! - **向下委托**：单条记录交给 `RecordFlow`

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{BatchSummary, ProgressEvent, RecipientRecord};
use crate::orchestrator::batch_job::BatchJob;
use crate::services::{
    DeliveryAgent, ImageRenderer, MailTransport, ProgressReporter, RecordExtractor, Template,
    TextPainter,
};
use crate::utils::logging::{log_record_start, log_records_loaded};
use crate::workflow::{RecordCtx, RecordFlow};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 批量处理器
pub struct BatchProcessor {
    config: Config,
    painter: Arc<dyn TextPainter>,
    transport: Arc<dyn MailTransport>,
    reporter: Arc<dyn ProgressReporter>,
    extractor: RecordExtractor,
}

impl BatchProcessor {
    pub fn new(
        config: Config,
        painter: Arc<dyn TextPainter>,
        transport: Arc<dyn MailTransport>,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            config,
            painter,
            transport,
            reporter,
            extractor: RecordExtractor::new(),
        }
    }

    /// 处理一个表格文件
    ///
    /// 前置检查失败时只推送一个 error 事件并返回错误；
    /// 否则推送 N+1 个 progress 事件和一个 complete 事件。
    pub async fn run(&self, source: &Path) -> AppResult<BatchSummary> {
        let mut job = BatchJob::new();

        let (flow, records) = match self.prepare(source) {
            Ok(prepared) => prepared,
            Err(e) => {
                job.fail();
                error!("❌ 前置检查失败，批次中止: {}", e);
                self.reporter
                    .notify(&ProgressEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
                return Err(e);
            }
        };

        log_records_loaded(records.len());
        job.start(records);
        self.reporter.notify(&job.progress_event()).await;

        while let Some(record) = job.next_record() {
            let ctx = RecordCtx::new(job.current_index() + 1, job.total());
            log_record_start(ctx.position, ctx.total, &record.name);

            let outcome = flow.run(record, &ctx).await;
            let name = record.name.clone();

            match outcome {
                Ok(()) => job.record_success(),
                Err(e) => {
                    warn!("{} ❌ {} 处理失败: {}", ctx, name, e);
                    job.record_failure(name, e.to_string());
                }
            }

            self.reporter.notify(&job.progress_event()).await;
        }

        let done = job.complete();
        self.reporter.notify(&done).await;

        Ok(job.summary())
    }

    /// 整批致命的前置检查，顺序：模板 → 发件人 → 工作目录 → 表格
    fn prepare(&self, source: &Path) -> AppResult<(RecordFlow, Vec<RecipientRecord>)> {
        let template = Template::load(&self.config.template_path)?;
        let (width, height) = template.dimensions();
        info!("🖼️ 模板已加载: {}x{}", width, height);
        let sender = self.config.mail.sender_identity()?;

        std::fs::create_dir_all(&self.config.work_dir).map_err(|source| AppError::WorkDir {
            path: self.config.work_dir.clone(),
            source,
        })?;

        let extraction = self.extractor.extract(source)?;

        let renderer = ImageRenderer::new(template, self.painter.clone(), &self.config.work_dir);
        let delivery = DeliveryAgent::new(sender, &self.config.mail, self.transport.clone());
        Ok((RecordFlow::new(renderer, delivery), extraction.records))
    }
}
