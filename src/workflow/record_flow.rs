//! 记录处理流程 - 流程层
//!
//! 核心职责：定义"一条记录"的完整处理流程
//!
//! 流程顺序：
//! 1. 生成图片（写入工作目录）
//! 2. 发送邮件
//! 3. 删除图片（无论发送成功与否）

use crate::error::RecordError;
use crate::models::RecipientRecord;
use crate::services::{DeliveryAgent, ImageRenderer, RenderArtifact};
use crate::workflow::record_ctx::RecordCtx;
use tracing::{debug, info, warn};

/// 记录处理流程
///
/// - 只处理单条记录
/// - 不持有计数器，结果交给编排层统计
/// - 保证同一时刻工作目录里最多只有一张图片
pub struct RecordFlow {
    renderer: ImageRenderer,
    delivery: DeliveryAgent,
}

impl RecordFlow {
    pub fn new(renderer: ImageRenderer, delivery: DeliveryAgent) -> Self {
        Self { renderer, delivery }
    }

    pub async fn run(&self, record: &RecipientRecord, ctx: &RecordCtx) -> Result<(), RecordError> {
        info!("{} 🖼️ 正在为 {} 生成图片...", ctx, record.name);
        let artifact = self.renderer.render(record, ctx.position)?;

        info!("{} 📤 正在发送到 {}...", ctx, record.email);
        let outcome = self.delivery.deliver(record, &artifact).await;

        self.cleanup(artifact, ctx);

        outcome?;
        info!("{} ✓ 发送成功", ctx);
        Ok(())
    }

    /// 删除已发送（或发送失败）的图片
    fn cleanup(&self, artifact: RenderArtifact, ctx: &RecordCtx) {
        let path = artifact.path.clone();
        match artifact.discard() {
            Ok(()) => debug!("{} 🗑️ 已删除: {}", ctx, path.display()),
            Err(e) => warn!("{} ⚠️ 删除图片失败 {}: {}", ctx, path.display(), e),
        }
    }
}
