//! 进度推送 - 业务能力层
//!
//! 编排层只认识 `ProgressReporter::notify`，具体推到哪里（日志、标准输出、
//! channel、socket）由实现决定

use crate::models::ProgressEvent;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info, warn};

/// 进度推送能力
///
/// 事件必须按调用顺序送达，实现方不得合并或重排
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    async fn notify(&self, event: &ProgressEvent);
}

/// 写入 tracing 日志
pub struct TracingReporter;

#[async_trait]
impl ProgressReporter for TracingReporter {
    async fn notify(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Progress {
                total,
                succeeded,
                failed,
                current_index,
                ..
            } => info!(
                "📊 进度 {}/{}: 成功 {}, 失败 {}",
                current_index, total, succeeded, failed
            ),
            ProgressEvent::Complete {
                total,
                succeeded,
                failed,
                ..
            } => info!("✅ 批次完成: 成功 {}/{}, 失败 {}", succeeded, total, failed),
            ProgressEvent::Error { message } => error!("❌ 批次中止: {}", message),
        }
    }
}

/// 每个事件写一行 JSON
pub struct JsonLinesReporter<W> {
    writer: Mutex<W>,
}

impl<W> JsonLinesReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesReporter<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait]
impl<W> ProgressReporter for JsonLinesReporter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn notify(&self, event: &ProgressEvent) {
        let mut line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!("进度事件序列化失败: {}", e);
                return;
            }
        };
        line.push('\n');

        let mut writer = self.writer.lock().await;
        if let Err(e) = writer.write_all(line.as_bytes()).await {
            warn!("进度事件写入失败: {}", e);
            return;
        }
        if let Err(e) = writer.flush().await {
            warn!("进度事件刷新失败: {}", e);
        }
    }
}

/// 转发到 channel，供 socket / SSE 等推送通道消费
pub struct ChannelReporter {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelReporter {
    pub fn new(sender: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }

    /// 创建 reporter 以及对应的接收端
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl ProgressReporter for ChannelReporter {
    async fn notify(&self, event: &ProgressEvent) {
        if self.sender.send(event.clone()).is_err() {
            warn!("进度接收端已关闭，事件被丢弃");
        }
    }
}

/// 依次转发给多个 reporter
#[derive(Default)]
pub struct FanoutReporter {
    reporters: Vec<Arc<dyn ProgressReporter>>,
}

impl FanoutReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.reporters.push(reporter);
        self
    }
}

#[async_trait]
impl ProgressReporter for FanoutReporter {
    async fn notify(&self, event: &ProgressEvent) {
        for reporter in &self.reporters {
            reporter.notify(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(current_index: usize) -> ProgressEvent {
        ProgressEvent::Progress {
            total: 2,
            succeeded: current_index,
            failed: 0,
            current_index,
            processing: true,
        }
    }

    #[tokio::test]
    async fn json_lines_reporter_writes_one_line_per_event() {
        let reporter = JsonLinesReporter::new(Vec::new());
        reporter.notify(&progress(0)).await;
        reporter
            .notify(&ProgressEvent::Error {
                message: "boom".into(),
            })
            .await;

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"type":"progress""#));
        assert_eq!(lines[1], r#"{"type":"error","message":"boom"}"#);
    }

    #[tokio::test]
    async fn fanout_keeps_event_order_for_every_reporter() {
        let (first, mut first_rx) = ChannelReporter::channel();
        let (second, mut second_rx) = ChannelReporter::channel();
        let fanout = FanoutReporter::new()
            .with(Arc::new(first))
            .with(Arc::new(second));

        for i in 0..3 {
            fanout.notify(&progress(i)).await;
        }

        for rx in [&mut first_rx, &mut second_rx] {
            for i in 0..3 {
                assert_eq!(rx.recv().await, Some(progress(i)));
            }
        }
    }

    #[tokio::test]
    async fn channel_reporter_survives_closed_receiver() {
        let (reporter, receiver) = ChannelReporter::channel();
        drop(receiver);
        reporter.notify(&progress(0)).await;
    }
}
