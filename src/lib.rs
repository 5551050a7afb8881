//! # certmail
//!
//! 读取收件人表格，为每位收件人在模板图片上印上姓名、电话、邮箱，
//! 然后把生成的图片通过邮件发给对方，并实时推送处理进度。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `GlyphPainter` - 持有字体，提供"写一行字"的能力
//! - `SmtpMailer` - 持有 SMTP 连接池，提供"发一封邮件"的能力
//!
//! ### ② 业务能力层（Services）
//! - `RecordExtractor` - 表格 → 收件人列表
//! - `ImageRenderer` - 模板 + 收件人 → 图片
//! - `DeliveryAgent` - 图片 + 收件人 → 邮件
//! - `ProgressReporter` - 进度推送
//!
//! ### ③ 流程层（Workflow）
//! - `RecordFlow` - 一条记录的完整流程（生成 → 发送 → 删除）
//!
//! ### ④ 编排层（Orchestration）
//! - `BatchProcessor` - 前置检查、顺序处理、计数、推送
//! - `App` - 组装真实依赖

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, MailConfig, SenderIdentity};
pub use error::{AppError, AppResult, DeliveryError, RecordError, RenderError};
pub use models::{BatchState, BatchSummary, ProgressEvent, RecipientRecord, RecordFailure};
pub use orchestrator::{App, BatchJob, BatchProcessor};
pub use services::{
    ChannelReporter, DeliveryAgent, FanoutReporter, ImageRenderer, JsonLinesReporter,
    MailTransport, OutgoingMail, ProgressReporter, RecordExtractor, RenderArtifact, Template,
    TextLine, TextPainter, TracingReporter,
};
pub use workflow::{RecordCtx, RecordFlow};
