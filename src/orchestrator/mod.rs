//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 创建运行日志、加载字体、建立 SMTP 连接
//! - 组装进度输出（日志 + 标准输出 JSON）
//!
//! ### `batch_processor` - 批量处理器
//! - 前置检查（模板、发件人、工作目录、表格）
//! - 逐条调度 `RecordFlow`，汇总计数
//! - 推送进度事件
//!
//! ### `batch_job` - 批次状态
//! - 计数器、游标、失败列表、状态机
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<RecipientRecord>)
//!     ↓
//! workflow::RecordFlow (处理单条记录)
//!     ↓
//! services (能力层：extract / render / deliver / report)
//!     ↓
//! infrastructure (基础设施：GlyphPainter / SmtpMailer)
//! ```

pub mod app;
pub mod batch_job;
pub mod batch_processor;

pub use app::App;
pub use batch_job::BatchJob;
pub use batch_processor::BatchProcessor;
