//! 记录处理上下文
//!
//! 封装"我正在处理批次中的第几条记录"这一信息

use std::fmt::Display;

/// 记录处理上下文
#[derive(Debug, Clone, Copy)]
pub struct RecordCtx {
    /// 记录在批次中的位置（从1开始）
    pub position: usize,
    /// 批次总数
    pub total: usize,
}

impl RecordCtx {
    pub fn new(position: usize, total: usize) -> Self {
        Self { position, total }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[记录 {}/{}]", self.position, self.total)
    }
}
