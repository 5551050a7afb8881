//! 批次状态 - 编排层
//!
//! 一次运行的全部聚合状态，只由 `BatchProcessor` 修改，运行结束即丢弃

use crate::models::{BatchState, BatchSummary, ProgressEvent, RecipientRecord, RecordFailure};

/// 批次状态机
///
/// Pending → Running → Completed，或 Pending → Failed。
/// 任何时刻都满足 `succeeded + failed == current_index <= total`。
#[derive(Debug)]
pub struct BatchJob {
    records: Vec<RecipientRecord>,
    total: usize,
    succeeded: usize,
    failed: usize,
    errors: Vec<RecordFailure>,
    current_index: usize,
    state: BatchState,
}

impl BatchJob {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            succeeded: 0,
            failed: 0,
            errors: Vec::new(),
            current_index: 0,
            state: BatchState::Pending,
        }
    }

    /// 前置检查通过，进入运行状态
    pub fn start(&mut self, records: Vec<RecipientRecord>) {
        debug_assert_eq!(self.state, BatchState::Pending);
        self.total = records.len();
        self.records = records;
        self.state = BatchState::Running;
    }

    /// 前置检查失败
    pub fn fail(&mut self) {
        debug_assert_eq!(self.state, BatchState::Pending);
        self.state = BatchState::Failed;
    }

    /// 下一条待处理的记录
    pub fn next_record(&self) -> Option<&RecipientRecord> {
        if self.state != BatchState::Running {
            return None;
        }
        self.records.get(self.current_index)
    }

    pub fn record_success(&mut self) {
        self.succeeded += 1;
        self.advance();
    }

    pub fn record_failure(&mut self, name: String, message: String) {
        self.failed += 1;
        self.errors.push(RecordFailure { name, message });
        self.advance();
    }

    fn advance(&mut self) {
        debug_assert!(self.current_index < self.total);
        self.current_index += 1;
        debug_assert_eq!(self.succeeded + self.failed, self.current_index);
    }

    /// 当前进度事件
    pub fn progress_event(&self) -> ProgressEvent {
        ProgressEvent::Progress {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            current_index: self.current_index,
            processing: true,
        }
    }

    /// 全部记录处理完毕，返回完成事件
    pub fn complete(&mut self) -> ProgressEvent {
        debug_assert_eq!(self.current_index, self.total);
        self.state = BatchState::Completed;
        ProgressEvent::Complete {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            processing: false,
            errors: self.errors.clone(),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> BatchState {
        self.state
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            errors: self.errors.clone(),
            state: self.state,
        }
    }
}

impl Default for BatchJob {
    fn default() -> Self {
        Self::new()
    }
}
