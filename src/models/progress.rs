use serde::{Deserialize, Serialize};

/// 单条记录的失败信息（收件人姓名 + 错误描述）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub name: String,
    pub message: String,
}

/// 推送给客户端的进度事件
///
/// 序列化后形如 `{"type":"progress","total":3,"succeeded":1,...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ProgressEvent {
    #[serde(rename_all = "camelCase")]
    Progress {
        total: usize,
        succeeded: usize,
        failed: usize,
        current_index: usize,
        processing: bool,
    },
    #[serde(rename_all = "camelCase")]
    Complete {
        total: usize,
        succeeded: usize,
        failed: usize,
        processing: bool,
        errors: Vec<RecordFailure>,
    },
    Error { message: String },
}

/// 批次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchState {
    Pending,
    Running,
    Completed,
    Failed,
}

/// 批次处理完成后交给调用方的汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub errors: Vec<RecordFailure>,
    pub state: BatchState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn progress_event_wire_format() {
        let event = ProgressEvent::Progress {
            total: 3,
            succeeded: 1,
            failed: 1,
            current_index: 2,
            processing: true,
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "type": "progress",
                "total": 3,
                "succeeded": 1,
                "failed": 1,
                "currentIndex": 2,
                "processing": true
            })
        );
    }

    #[test]
    fn complete_and_error_wire_format() {
        let complete = ProgressEvent::Complete {
            total: 2,
            succeeded: 1,
            failed: 1,
            processing: false,
            errors: vec![RecordFailure {
                name: "Bob".into(),
                message: "boom".into(),
            }],
        };
        assert_eq!(
            serde_json::to_value(&complete).unwrap(),
            json!({
                "type": "complete",
                "total": 2,
                "succeeded": 1,
                "failed": 1,
                "processing": false,
                "errors": [{"name": "Bob", "message": "boom"}]
            })
        );

        let error = ProgressEvent::Error {
            message: "模板图片无法加载".into(),
        };
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"type": "error", "message": "模板图片无法加载"})
        );
    }
}
