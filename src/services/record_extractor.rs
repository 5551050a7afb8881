//! 记录提取服务 - 业务能力层
//!
//! 只负责"把表格变成收件人列表"，不关心后续流程

use crate::error::{AppError, AppResult};
use crate::models::RecipientRecord;
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::{debug, info};

/// 姓名、电话、邮箱所在的列（按位置，不匹配表头名称）
const NAME_COLUMN: u32 = 0;
const PHONE_COLUMN: u32 = 1;
const EMAIL_COLUMN: u32 = 2;

/// 提取结果
#[derive(Debug, Default)]
pub struct Extraction {
    pub records: Vec<RecipientRecord>,
    /// 缺少字段被跳过的行数
    pub skipped_rows: usize,
}

/// 记录提取服务
///
/// 职责：
/// - 打开表格文件（xlsx / xls / xlsb / ods），读取第一个工作表
/// - 忽略表头，按列位置读取每一行
/// - 三个字段任一为空白的行直接跳过，不算失败
pub struct RecordExtractor;

impl RecordExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 读取表格文件
    pub fn extract(&self, path: &Path) -> AppResult<Extraction> {
        let unreadable = |reason: String| AppError::SourceUnreadable {
            path: path.display().to_string(),
            reason,
        };

        let mut workbook = open_workbook_auto(path).map_err(|e| unreadable(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| unreadable("表格中没有工作表".to_string()))?
            .map_err(|e| unreadable(e.to_string()))?;

        let extraction = extract_from_range(&range);
        info!(
            "✓ 从 {} 提取到 {} 条记录，跳过 {} 行",
            path.display(),
            extraction.records.len(),
            extraction.skipped_rows
        );
        Ok(extraction)
    }
}

impl Default for RecordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 从工作表区域中提取记录，第一行视为表头
pub fn extract_from_range(range: &Range<Data>) -> Extraction {
    let (Some((first_row, _)), Some((last_row, _))) = (range.start(), range.end()) else {
        return Extraction::default();
    };

    let cell = |row: u32, col: u32| range.get_value((row, col)).map(cell_text).unwrap_or_default();
    let rows = (first_row + 1..=last_row).map(|row| {
        [
            cell(row, NAME_COLUMN),
            cell(row, PHONE_COLUMN),
            cell(row, EMAIL_COLUMN),
        ]
    });

    extract_from_rows(rows)
}

/// 从数据行（不含表头）中提取记录
pub fn extract_from_rows<I>(rows: I) -> Extraction
where
    I: IntoIterator<Item = [String; 3]>,
{
    let mut extraction = Extraction::default();
    for (index, [name, phone, email]) in rows.into_iter().enumerate() {
        match RecipientRecord::from_fields(&name, &phone, &email) {
            Some(record) => extraction.records.push(record),
            None => {
                debug!("跳过第 {} 行数据：缺少姓名、电话或邮箱", index + 1);
                extraction.skipped_rows += 1;
            }
        }
    }
    extraction
}

/// 单元格转文本
///
/// 以数字存储的电话号码要保持整数形式
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Empty | Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}
