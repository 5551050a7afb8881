//! 图片生成服务 - 业务能力层
//!
//! 只负责"把一位收件人的信息印到模板上"，不关心发送

use crate::error::{AppError, AppResult, RenderError};
use crate::models::RecipientRecord;
use image::{ImageFormat, RgbaImage};
use regex::Regex;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use tracing::debug;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// 一行要绘制的文字
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font_size: f32,
    /// 文字顶部距离图片底部的像素数
    pub offset_from_bottom: u32,
}

impl TextLine {
    /// 在给定高度的图片上的纵坐标，过矮的模板会贴顶
    pub fn top(&self, image_height: u32) -> i32 {
        image_height.saturating_sub(self.offset_from_bottom) as i32
    }
}

/// 三行文字的排版：姓名最大，电话、邮箱依次变小
pub fn layout_lines(record: &RecipientRecord) -> [TextLine; 3] {
    [
        TextLine {
            text: record.name.clone(),
            font_size: 64.0,
            offset_from_bottom: 220,
        },
        TextLine {
            text: format!("Phone: {}", record.phone),
            font_size: 40.0,
            offset_from_bottom: 150,
        },
        TextLine {
            text: format!("Email: {}", record.email),
            font_size: 34.0,
            offset_from_bottom: 95,
        },
    ]
}

/// 文字绘制能力
///
/// 实现方负责水平居中，以及描边 + 填充
pub trait TextPainter: Send + Sync {
    fn paint(&self, canvas: &mut RgbaImage, line: &TextLine, top: i32) -> Result<(), RenderError>;
}

/// 模板图片，每个批次只加载一次
#[derive(Debug, Clone)]
pub struct Template {
    image: RgbaImage,
}

impl Template {
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| AppError::TemplateMissing {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_image(image.to_rgba8()))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// 生成好的图片，生命周期只覆盖一条记录
#[derive(Debug)]
pub struct RenderArtifact {
    /// 附件文件名
    pub file_name: String,
    /// 工作目录中的位置
    pub path: PathBuf,
    /// PNG 数据
    pub bytes: Vec<u8>,
}

impl RenderArtifact {
    /// 删除工作目录中的文件
    pub fn discard(self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// 图片生成服务
///
/// 职责：
/// - 持有模板（只读）和文字绘制能力
/// - 每次只处理一条记录
/// - 把生成结果写入工作目录，交给调用方在发送后删除
pub struct ImageRenderer {
    template: Template,
    painter: Arc<dyn TextPainter>,
    work_dir: PathBuf,
}

impl ImageRenderer {
    pub fn new(template: Template, painter: Arc<dyn TextPainter>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            template,
            painter,
            work_dir: work_dir.into(),
        }
    }

    /// 在模板副本上绘制三行文字
    pub fn compose(&self, record: &RecipientRecord) -> Result<RgbaImage, RenderError> {
        let mut canvas = self.template.image.clone();
        let height = canvas.height();
        for line in layout_lines(record) {
            self.painter.paint(&mut canvas, &line, line.top(height))?;
        }
        Ok(canvas)
    }

    /// 生成并写入工作目录
    ///
    /// `position` 是记录在批次中的位置（从1开始），用于保证文件名唯一
    pub fn render(&self, record: &RecipientRecord, position: usize) -> Result<RenderArtifact, RenderError> {
        let canvas = self.compose(record)?;

        let mut bytes = Vec::new();
        canvas.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        let file_name = artifact_file_name(&record.name, position);
        let path = self.work_dir.join(&file_name);
        std::fs::write(&path, &bytes).map_err(|source| RenderError::Persist {
            path: path.display().to_string(),
            source,
        })?;
        debug!("图片已写入: {} ({} 字节)", path.display(), bytes.len());

        Ok(RenderArtifact {
            file_name,
            path,
            bytes,
        })
    }
}

/// 由姓名生成附件文件名：空白替换为下划线，路径分隔符同样替换
pub fn artifact_file_name(name: &str, position: usize) -> String {
    let sanitized = WHITESPACE.replace_all(name.trim(), "_").replace(['/', '\\'], "_");
    format!("{}_{}.png", sanitized, position)
}
