//! 字体绘制器 - 基础设施层
//!
//! 持有加载好的字体，只暴露"在画布上写一行字"的能力

use crate::error::{AppError, AppResult, RenderError};
use crate::services::image_renderer::{TextLine, TextPainter};
use ab_glyph::{FontArc, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

/// 浅色填充
const FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// 深色描边
const STROKE: Rgba<u8> = Rgba([20, 20, 20, 255]);
/// 描边半径（像素）
const STROKE_RADIUS: i32 = 2;

/// 字体绘制器
///
/// 职责：
/// - 持有唯一的字体资源
/// - 水平居中，先描边再填充
/// - 不认识收件人 / 批次
pub struct GlyphPainter {
    font: FontArc,
}

impl GlyphPainter {
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let unavailable = |reason: String| AppError::FontUnavailable {
            path: path.display().to_string(),
            reason,
        };
        let bytes = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let font = FontArc::try_from_vec(bytes).map_err(|e| unavailable(e.to_string()))?;
        Ok(Self { font })
    }

    /// 居中后的横坐标，文字比画布宽时贴左
    fn centered_x(&self, canvas_width: u32, scale: PxScale, text: &str) -> i32 {
        let (text_width, _) = text_size(scale, &self.font, text);
        (canvas_width.saturating_sub(text_width) / 2) as i32
    }
}

impl TextPainter for GlyphPainter {
    fn paint(&self, canvas: &mut RgbaImage, line: &TextLine, top: i32) -> Result<(), RenderError> {
        if line.font_size <= 0.0 {
            return Err(RenderError::Paint(format!("字号无效: {}", line.font_size)));
        }
        let scale = PxScale::from(line.font_size);
        let x = self.centered_x(canvas.width(), scale, &line.text);

        for dx in -STROKE_RADIUS..=STROKE_RADIUS {
            for dy in -STROKE_RADIUS..=STROKE_RADIUS {
                if (dx, dy) == (0, 0) || dx * dx + dy * dy > STROKE_RADIUS * STROKE_RADIUS {
                    continue;
                }
                draw_text_mut(canvas, STROKE, x + dx, top + dy, scale, &self.font, &line.text);
            }
        }
        draw_text_mut(canvas, FILL, x, top, scale, &self.font, &line.text);
        Ok(())
    }
}
