#![allow(dead_code)]

use async_trait::async_trait;
use certmail::{
    Config, DeliveryError, MailConfig, MailTransport, OutgoingMail, ProgressEvent, RenderError,
    TextLine, TextPainter,
};
use image::{Rgba, RgbaImage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;

/// 不依赖字体的绘制器：在每行的起始高度画一条横线，可指定对某些文字失败
#[derive(Default)]
pub struct StripePainter {
    pub fail_on: HashSet<String>,
}

impl StripePainter {
    pub fn failing_on(text: &str) -> Self {
        Self {
            fail_on: HashSet::from([text.to_string()]),
        }
    }
}

impl TextPainter for StripePainter {
    fn paint(&self, canvas: &mut RgbaImage, line: &TextLine, top: i32) -> Result<(), RenderError> {
        if self.fail_on.contains(&line.text) {
            return Err(RenderError::Paint(format!("无法绘制 {}", line.text)));
        }
        let y = (top.max(0) as u32).min(canvas.height() - 1);
        for x in 0..canvas.width() {
            canvas.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
        Ok(())
    }
}

/// 发送时对工作目录中的图片做手脚，让后续的删除落空或失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactTamper {
    /// 提前删除
    Remove,
    /// 删除后在同一路径创建目录，删除文件必然失败
    ReplaceWithDir,
}

/// 记录发出的邮件，对指定收件人返回传输错误；同时记录发送时工作目录里的文件数
pub struct FakeTransport {
    pub sent: Mutex<Vec<OutgoingMail>>,
    pub files_at_send: Mutex<Vec<usize>>,
    fail_for: HashSet<String>,
    tamper: Option<ArtifactTamper>,
    work_dir: PathBuf,
}

impl FakeTransport {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            files_at_send: Mutex::new(Vec::new()),
            fail_for: HashSet::new(),
            tamper: None,
            work_dir: work_dir.to_path_buf(),
        }
    }

    pub fn failing_for(mut self, email: &str) -> Self {
        self.fail_for.insert(email.to_string());
        self
    }

    pub fn tampering(mut self, tamper: ArtifactTamper) -> Self {
        self.tamper = Some(tamper);
        self
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for FakeTransport {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DeliveryError> {
        let files = std::fs::read_dir(&self.work_dir)
            .map(|entries| entries.count())
            .unwrap_or(0);
        self.files_at_send.lock().unwrap().push(files);

        if let Some(tamper) = self.tamper {
            let artifact = self.work_dir.join(&mail.attachment_name);
            std::fs::remove_file(&artifact).unwrap();
            if tamper == ArtifactTamper::ReplaceWithDir {
                std::fs::create_dir(&artifact).unwrap();
            }
        }

        if self.fail_for.contains(&mail.to) {
            return Err(DeliveryError::Transport(format!(
                "421 connection reset for {}",
                mail.to
            )));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// 测试用的目录结构：模板、工作目录、运行日志
pub struct Fixture {
    pub dir: tempfile::TempDir,
    pub config: Config,
}

impl Fixture {
    pub fn new(template_size: (u32, u32)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let template_path = dir.path().join("template.png");
        RgbaImage::from_pixel(template_size.0, template_size.1, Rgba([30, 60, 90, 255]))
            .save(&template_path)
            .unwrap();

        let config = Config {
            input_file: dir.path().join("recipients.xlsx").display().to_string(),
            work_dir: dir.path().join("work").display().to_string(),
            template_path: template_path.display().to_string(),
            font_path: dir.path().join("unused.ttf").display().to_string(),
            verbose_logging: false,
            output_log_file: dir.path().join("output.txt").display().to_string(),
            mail: MailConfig {
                sender_address: Some("events@example.com".into()),
                sender_credential: Some("app-password".into()),
                ..MailConfig::default()
            },
        };
        Self { dir, config }
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn input(&self) -> PathBuf {
        PathBuf::from(&self.config.input_file)
    }

    /// 写入表格：第一行表头，后面是数据行
    pub fn write_sheet(&self, rows: &[[&str; 3]]) {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (col, header) in ["Name", "Phone", "Email"].iter().enumerate() {
            worksheet.write_string(0, col as u16, *header).unwrap();
        }
        for (i, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet
                        .write_string(i as u32 + 1, col as u16, *value)
                        .unwrap();
                }
            }
        }
        workbook.save(self.input()).unwrap();
    }
}

pub fn is_terminal(event: &ProgressEvent) -> bool {
    !matches!(event, ProgressEvent::Progress { .. })
}

pub fn drain(receiver: &mut UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        events.push(event);
    }
    events
}

pub const THREE_RECIPIENTS: [[&str; 3]; 3] = [
    ["Ada Lovelace", "555-0100", "ada@example.com"],
    ["Bob Stone", "555-0101", "bob@example.com"],
    ["Cy Young", "555-0102", "cy@example.com"],
];
