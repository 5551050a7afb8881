//! 邮件投递服务 - 业务能力层
//!
//! 只负责"给一位收件人发一封带图片附件的邮件"

use crate::config::{MailConfig, SenderIdentity};
use crate::error::DeliveryError;
use crate::models::RecipientRecord;
use crate::services::image_renderer::RenderArtifact;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 一封待发送的邮件（与具体传输方式无关）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub to_name: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: String,
    pub attachment: Vec<u8>,
}

/// 邮件传输能力
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DeliveryError>;
}

/// 邮件投递服务
///
/// 职责：
/// - 用固定标题和正文模板组装邮件
/// - 附件名取自生成的图片文件名
/// - 每次只发一封，不重试
pub struct DeliveryAgent {
    sender: SenderIdentity,
    subject: String,
    html_template: String,
    transport: Arc<dyn MailTransport>,
}

impl DeliveryAgent {
    pub fn new(sender: SenderIdentity, mail: &MailConfig, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            sender,
            subject: mail.subject.clone(),
            html_template: mail.html_body.clone(),
            transport,
        }
    }

    /// 组装邮件
    pub fn compose(&self, record: &RecipientRecord, artifact: &RenderArtifact) -> OutgoingMail {
        OutgoingMail {
            from: self.sender.address.clone(),
            to: record.email.clone(),
            to_name: record.name.clone(),
            subject: self.subject.clone(),
            html_body: personalize(&self.html_template, &record.name),
            attachment_name: artifact.file_name.clone(),
            attachment: artifact.bytes.clone(),
        }
    }

    /// 发送
    pub async fn deliver(&self, record: &RecipientRecord, artifact: &RenderArtifact) -> Result<(), DeliveryError> {
        let mail = self.compose(record, artifact);
        debug!("发送邮件: {} <{}> 附件 {}", mail.to_name, mail.to, mail.attachment_name);
        self.transport.send(mail).await
    }
}

/// 把正文模板中的 `{name}` 替换为转义后的姓名
pub fn personalize(template: &str, name: &str) -> String {
    template.replace("{name}", &escape_html(name))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
