//! SMTP 发送器 - 基础设施层
//!
//! 持有 SMTP 连接池，只暴露"发一封邮件"的能力

use crate::config::MailConfig;
use crate::error::{AppResult, ConfigError, DeliveryError};
use crate::services::delivery_agent::{MailTransport, OutgoingMail};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

/// SMTP 发送器
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// 按配置建立 STARTTLS 连接池
    ///
    /// 发件人凭据缺失时不报错，由批次的前置检查统一处理
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| ConfigError::InvalidSmtp {
                host: config.smtp_host.clone(),
                reason: e.to_string(),
            })?
            .port(config.smtp_port);

        if let Ok(identity) = config.sender_identity() {
            builder = builder.credentials(Credentials::new(identity.address, identity.credential));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), DeliveryError> {
        let message = build_message(&mail)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        debug!("SMTP 响应: {:?}", response.code());
        Ok(())
    }
}

/// 组装 MIME 邮件：HTML 正文 + PNG 附件
pub fn build_message(mail: &OutgoingMail) -> Result<Message, DeliveryError> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
            address: mail.from.clone(),
            reason: e.to_string(),
        })?;
    let to_address: Address = mail
        .to
        .parse()
        .map_err(|e: lettre::address::AddressError| DeliveryError::InvalidAddress {
            address: mail.to.clone(),
            reason: e.to_string(),
        })?;
    let to = Mailbox::new(Some(mail.to_name.clone()), to_address);

    let png = ContentType::parse("image/png").map_err(|e| DeliveryError::Build(e.to_string()))?;
    let body = MultiPart::mixed()
        .singlepart(SinglePart::html(mail.html_body.clone()))
        .singlepart(Attachment::new(mail.attachment_name.clone()).body(mail.attachment.clone(), png));

    Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.clone())
        .multipart(body)
        .map_err(|e| DeliveryError::Build(e.to_string()))
}
