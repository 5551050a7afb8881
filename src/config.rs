use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;

/// 默认邮件标题
pub const DEFAULT_SUBJECT: &str = "Your personalized card is here";

/// 默认邮件正文，`{name}` 会被替换为收件人姓名
pub const DEFAULT_HTML_BODY: &str = r#"<div style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2>Hello {name},</h2>
  <p>Thank you for being part of our event. Your personalized card is attached to this email.</p>
  <p>Best regards,<br/>The Organizing Team</p>
</div>"#;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 待处理的表格文件
    pub input_file: String,
    /// 生成图片的临时目录
    pub work_dir: String,
    /// 模板图片路径
    pub template_path: String,
    /// 字体文件路径
    pub font_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 邮件配置
    pub mail: MailConfig,
}

/// 邮件配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// 发件人地址（没有默认值）
    pub sender_address: Option<String>,
    /// 发件人密码或授权码（没有默认值）
    pub sender_credential: Option<String>,
    pub subject: String,
    pub html_body: String,
}

/// 发件人身份
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SenderIdentity {
    pub address: String,
    pub credential: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: "uploads/recipients.xlsx".to_string(),
            work_dir: "generated".to_string(),
            template_path: "assets/template.png".to_string(),
            font_path: "assets/fonts/DejaVuSans-Bold.ttf".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            mail: MailConfig::default(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            sender_address: None,
            sender_credential: None,
            subject: DEFAULT_SUBJECT.to_string(),
            html_body: DEFAULT_HTML_BODY.to_string(),
        }
    }
}

impl Config {
    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    /// `CERTMAIL_CONFIG` 指向的 TOML 文件（如果有），再叠加环境变量
    pub fn load() -> AppResult<Self> {
        match std::env::var("CERTMAIL_CONFIG") {
            Ok(path) => Ok(Self::from_toml_file(path)?.with_env_overrides()),
            Err(_) => Ok(Self::from_env()),
        }
    }

    /// 用环境变量覆盖已有的值
    pub fn with_env_overrides(self) -> Self {
        let mail = self.mail;
        Self {
            input_file: std::env::var("INPUT_FILE").unwrap_or(self.input_file),
            work_dir: std::env::var("WORK_DIR").unwrap_or(self.work_dir),
            template_path: std::env::var("TEMPLATE_PATH").unwrap_or(self.template_path),
            font_path: std::env::var("FONT_PATH").unwrap_or(self.font_path),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(self.output_log_file),
            mail: MailConfig {
                smtp_host: std::env::var("SMTP_HOST").unwrap_or(mail.smtp_host),
                smtp_port: std::env::var("SMTP_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(mail.smtp_port),
                sender_address: std::env::var("EMAIL_USER").ok().or(mail.sender_address),
                sender_credential: std::env::var("EMAIL_PASS").ok().or(mail.sender_credential),
                subject: std::env::var("MAIL_SUBJECT").unwrap_or(mail.subject),
                html_body: mail.html_body,
            },
        }
    }
}

impl MailConfig {
    /// 检查发件人账号和密码，两者缺一不可
    pub fn sender_identity(&self) -> AppResult<SenderIdentity> {
        let address = non_blank(self.sender_address.as_deref())
            .ok_or(AppError::SenderUnconfigured { missing: "EMAIL_USER" })?;
        let credential = non_blank(self.sender_credential.as_deref())
            .ok_or(AppError::SenderUnconfigured { missing: "EMAIL_PASS" })?;
        Ok(SenderIdentity {
            address: address.to_string(),
            credential: credential.to_string(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
