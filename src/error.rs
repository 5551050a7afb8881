use thiserror::Error;

/// 应用程序错误类型
///
/// 这里的每一种错误都是"整批致命"的：在处理任何一条记录之前被检查，
/// 一旦出现就中止整个批次。
#[derive(Debug, Error)]
pub enum AppError {
    /// 表格文件无法打开或不是有效的表格
    #[error("无法读取表格文件 ({path}): {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// 模板图片不存在或无法解码
    #[error("模板图片无法加载 ({path}): {reason}")]
    TemplateMissing { path: String, reason: String },

    /// 发件人账号或密码缺失
    #[error("发件人未配置: 缺少 {missing}")]
    SenderUnconfigured { missing: &'static str },

    /// 字体文件无法加载
    #[error("字体无法加载 ({path}): {reason}")]
    FontUnavailable { path: String, reason: String },

    /// 工作目录无法创建
    #[error("工作目录不可用 ({path}): {source}")]
    WorkDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// SMTP 服务器配置无效
    #[error("SMTP 配置无效 ({host}): {reason}")]
    InvalidSmtp { host: String, reason: String },
}

/// 单条记录的错误，只影响这一条记录，批次继续
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("图片生成失败: {0}")]
    Render(#[from] RenderError),
    #[error("邮件发送失败: {0}")]
    Delivery(#[from] DeliveryError),
}

/// 图片合成错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 绘制文字失败
    #[error("绘制文字失败: {0}")]
    Paint(String),
    /// PNG 编码失败
    #[error("PNG 编码失败: {0}")]
    Encode(#[from] image::ImageError),
    /// 写入工作目录失败
    #[error("写入文件失败 ({path}): {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 邮件投递错误
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// 邮箱地址无效
    #[error("邮箱地址无效 ({address}): {reason}")]
    InvalidAddress { address: String, reason: String },
    /// 构建邮件失败
    #[error("构建邮件失败: {0}")]
    Build(String),
    /// 传输失败
    #[error("{0}")]
    Transport(String),
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_error_keeps_transport_text() {
        let err = RecordError::from(DeliveryError::Transport("550 mailbox unavailable".into()));
        assert_eq!(err.to_string(), "邮件发送失败: 550 mailbox unavailable");
    }

    #[test]
    fn sender_unconfigured_names_missing_field() {
        let err = AppError::SenderUnconfigured {
            missing: "EMAIL_PASS",
        };
        assert!(err.to_string().contains("EMAIL_PASS"));
    }
}
