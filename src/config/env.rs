//! 环境变量配置加载

use std::env;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::domain::email::Mailbox;

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown MAIL_PROVIDER '{0}' (expected 'mailchannels' or 'resend')")]
    UnknownProvider(String),

    #[error("{0} must be set when MAIL_PROVIDER={1}")]
    MissingSecret(&'static str, &'static str),
}

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// 监听地址
    pub bind_addr: String,
    /// 服务监听端口
    pub port: u16,
    /// 邮件发送配置
    pub mail: MailConfig,
}

/// 邮件发送配置
#[derive(Clone, Debug)]
pub struct MailConfig {
    /// 收件人（站点所有者）
    pub recipient: Mailbox,
    /// 发件人
    pub sender: Mailbox,
    /// 外部请求超时
    pub timeout: Duration,
    /// 使用的邮件服务商
    pub provider: ProviderConfig,
}

/// 邮件服务商配置
///
/// 两种服务商只是同一个“发送”步骤的不同实现，由配置决定使用哪个
#[derive(Clone, Debug)]
pub enum ProviderConfig {
    /// MailChannels：通过 DKIM 域名签名认证
    MailChannels {
        api_url: String,
        api_key: Option<String>,
        dkim_domain: String,
        dkim_selector: String,
        dkim_private_key: Option<String>,
    },
    /// Resend：通过 Bearer API Key 认证
    Resend { api_url: String, api_key: String },
}

impl ProviderConfig {
    /// 服务商名称（用于日志和 health 端点）
    pub fn name(&self) -> &'static str {
        match self {
            ProviderConfig::MailChannels { .. } => "mailchannels",
            ProviderConfig::Resend { .. } => "resend",
        }
    }
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意 key/value 来源加载配置
    ///
    /// 空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| defaults::BIND_ADDR.to_string());

        let port = get("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::PORT);

        let timeout_secs = get("MAIL_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults::MAIL_TIMEOUT_SECS);

        let recipient = Mailbox::new(
            get("CONTACT_TO_EMAIL").unwrap_or_else(|| defaults::TO_EMAIL.to_string()),
            get("CONTACT_TO_NAME").unwrap_or_else(|| defaults::TO_NAME.to_string()),
        );
        let sender = Mailbox::new(
            get("CONTACT_FROM_EMAIL").unwrap_or_else(|| defaults::FROM_EMAIL.to_string()),
            get("CONTACT_FROM_NAME").unwrap_or_else(|| defaults::FROM_NAME.to_string()),
        );

        let provider_name = get("MAIL_PROVIDER").unwrap_or_else(|| "mailchannels".to_string());
        let provider = match provider_name.to_lowercase().as_str() {
            "mailchannels" => {
                let api_key = get("MAILCHANNELS_API_KEY");
                if api_key.is_none() {
                    warn!("MAILCHANNELS_API_KEY not set, sending without X-Api-Key header");
                }
                ProviderConfig::MailChannels {
                    api_url: get("MAILCHANNELS_API_URL")
                        .unwrap_or_else(|| defaults::MAILCHANNELS_API_URL.to_string()),
                    api_key,
                    dkim_domain: get("DKIM_DOMAIN")
                        .unwrap_or_else(|| defaults::DKIM_DOMAIN.to_string()),
                    dkim_selector: get("DKIM_SELECTOR")
                        .unwrap_or_else(|| defaults::DKIM_SELECTOR.to_string()),
                    dkim_private_key: get("DKIM_PRIVATE_KEY"),
                }
            }
            "resend" => ProviderConfig::Resend {
                api_url: get("RESEND_API_URL")
                    .unwrap_or_else(|| defaults::RESEND_API_URL.to_string()),
                api_key: get("RESEND_API_KEY")
                    .ok_or(ConfigError::MissingSecret("RESEND_API_KEY", "resend"))?,
            },
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        Ok(Self {
            bind_addr,
            port,
            mail: MailConfig {
                recipient,
                sender,
                timeout: Duration::from_secs(timeout_secs),
                provider,
            },
        })
    }
}

/// 默认值
pub mod defaults {
    pub const BIND_ADDR: &str = "0.0.0.0";
    pub const PORT: u16 = 8787;
    pub const MAIL_TIMEOUT_SECS: u64 = 10;

    pub const TO_EMAIL: &str = "info@rohanthapashrestha.com.np";
    pub const TO_NAME: &str = "Rohan Thapa Shrestha";
    pub const FROM_EMAIL: &str = "noreply@rohanthapashrestha.com.np";
    pub const FROM_NAME: &str = "Portfolio Contact Form";

    pub const MAILCHANNELS_API_URL: &str = "https://api.mailchannels.net/tx/v1/send";
    pub const DKIM_DOMAIN: &str = "rohanthapashrestha.com.np";
    pub const DKIM_SELECTOR: &str = "mailchannels";

    pub const RESEND_API_URL: &str = "https://api.resend.com/emails";
}

/// 常量
pub mod constants {
    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// 服务名
    pub const SERVICE_NAME: &str = "contact-relay";

    /// 请求体上限（字节）
    pub const MAX_BODY_BYTES: usize = 64 * 1024;
}
