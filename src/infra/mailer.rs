//! 邮件发送能力抽象
//!
//! MailChannels 和 Resend 是同一个发送步骤的两种实现，
//! 启动时根据 [`ProviderConfig`] 选择其一

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::{MailConfig, ProviderConfig};
use crate::domain::OutboundEmail;
use crate::infra::mailchannels::MailChannelsSender;
use crate::infra::resend::ResendSender;

/// 发送失败
///
/// 仅用于服务端日志，不会透传给调用方
#[derive(Debug, Error)]
pub enum SendError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// 邮件发送器
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 服务商名称
    fn provider(&self) -> &'static str;

    /// 发送一封邮件，服务商返回 2xx 视为成功
    async fn send(&self, email: &OutboundEmail) -> Result<(), SendError>;
}

/// 构建共享的 HTTP client
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(5)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

/// 根据配置创建发送器
pub fn build_sender(config: &MailConfig) -> Result<Arc<dyn EmailSender>, reqwest::Error> {
    let client = http_client(config.timeout)?;

    let sender: Arc<dyn EmailSender> = match &config.provider {
        ProviderConfig::MailChannels {
            api_url,
            api_key,
            dkim_domain,
            dkim_selector,
            dkim_private_key,
        } => Arc::new(MailChannelsSender::new(
            client,
            api_url.clone(),
            api_key.clone(),
            dkim_domain.clone(),
            dkim_selector.clone(),
            dkim_private_key.clone(),
        )),
        ProviderConfig::Resend { api_url, api_key } => Arc::new(ResendSender::new(
            client,
            api_url.clone(),
            api_key.clone(),
        )),
    };

    Ok(sender)
}

/// 将非 2xx 响应转换为 [`SendError::Rejected`]
pub(crate) async fn check_response(response: reqwest::Response) -> Result<(), SendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(SendError::Rejected { status, body })
}
