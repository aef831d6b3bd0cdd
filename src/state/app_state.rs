//! 应用状态
//!
//! 只包含启动时构建的不可变数据，请求之间不共享可变状态

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::MailConfig;
use crate::infra::{build_sender, EmailSender};
use crate::services::ContactRelay;

/// 应用状态
pub struct AppState {
    /// 联系表单转发器
    pub relay: ContactRelay,
    /// 服务启动时间
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 根据邮件配置创建状态（构建真实的邮件发送器）
    pub fn new(mail: &MailConfig) -> Result<Arc<Self>, reqwest::Error> {
        let sender = build_sender(mail)?;
        Ok(Self::with_sender(mail, sender))
    }

    /// 使用指定的发送器创建状态
    pub fn with_sender(mail: &MailConfig, sender: Arc<dyn EmailSender>) -> Arc<Self> {
        Arc::new(Self {
            relay: ContactRelay::new(sender, mail.recipient.clone(), mail.sender.clone()),
            started_at: Utc::now(),
        })
    }
}
