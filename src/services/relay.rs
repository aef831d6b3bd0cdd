//! 联系表单转发服务
//!
//! 校验 → 组装邮件 → 调用邮件服务商。无状态、不重试，
//! 每次有效提交恰好一次外部调用

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{ContactForm, Mailbox, OutboundEmail};
use crate::error::{RelayError, RelayResult};
use crate::infra::EmailSender;

/// 联系表单转发器
#[derive(Clone)]
pub struct ContactRelay {
    sender: Arc<dyn EmailSender>,
    recipient: Mailbox,
    from: Mailbox,
}

impl ContactRelay {
    pub fn new(sender: Arc<dyn EmailSender>, recipient: Mailbox, from: Mailbox) -> Self {
        Self {
            sender,
            recipient,
            from,
        }
    }

    pub fn provider(&self) -> &'static str {
        self.sender.provider()
    }

    /// 处理一次表单提交
    pub async fn relay(&self, form: ContactForm) -> RelayResult<()> {
        let submission = form.validate()?;
        let email = OutboundEmail::compose(&submission, &self.recipient, &self.from, Utc::now());

        self.sender
            .send(&email)
            .await
            .map_err(|e| RelayError::provider(format!("{} ({})", e, self.sender.provider())))?;

        info!(
            provider = self.sender.provider(),
            message_len = submission.message().len(),
            "Contact message relayed"
        );
        Ok(())
    }
}
